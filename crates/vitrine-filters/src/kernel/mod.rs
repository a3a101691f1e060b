//! Named compute kernels applied over a rectangle of an image.
//!
//! Kernels come from a WGSL library with a fixed binding contract:
//! `@binding(0)` the source region, `@binding(1)` an `rgba32float` storage
//! texture for the destination, `@binding(2)` a [`KernelParams`] uniform.

mod compiled;
mod dispatch;
mod library;
mod params;
mod readback;

pub use compiled::{Kernel, KernelSignature};
pub use dispatch::{plan_dispatch, DispatchPlan, WORKGROUP_SIZE};
pub use library::KernelLibrary;
pub use params::{KernelParams, MAX_VECTORS};
