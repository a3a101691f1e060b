//! Still-image filters for the vitrine gallery.
//!
//! Two filters run named compute kernels from a WGSL kernel library; the glow
//! filter is composed from stock CPU stages.

mod bitmap;
pub mod builtin;
mod error;
pub mod filters;
pub mod kernel;

pub use bitmap::Image;
pub use error::{FilterError, ImageError, KernelError};
pub use filters::{GlowFilter, ImageFilter, Super8Filter, ThreeDyeFilter};
