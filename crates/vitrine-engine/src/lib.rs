//! Vitrine engine crate.
//!
//! Owns the GPU device, the window runtime and the mesh renderer shared by the
//! vitrine demos.

pub mod device;
pub mod window;
pub mod core;

pub mod logging;
pub mod coords;
pub mod mesh;
pub mod paint;
pub mod render;
pub mod shader;
