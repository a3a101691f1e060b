//! WGSL shader libraries.
//!
//! A library is one WGSL source plus the entry points declared in it. Entry
//! points are discovered by a small scanner so that a missing `vertex_main` or
//! kernel function is reported by name before anything reaches the driver.

mod error;
mod library;
mod scan;

pub use error::ShaderError;
pub use library::{ShaderLibrary, ShaderStage};
