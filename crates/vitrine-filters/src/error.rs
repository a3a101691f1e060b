use std::path::PathBuf;

use thiserror::Error;
use vitrine_engine::coords::PixelRect;
use vitrine_engine::device::ValidationError;
use vitrine_engine::shader::ShaderError;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to decode image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode image {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image has no pixels")]
    Empty,

    #[error("{width}x{height} image needs {expected} values, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Failure to find or compile a kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("kernel library not found at {0}")]
    LibraryNotFound(PathBuf),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("wgpu rejected kernel `{kernel}`")]
    Compile {
        kernel: &'static str,
        #[source]
        source: ValidationError,
    },
}

/// Failure while applying a filter.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("kernel `{kernel}` takes {expected} vector argument(s), got {actual}")]
    ArgumentCount {
        kernel: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("kernel `{kernel}` has nothing to read for destination {dest:?}")]
    EmptyRegion {
        kernel: &'static str,
        dest: PixelRect,
    },

    #[error("{width}x{height} exceeds the device texture limit of {limit}")]
    TooLarge { width: u32, height: u32, limit: u32 },

    #[error("waiting for the GPU failed")]
    Poll(#[from] wgpu::PollError),

    #[error("GPU readback failed")]
    Readback(#[from] wgpu::BufferAsyncError),

    #[error("GPU readback never completed")]
    ReadbackLost,

    #[error(transparent)]
    Image(#[from] ImageError),
}
