use thiserror::Error;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Failure while bringing up the GPU layer.
///
/// Device creation either yields a complete context or one of these; there is
/// no partially initialized state.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("window has zero size")]
    ZeroSizedWindow,

    #[error("failed to create wgpu surface")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find a suitable GPU adapter")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device/queue")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats on adapter `{adapter}`")]
    NoSurfaceFormat { adapter: String },
}

/// An object wgpu refused to create, such as a shader that fails to compile.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}
