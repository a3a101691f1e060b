//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue, with or without a window
//! - creating & configuring the Surface (swapchain)
//! - acquiring drawables and mapping surface errors to frame-level actions

mod error;
mod frame;
mod gpu;
mod headless;
mod init;
mod request;
mod surface;

pub use error::{DeviceError, SurfaceErrorAction, ValidationError};
pub use frame::Drawable;
pub use gpu::Gpu;
pub use headless::HeadlessGpu;
pub use init::GpuInit;

/// Borrowed device + queue pair.
///
/// Handed to code that records GPU work but does not care whether a surface exists.
#[derive(Copy, Clone)]
pub struct GpuCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
}

impl<'a> GpuCtx<'a> {
    #[inline]
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Blocks until all submitted work has completed.
    pub fn wait_idle(&self) -> Result<(), wgpu::PollError> {
        self.device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .map(|_| ())
    }
}

/// Runs `f` inside a validation error scope.
///
/// Objects created by `f` that wgpu rejects come back as a [`ValidationError`]
/// instead of reaching the device's uncaptured-error handler.
pub fn validated<T>(
    device: &wgpu::Device,
    f: impl FnOnce() -> T,
) -> Result<T, ValidationError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    match pollster::block_on(scope.pop()) {
        None => Ok(value),
        Some(err) => Err(ValidationError {
            message: err.to_string(),
        }),
    }
}
