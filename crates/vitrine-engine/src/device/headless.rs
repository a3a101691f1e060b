use super::request::{create_instance, request_device, DeviceParts};
use super::{DeviceError, GpuCtx, GpuInit};

/// Device + queue without a presentation surface.
///
/// Used for offscreen work such as image filtering.
pub struct HeadlessGpu {
    adapter_info: wgpu::AdapterInfo,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl HeadlessGpu {
    /// Acquires the default adapter and opens a device on it.
    pub async fn new(init: GpuInit) -> Result<Self, DeviceError> {
        let instance = create_instance();
        let DeviceParts {
            adapter,
            device,
            queue,
        } = request_device(&instance, None, &init, "vitrine headless device").await?;

        Ok(Self {
            adapter_info: adapter.get_info(),
            device,
            queue,
        })
    }

    /// Blocking variant of [`HeadlessGpu::new`].
    pub fn new_blocking(init: GpuInit) -> Result<Self, DeviceError> {
        pollster::block_on(Self::new(init))
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn ctx(&self) -> GpuCtx<'_> {
        GpuCtx::new(&self.device, &self.queue)
    }
}
