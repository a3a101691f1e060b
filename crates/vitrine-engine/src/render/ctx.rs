use crate::coords::Viewport;
use crate::device::{Drawable, Gpu};

/// Device, queue and target format handed to renderers that talk to wgpu
/// directly.
#[derive(Clone, Copy)]
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport, // physical px
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
        }
    }

    pub fn from_gpu(gpu: &'a Gpu<'_>) -> Self {
        let size = gpu.size();
        Self::new(
            gpu.device(),
            gpu.queue(),
            gpu.surface_format(),
            Viewport::new(size.width as f32, size.height as f32),
        )
    }
}

/// Encoder and color view for one frame.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    #[inline]
    pub fn for_drawable(encoder: &'a mut wgpu::CommandEncoder, drawable: &'a Drawable) -> Self {
        Self::new(encoder, &drawable.view)
    }
}
