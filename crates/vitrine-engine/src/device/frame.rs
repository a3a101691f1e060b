/// The surface texture acquired for one frame, plus a view to render into.
///
/// Short-lived: holding it prevents acquisition of subsequent frames. Present it
/// after the frame's command buffer has been submitted.
pub struct Drawable {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}

impl Drawable {
    pub(crate) fn new(surface_texture: wgpu::SurfaceTexture) -> Self {
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Self { surface_texture, view }
    }

    /// Schedules the drawable for presentation.
    pub fn present(self) {
        drop(self.view);
        self.surface_texture.present();
    }
}
