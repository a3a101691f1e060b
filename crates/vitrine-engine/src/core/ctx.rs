use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires a drawable, calls `draw` with a ready [`RenderCtx`] and
    /// [`RenderTarget`], then submits and presents.
    ///
    /// `draw` is responsible for clearing; `clear` reaches it already encoded
    /// for the surface format. A transient surface error skips the frame; a fatal one exits.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>, Color),
    {
        let drawable = match self.gpu.acquire_drawable() {
            Ok(d) => d,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        let mut encoder = self.gpu.create_encoder("vitrine frame encoder");

        {
            let rctx = RenderCtx::from_gpu(self.gpu);
            let mut target = RenderTarget::for_drawable(&mut encoder, &drawable);
            draw(&rctx, &mut target, clear.for_format(rctx.surface_format));
        }

        self.window.pre_present_notify();
        self.gpu.submit(encoder);
        drawable.present();

        AppControl::Continue
    }
}
