//! Stock image stages the glow filter is composed from.
//!
//! Each stage is a plain function from images to an image. `None` means the
//! stage cannot produce an output for its arguments.

mod blur;
mod color_controls;
mod screen_blend;

pub use blur::gaussian_blur;
pub use color_controls::{color_controls, ColorControls};
pub use screen_blend::screen_blend;
