//! Geometry types shared by renderers and image filters.
//!
//! Window space is physical pixels, origin top-left, +X right, +Y down.
//! Image space is whole pixels of an image, same orientation.

mod pixel_rect;
mod rect;
mod vec2;
mod viewport;

pub use pixel_rect::PixelRect;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
