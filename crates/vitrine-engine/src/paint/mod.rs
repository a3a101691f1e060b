//! Colour representation shared by renderers.

mod color;

pub use color::Color;
