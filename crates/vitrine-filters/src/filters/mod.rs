//! Filters that turn one input image into one output image.

mod glow;
mod kernel_filter;
mod super8;
mod three_dye;

pub use glow::GlowFilter;
pub use super8::Super8Filter;
pub use three_dye::ThreeDyeFilter;

use vitrine_engine::device::GpuCtx;

use crate::{FilterError, Image};

pub trait ImageFilter {
    fn name(&self) -> &'static str;

    /// Filters `input`. No input gives no output.
    fn output_image(
        &self,
        gpu: GpuCtx<'_>,
        input: Option<&Image>,
    ) -> Result<Option<Image>, FilterError>;
}
