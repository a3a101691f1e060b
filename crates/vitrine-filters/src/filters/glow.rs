use vitrine_engine::device::GpuCtx;

use super::ImageFilter;
use crate::builtin::{color_controls, gaussian_blur, screen_blend, ColorControls};
use crate::{FilterError, Image};

/// Soft glow: the image screened over a blurred, re-saturated copy of itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowFilter {
    /// Blur standard deviation in pixels.
    pub radius: f32,
    /// Saturation of the blurred layer.
    pub intensity: f32,
}

impl Default for GlowFilter {
    fn default() -> Self {
        Self {
            radius: 10.0,
            intensity: 1.0,
        }
    }
}

impl GlowFilter {
    /// `screen_blend(color_controls(gaussian_blur(input)), input)`.
    pub fn output_image(&self, input: Option<&Image>) -> Option<Image> {
        let input = input?;
        let blurred = gaussian_blur(input, self.radius)?;
        let glow = color_controls(&blurred, ColorControls::saturation(self.intensity))?;
        screen_blend(&glow, input)
    }
}

impl ImageFilter for GlowFilter {
    fn name(&self) -> &'static str {
        "glow"
    }

    /// Runs on the CPU; `gpu` is unused.
    fn output_image(
        &self,
        _gpu: GpuCtx<'_>,
        input: Option<&Image>,
    ) -> Result<Option<Image>, FilterError> {
        Ok(GlowFilter::output_image(self, input))
    }
}
