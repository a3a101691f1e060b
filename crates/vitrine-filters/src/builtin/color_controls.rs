use crate::Image;

const REC709_LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Saturation, brightness and contrast adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorControls {
    /// 0 is greyscale, 1 leaves colours unchanged, above 1 boosts them.
    pub saturation: f32,
    /// Added to every colour channel.
    pub brightness: f32,
    /// Scale around mid grey.
    pub contrast: f32,
}

impl Default for ColorControls {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            brightness: 0.0,
            contrast: 1.0,
        }
    }
}

impl ColorControls {
    pub fn saturation(saturation: f32) -> Self {
        Self {
            saturation,
            ..Self::default()
        }
    }

    fn is_finite(&self) -> bool {
        self.saturation.is_finite() && self.brightness.is_finite() && self.contrast.is_finite()
    }

    fn apply(&self, [r, g, b, a]: [f32; 4]) -> [f32; 4] {
        let luma = r * REC709_LUMA[0] + g * REC709_LUMA[1] + b * REC709_LUMA[2];
        let adjust = |c: f32| {
            let c = luma + (c - luma) * self.saturation + self.brightness;
            ((c - 0.5) * self.contrast + 0.5).clamp(0.0, 1.0)
        };
        [adjust(r), adjust(g), adjust(b), a]
    }
}

/// Applies `controls` to every pixel. Alpha is kept. Non-finite controls have
/// no output.
pub fn color_controls(image: &Image, controls: ColorControls) -> Option<Image> {
    if !controls.is_finite() {
        return None;
    }
    Some(image.map_pixels(|p| controls.apply(p)))
}
