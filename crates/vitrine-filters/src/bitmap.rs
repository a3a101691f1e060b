use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgba, Rgba32FImage, RgbaImage};
use vitrine_engine::coords::PixelRect;

use crate::ImageError;

/// Straight-alpha RGBA pixels in `[0, 1]`, row-major, top row first.
///
/// Channel values are stored as encoded by the source file (no
/// linearization), so 8-bit images convert back without loss. Never empty.
#[derive(Debug, Clone)]
pub struct Image {
    buffer: Rgba32FImage,
}

/// Equal extents and equal channel values; colour-space tags are ignored.
impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.buffer.dimensions() == other.buffer.dimensions()
            && self.buffer.as_raw() == other.buffer.as_raw()
    }
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ImageError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        let buffer = ImageBuffer::from_raw(width, height, pixels.concat()).ok_or(
            ImageError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            },
        )?;
        Self::from_buffer(buffer)
    }

    /// Wraps a float buffer; fails when it has no pixels.
    pub fn from_buffer(buffer: Rgba32FImage) -> Result<Self, ImageError> {
        if buffer.width() == 0 || buffer.height() == 0 {
            return Err(ImageError::Empty);
        }
        Ok(Self { buffer })
    }

    /// Every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: [f32; 4]) -> Result<Self, ImageError> {
        Self::from_buffer(ImageBuffer::from_pixel(width, height, Rgba(color)))
    }

    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [f32; 4],
    ) -> Result<Self, ImageError> {
        Self::from_buffer(ImageBuffer::from_fn(width, height, |x, y| Rgba(f(x, y))))
    }

    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize * 4;
        let mismatch = ImageError::SizeMismatch {
            width,
            height,
            expected,
            actual: bytes.len(),
        };
        if bytes.len() != expected {
            return Err(mismatch);
        }
        let rgba = RgbaImage::from_raw(width, height, bytes.to_vec()).ok_or(mismatch)?;
        Self::from_buffer(DynamicImage::ImageRgba8(rgba).into_rgba32f())
    }

    /// 8-bit RGBA bytes; channels are clamped to `[0, 1]` and rounded.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.buffer
            .as_raw()
            .iter()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded {} ({}x{})", path.display(), decoded.width(), decoded.height());
        Self::from_buffer(decoded.into_rgba32f())
    }

    /// Writes the image as 8-bit RGBA; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgba8(),
            self.width(),
            self.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|source| ImageError::Encode {
            path: path.to_path_buf(),
            source,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Full pixel rectangle at the origin.
    #[inline]
    pub fn extent(&self) -> PixelRect {
        PixelRect::from_size(self.width(), self.height())
    }

    #[inline]
    pub fn as_buffer(&self) -> &Rgba32FImage {
        &self.buffer
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [f32; 4]> + '_ {
        self.buffer.pixels().map(|p| p.0)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.buffer.get_pixel(x, y).0
    }

    /// Same extent, `f` applied to every pixel.
    pub fn map_pixels(&self, f: impl Fn([f32; 4]) -> [f32; 4]) -> Image {
        let mut buffer = self.buffer.clone();
        for p in buffer.pixels_mut() {
            p.0 = f(p.0);
        }
        Image { buffer }
    }

    /// Copy of `rect` clipped to the image; `None` when nothing overlaps.
    pub fn crop(&self, rect: PixelRect) -> Option<Image> {
        let r = self.extent().intersect(rect)?;
        let view = image::imageops::crop_imm(&self.buffer, r.x as u32, r.y as u32, r.width, r.height);
        Some(Image {
            buffer: view.to_image(),
        })
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.buffer.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> Image {
        Image::from_fn(w, h, |x, y| [x as f32 / 10.0, y as f32 / 10.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn empty_images_are_rejected() {
        assert!(matches!(Image::new(0, 4, vec![]), Err(ImageError::Empty)));
        assert!(matches!(Image::filled(3, 0, [1.0; 4]), Err(ImageError::Empty)));
    }

    #[test]
    fn pixel_count_must_match_extent() {
        let err = Image::new(2, 2, vec![[0.0; 4]; 3]).unwrap_err();
        assert!(matches!(err, ImageError::SizeMismatch { expected: 4, actual: 3, .. }));
    }

    #[test]
    fn pixels_are_row_major() {
        let img = Image::new(2, 2, vec![[0.0; 4], [0.1; 4], [0.2; 4], [0.3; 4]]).unwrap();
        assert_eq!(img.pixel(1, 0), [0.1; 4]);
        assert_eq!(img.pixel(0, 1), [0.2; 4]);
        assert_eq!(img.pixels().last(), Some([0.3; 4]));
        assert_eq!(img.as_bytes().len(), 4 * 16);
    }

    #[test]
    fn rgba8_conversion_keeps_byte_values() {
        let bytes = [0u8, 64, 128, 255, 255, 1, 2, 3];
        let img = Image::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(img.pixel(0, 0)[3], 1.0);
        assert_eq!(img.to_rgba8(), bytes);
    }

    #[test]
    fn short_rgba8_input_is_a_size_mismatch() {
        let err = Image::from_rgba8(2, 2, &[0; 12]).unwrap_err();
        assert!(matches!(err, ImageError::SizeMismatch { expected: 16, actual: 12, .. }));
    }

    #[test]
    fn out_of_range_values_saturate_on_export() {
        let img = Image::filled(1, 1, [-0.5, 1.5, 0.5, 1.0]).unwrap();
        assert_eq!(img.to_rgba8(), vec![0, 255, 128, 255]);
    }

    #[test]
    fn crop_clips_to_the_image() {
        let img = gradient(4, 3);
        let c = img.crop(PixelRect::new(2, 1, 10, 10)).unwrap();
        assert_eq!((c.width(), c.height()), (2, 2));
        assert_eq!(c.pixel(0, 0), img.pixel(2, 1));
        assert_eq!(c.pixel(1, 1), img.pixel(3, 2));

        assert!(img.crop(PixelRect::new(4, 0, 1, 1)).is_none());
    }

    #[test]
    fn map_pixels_keeps_the_extent() {
        let img = gradient(3, 2);
        let inverted = img.map_pixels(|[r, g, b, a]| [1.0 - r, 1.0 - g, 1.0 - b, a]);
        assert_eq!(inverted.extent(), img.extent());
        let p = inverted.pixel(2, 1);
        assert!((p[0] - 0.8).abs() < 1e-6 && (p[1] - 0.9).abs() < 1e-6);
        assert_eq!(p[2..], [1.0, 1.0]);
    }

    #[test]
    fn save_and_open_preserve_8_bit_values() {
        let dir = std::env::temp_dir().join(format!("vitrine-image-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip.png");

        let img = Image::from_rgba8(2, 1, &[10, 20, 30, 255, 200, 100, 50, 128]).unwrap();
        img.save(&path).unwrap();
        assert_eq!(Image::open(&path).unwrap(), img);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = Image::open("/nonexistent/vitrine.png").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/vitrine.png"));
    }
}
