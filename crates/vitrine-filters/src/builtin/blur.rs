use crate::Image;

/// Radii below this leave every pixel's neighbours with weights under
/// `f32::EPSILON`, so the blur is the identity.
const MIN_SIGMA: f32 = 0.1;

/// Gaussian blur with `sigma = radius`, edges clamped, same extent as the input.
///
/// A radius under a tenth of a pixel returns the input unchanged. A radius
/// longer than the image's longest side blurs as if it were that side. A
/// negative or non-finite radius has no output.
pub fn gaussian_blur(image: &Image, radius: f32) -> Option<Image> {
    if !radius.is_finite() || radius < 0.0 {
        return None;
    }
    if radius < MIN_SIGMA {
        return Some(image.clone());
    }

    let longest = image.width().max(image.height()) as f32;
    let sigma = radius.min(longest.max(MIN_SIGMA));
    Image::from_buffer(image::imageops::blur(image.as_buffer(), sigma)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn zero_radius_is_identity() {
        let img = Image::from_fn(3, 2, |x, y| [x as f32 * 0.3, y as f32 * 0.5, 0.2, 1.0]).unwrap();
        assert_eq!(gaussian_blur(&img, 0.0), Some(img));
    }

    #[test]
    fn invalid_radius_has_no_output() {
        let img = Image::filled(2, 2, [1.0; 4]).unwrap();
        assert!(gaussian_blur(&img, -1.0).is_none());
        assert!(gaussian_blur(&img, f32::NAN).is_none());
        assert!(gaussian_blur(&img, f32::INFINITY).is_none());
    }

    #[test]
    fn sub_pixel_radius_is_identity() {
        let img = Image::from_fn(4, 4, |x, y| [x as f32 * 0.25, y as f32 * 0.25, 0.5, 1.0]).unwrap();
        assert_eq!(gaussian_blur(&img, 1e-30), Some(img.clone()));
        assert_eq!(gaussian_blur(&img, f32::MIN_POSITIVE / 2.0), Some(img));
    }

    #[test]
    fn huge_radius_is_capped_at_the_image_size() {
        let flat = Image::filled(4, 4, [0.5; 4]).unwrap();
        let out = gaussian_blur(&flat, 1e30).unwrap();
        assert!(out.pixels().all(|p| approx(p, [0.5; 4])));

        let img = Image::from_fn(4, 3, |x, _| [x as f32 / 3.0, 0.0, 0.0, 1.0]).unwrap();
        let capped = gaussian_blur(&img, 4.0).unwrap();
        assert_eq!(gaussian_blur(&img, 1e30), Some(capped.clone()));
        assert!(capped.pixels().all(|p| p[0].is_finite() && (-1e-5..=1.0 + 1e-5).contains(&p[0])));
    }

    #[test]
    fn flat_image_stays_flat() {
        let color = [0.2, 0.4, 0.6, 1.0];
        let img = Image::filled(5, 4, color).unwrap();
        let out = gaussian_blur(&img, 3.0).unwrap();
        assert_eq!(out.extent(), img.extent());
        assert!(out.pixels().all(|p| approx(p, color)));
    }

    #[test]
    fn blur_spreads_a_single_bright_pixel() {
        let img = Image::from_fn(9, 9, |x, y| {
            if (x, y) == (4, 4) { [1.0; 4] } else { [0.0; 4] }
        })
        .unwrap();
        let out = gaussian_blur(&img, 1.0).unwrap();

        let center = out.pixel(4, 4)[0];
        assert!(center < 1.0);
        assert!(out.pixel(5, 4)[0] > 0.0 && out.pixel(5, 4)[0] < center);
        assert!((out.pixel(3, 4)[0] - out.pixel(5, 4)[0]).abs() < 1e-6);
        assert!((out.pixel(4, 3)[0] - out.pixel(4, 5)[0]).abs() < 1e-6);
        let total: f32 = out.pixels().map(|p| p[0]).sum();
        assert!((total - 1.0).abs() < 1e-3);
    }
}
