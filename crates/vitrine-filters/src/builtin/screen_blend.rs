use image::Pixel;

use crate::Image;

/// Screen blend, `1 - (1 - top) * (1 - background)` on every channel
/// including alpha. Images of different extents have no output.
pub fn screen_blend(top: &Image, background: &Image) -> Option<Image> {
    if top.extent() != background.extent() {
        return None;
    }

    let mut out = top.as_buffer().clone();
    for (t, b) in out.pixels_mut().zip(background.as_buffer().pixels()) {
        *t = t.map2(b, |t, b| 1.0 - (1.0 - t) * (1.0 - b));
    }
    Image::from_buffer(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_is_neutral_and_white_saturates() {
        let bg = Image::from_fn(2, 1, |x, _| [0.3 * x as f32, 0.5, 0.7, 1.0]).unwrap();
        let black = Image::filled(2, 1, [0.0, 0.0, 0.0, 0.0]).unwrap();
        let white = Image::filled(2, 1, [1.0; 4]).unwrap();

        let same = screen_blend(&black, &bg).unwrap();
        for (p, q) in same.pixels().zip(bg.pixels()) {
            assert!(p.iter().zip(q).all(|(a, b)| (a - b).abs() < 1e-6));
        }
        assert!(screen_blend(&white, &bg)
            .unwrap()
            .pixels()
            .all(|p| p == [1.0; 4]));
    }

    #[test]
    fn blend_is_symmetric_and_brightens() {
        let a = Image::filled(1, 1, [0.5, 0.2, 0.0, 1.0]).unwrap();
        let b = Image::filled(1, 1, [0.5, 0.4, 0.0, 1.0]).unwrap();
        let ab = screen_blend(&a, &b).unwrap();
        assert_eq!(Some(ab.clone()), screen_blend(&b, &a));

        let p = ab.pixel(0, 0);
        assert!((p[0] - 0.75).abs() < 1e-6);
        assert!((p[1] - 0.52).abs() < 1e-6);
        assert_eq!(p[2], 0.0);
    }

    #[test]
    fn mismatched_extents_have_no_output() {
        let a = Image::filled(2, 2, [0.5; 4]).unwrap();
        let b = Image::filled(2, 3, [0.5; 4]).unwrap();
        assert!(screen_blend(&a, &b).is_none());
    }
}
