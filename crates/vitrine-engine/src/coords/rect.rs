use super::Vec2;

/// Axis-aligned rectangle in window pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Largest rectangle with the aspect ratio of `content` that fits inside
    /// `self`, centered. Empty when either side is degenerate.
    pub fn aspect_fit(self, content: Vec2) -> Rect {
        if self.is_empty() || content.x <= 0.0 || content.y <= 0.0 {
            return Rect::from_origin_size(self.origin, Vec2::zero());
        }

        let scale = (self.size.x / content.x).min(self.size.y / content.y);
        let size = content * scale;
        let origin = self.origin + (self.size - size) * 0.5;
        Rect::from_origin_size(origin, size)
    }

    /// Splits `self` into `n` equal columns, left to right.
    pub fn columns(self, n: usize) -> Vec<Rect> {
        if n == 0 {
            return Vec::new();
        }
        let w = self.size.x / n as f32;
        (0..n)
            .map(|i| Rect::new(self.origin.x + w * i as f32, self.origin.y, w, self.size.y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── aspect_fit ────────────────────────────────────────────────────────

    #[test]
    fn wide_content_is_letterboxed() {
        let fit = r(0.0, 0.0, 400.0, 400.0).aspect_fit(Vec2::new(200.0, 100.0));
        assert_eq!(fit, r(0.0, 100.0, 400.0, 200.0));
    }

    #[test]
    fn tall_content_is_pillarboxed() {
        let fit = r(100.0, 0.0, 400.0, 200.0).aspect_fit(Vec2::new(50.0, 100.0));
        assert_eq!(fit, r(250.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn degenerate_content_fits_to_nothing() {
        assert!(r(0.0, 0.0, 10.0, 10.0).aspect_fit(Vec2::new(0.0, 5.0)).is_empty());
    }

    // ── columns ───────────────────────────────────────────────────────────

    #[test]
    fn columns_split_width_evenly() {
        let cols = r(0.0, 10.0, 800.0, 600.0).columns(2);
        assert_eq!(cols, vec![r(0.0, 10.0, 400.0, 600.0), r(400.0, 10.0, 400.0, 600.0)]);
        assert!(r(0.0, 0.0, 1.0, 1.0).columns(0).is_empty());
    }
}
