/// Rectangle of whole image pixels.
///
/// The origin may be negative; an empty rectangle has a zero side.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// `width × height` at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub fn right(self) -> i64 {
        self.x as i64 + self.width as i64
    }

    #[inline]
    pub fn bottom(self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Overlap of both rectangles, `None` when they do not share a pixel.
    pub fn intersect(self, other: PixelRect) -> Option<PixelRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        if x1 <= x0 as i64 || y1 <= y0 as i64 {
            return None;
        }
        Some(PixelRect::new(
            x0,
            y0,
            (x1 - x0 as i64) as u32,
            (y1 - y0 as i64) as u32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_clips_to_bounds() {
        let image = PixelRect::from_size(100, 50);
        let wanted = PixelRect::new(-10, 40, 30, 30);
        assert_eq!(image.intersect(wanted), Some(PixelRect::new(0, 40, 20, 10)));
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        let a = PixelRect::from_size(10, 10);
        assert!(a.intersect(PixelRect::new(10, 0, 5, 5)).is_none());
        assert!(a.intersect(PixelRect::new(0, 0, 0, 5)).is_none());
    }

    #[test]
    fn area_does_not_overflow() {
        assert_eq!(PixelRect::from_size(u32::MAX, 2).area(), u32::MAX as u64 * 2);
    }
}
