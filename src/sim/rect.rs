//! Axis-aligned rectangles in screen space (y grows downward)

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of the given size centered on (cx, cy)
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// True if the rectangle has no area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered() {
        let r = Rect::centered(100.0, 50.0, 20.0, 10.0);
        assert_eq!(r, Rect::new(90.0, 45.0, 110.0, 55.0));
        assert_eq!(r.width(), 20.0);
        assert_eq!(r.height(), 10.0);
        assert_eq!(r.center_x(), 100.0);
    }

    #[test]
    fn test_edge_touching_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 20.0)));
        assert!(!a.overlaps(&Rect::new(-10.0, -10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_one_pixel_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(9.0, 0.0, 20.0, 10.0)));
        assert!(a.overlaps(&Rect::new(0.0, 9.0, 10.0, 20.0)));
        assert!(a.overlaps(&Rect::new(2.0, 2.0, 3.0, 3.0)));
    }

    #[test]
    fn test_degenerate_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let empty = Rect::new(5.0, 5.0, 5.0, 5.0);
        assert!(a.overlaps(&empty));
        assert!(empty.is_empty());
        let line = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&line));
        assert!(line.is_empty());
        assert!(!a.is_empty());
    }
}
