//! Axis-aligned rectangle geometry for the basket and falling objects
//!
//! Screen convention: origin at the top-left, Y grows downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// True if the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Move by the given offset
    #[inline]
    pub fn translate(&mut self, delta: IVec2) {
        self.pos += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(350, 550, 100, 30);
        assert_eq!(r.left(), 350);
        assert_eq!(r.right(), 450);
        assert_eq!(r.top(), 550);
        assert_eq!(r.bottom(), 580);
    }

    #[test]
    fn test_rect_overlap() {
        let basket = Rect::new(350, 550, 100, 30);
        assert!(basket.intersects(&Rect::new(340, 540, 20, 20)));
        assert!(basket.intersects(&Rect::new(400, 560, 5, 5))); // fully inside
        assert!(Rect::new(400, 560, 5, 5).intersects(&basket));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let basket = Rect::new(350, 550, 100, 30);
        // Sitting exactly on top of the basket
        assert!(!basket.intersects(&Rect::new(380, 520, 30, 30)));
        // Flush against the right edge
        assert!(!basket.intersects(&Rect::new(450, 555, 20, 20)));
    }

    #[test]
    fn test_rect_empty_never_intersects() {
        let basket = Rect::new(0, 0, 100, 100);
        assert!(!basket.intersects(&Rect::new(10, 10, 0, 10)));
        assert!(!Rect::new(10, 10, 10, -5).intersects(&basket));
    }

    #[test]
    fn test_rect_translate() {
        let mut r = Rect::new(50, -30, 30, 30);
        r.translate(IVec2::new(0, 5));
        assert_eq!(r.top(), -25);
        assert_eq!(r.left(), 50);
    }
}
