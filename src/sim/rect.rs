//! Axis-aligned rectangle geometry for the craft and letter tokens
//!
//! Screen space: origin at top-left, x grows right, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { min: pos, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test: rectangles that only share an edge do not touch
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let below = Rect::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(80.0, 40.0));
        let inner = Rect::new(Vec2::new(20.0, 5.0), Vec2::new(30.0, 30.0));
        assert!(outer.overlaps(&inner));
        assert_eq!(inner.center(), Vec2::new(35.0, 20.0));
    }
}
