//! Axis-aligned bounding boxes in screen space
//!
//! A rect is defined by:
//! - x, y: top-left corner (y grows downward)
//! - w, h: extent along each axis

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect of the given size centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap test. Rects sharing only an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True when the rect lies entirely past any edge of the play field
    pub fn is_off_screen(&self) -> bool {
        self.top() > SCREEN_HEIGHT
            || self.bottom() < 0.0
            || self.left() > SCREEN_WIDTH
            || self.right() < 0.0
    }

    /// Axis-aligned bounds of a `size` box rotated by `angle` radians about its center
    pub fn rotated_bounds(center: Vec2, size: Vec2, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let w = size.x * cos.abs() + size.y * sin.abs();
        let h = size.x * sin.abs() + size.y * cos.abs();
        Self::from_center(center, Vec2::new(w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 5.0, 10.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 15.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 30.0);
        assert_eq!(r.center(), Vec2::new(12.5, 25.0));
    }

    #[test]
    fn test_intersects_overlap_and_touch() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges only
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Containment
        assert!(a.intersects(&Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_intersects_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.5, -3.0, 4.0, 4.0);
        assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn test_off_screen() {
        assert!(!Rect::new(0.0, 0.0, 10.0, 10.0).is_off_screen());
        assert!(Rect::new(0.0, 601.0, 10.0, 10.0).is_off_screen());
        assert!(Rect::new(0.0, -11.0, 10.0, 10.0).is_off_screen());
        assert!(Rect::new(801.0, 0.0, 10.0, 10.0).is_off_screen());
        assert!(Rect::new(-11.0, 0.0, 10.0, 10.0).is_off_screen());
        // Partially visible is still on screen
        assert!(!Rect::new(-5.0, 0.0, 10.0, 10.0).is_off_screen());
    }

    #[test]
    fn test_rotated_bounds() {
        let c = Vec2::new(100.0, 100.0);
        let r = Rect::rotated_bounds(c, Vec2::new(50.0, 50.0), 0.0);
        assert!((r.w - 50.0).abs() < 1e-4);

        let r = Rect::rotated_bounds(c, Vec2::new(50.0, 50.0), FRAC_PI_4);
        let diag = 50.0 * std::f32::consts::SQRT_2;
        assert!((r.w - diag).abs() < 1e-3);
        assert!((r.h - diag).abs() < 1e-3);
        assert!((r.center() - c).length() < 1e-4);
    }
}
