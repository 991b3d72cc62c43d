//! Canvas-space value types shared by the engine and the host.

use std::ops::{Add, Sub};

/// A point or offset in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from(v: (f64, f64)) -> Self {
        Vec2::new(v.0, v.1)
    }
}

/// Axis-aligned rectangle: top-left origin plus size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Vec2::new(x, y),
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.height
    }

    /// Open containment: points on the edge are outside.
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.origin.x && p.x < self.right() && p.y > self.origin.y && p.y < self.bottom()
    }

    /// Both sides strictly positive and finite.
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_containment_excludes_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains_strict(Vec2::new(15.0, 15.0)));
        assert!(!r.contains_strict(Vec2::new(10.0, 15.0)));
        assert!(!r.contains_strict(Vec2::new(15.0, 30.0)));
    }

    #[test]
    fn area_check_rejects_degenerate() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).has_area());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).has_area());
        assert!(!Rect::new(0.0, 0.0, f64::NAN, 1.0).has_area());
        assert!(!Rect::new(0.0, 0.0, 5.0, -1.0).has_area());
    }
}
