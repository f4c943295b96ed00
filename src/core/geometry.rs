//! Canvas geometry utilities
//!
//! Node positions live in canvas units (the same units the width
//! estimates in `layout` produce). Y grows downwards.

use std::fmt;
use std::ops::{Add, Sub};

/// A point or offset on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Vec2) -> f32 {
        let d = self - other;
        (d.x * d.x + d.y * d.y).sqrt()
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

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(10.0, 20.0);
        let b = Vec2::new(-180.0, 100.0);
        assert_eq!(a + b, Vec2::new(-170.0, 120.0));
        assert_eq!(a - a, Vec2::ZERO);
    }

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f32::EPSILON);
    }
}
