//! Plain 2D value types: [`Vector2`], [`Point2`] and [`Size`].
//!
//! Arithmetic is delegated to `glam::DVec2`; these wrappers exist so the
//! public API names its components the way a drawing surface does
//! (`dx`/`dy` for displacements, `x`/`y` for positions) and so they can be
//! serialized.

use std::ops::{Add, Mul};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A 2D displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2 {
    /// The zero displacement.
    pub const ZERO: Vector2 = Vector2 { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Unit vector in the same direction, or [`Vector2::ZERO`] when the
    /// length is zero.
    pub fn normalized(self) -> Vector2 {
        // Dividing by the larger component first keeps tiny and huge vectors
        // from underflowing or overflowing inside `length`.
        let largest = self.dx.abs().max(self.dy.abs());
        if largest == 0.0 || !largest.is_finite() {
            return DVec2::from(self).normalize_or_zero().into();
        }
        (DVec2::from(self) / largest).normalize_or_zero().into()
    }

    /// Multiplies both components by `factor`.
    pub fn scaled(self, factor: f64) -> Vector2 {
        (DVec2::from(self) * factor).into()
    }

    /// Component-wise sum.
    pub fn sum(self, other: Vector2) -> Vector2 {
        (DVec2::from(self) + DVec2::from(other)).into()
    }

    /// True when either component is NaN.
    pub fn is_nan(self) -> bool {
        self.dx.is_nan() || self.dy.is_nan()
    }

    /// True when both components are finite.
    pub fn is_finite(self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    /// True when both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        self.sum(rhs)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        self.scaled(rhs)
    }
}

impl From<DVec2> for Vector2 {
    fn from(v: DVec2) -> Self {
        Self { dx: v.x, dy: v.y }
    }
}

impl From<Vector2> for DVec2 {
    fn from(v: Vector2) -> Self {
        DVec2::new(v.dx, v.dy)
    }
}

impl From<Point2> for Vector2 {
    /// The displacement from the origin to `p`.
    fn from(p: Point2) -> Self {
        Self { dx: p.x, dy: p.y }
    }
}

/// A 2D position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// The canonical zero position.
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point reached by moving from `self` along `v`.
    pub fn offset_by(self, v: Vector2) -> Point2 {
        (DVec2::from(self) + DVec2::from(v)).into()
    }

    /// The displacement from `self` to `other`.
    pub fn displacement_to(self, other: Point2) -> Vector2 {
        (DVec2::from(other) - DVec2::from(self)).into()
    }

    /// True only for exactly `(0, 0)`; `-0.0` compares equal to `0.0`.
    pub fn is_origin(self) -> bool {
        self == Point2::ORIGIN
    }
}

impl From<Vector2> for Point2 {
    /// The point reached by moving from the origin along `v`.
    fn from(v: Vector2) -> Self {
        Self { x: v.dx, y: v.dy }
    }
}

impl From<DVec2> for Point2 {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point2> for DVec2 {
    fn from(p: Point2) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// Width and height of a rectangular area, in simulation units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both sides are positive and finite.
    pub fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn magnitude_of_three_four_is_five() {
        assert!((Vector2::new(3.0, 4.0).magnitude() - 5.0).abs() < EPS);
    }

    #[test]
    fn normalized_has_unit_length() {
        let n = Vector2::new(3.0, 4.0).normalized();
        assert!((n.dx - 0.6).abs() < EPS);
        assert!((n.dy - 0.8).abs() < EPS);
        assert!((n.magnitude() - 1.0).abs() < EPS);
    }

    #[test]
    fn tiny_and_huge_vectors_keep_their_direction() {
        for v in [Vector2::new(1e-170, -1e-170), Vector2::new(1e300, -1e300)] {
            let n = v.normalized();
            assert!((n.dx - std::f64::consts::FRAC_1_SQRT_2).abs() < EPS, "{v:?} -> {n:?}");
            assert!((n.dy + std::f64::consts::FRAC_1_SQRT_2).abs() < EPS, "{v:?} -> {n:?}");
            assert!(v.magnitude() > 0.0 && v.magnitude().is_finite());
        }
    }

    #[test]
    fn normalized_zero_is_zero() {
        let n = Vector2::ZERO.normalized();
        assert_eq!(n, Vector2::ZERO);
        assert!(!n.is_nan());
    }

    #[test]
    fn scaled_and_mul_agree() {
        let v = Vector2::new(1.5, -2.0);
        assert_eq!(v.scaled(3.0), v * 3.0);
        assert_eq!(v * 3.0, Vector2::new(4.5, -6.0));
    }

    #[test]
    fn sum_and_add_agree() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(-4.0, 0.5);
        assert_eq!(a.sum(b), a + b);
        assert_eq!(a + b, Vector2::new(-3.0, 2.5));
    }

    #[test]
    fn is_nan_checks_either_component() {
        assert!(Vector2::new(f64::NAN, 0.0).is_nan());
        assert!(Vector2::new(0.0, f64::NAN).is_nan());
        assert!(!Vector2::new(f64::INFINITY, 0.0).is_nan());
    }

    #[test]
    fn is_finite_rejects_infinity_and_nan() {
        assert!(Vector2::new(1.0, 2.0).is_finite());
        assert!(!Vector2::new(f64::INFINITY, 0.0).is_finite());
        assert!(!Vector2::new(0.0, f64::NAN).is_finite());
    }

    #[test]
    fn point_offset_by_vector() {
        let p = Point2::new(50.0, 100.0).offset_by(Vector2::new(2.0, 2.0));
        assert_eq!(p, Point2::new(52.0, 102.0));
    }

    #[test]
    fn displacement_to_inverts_offset_by() {
        let a = Point2::new(1.0, 1.0);
        let b = Point2::new(4.0, 5.0);
        assert_eq!(a.displacement_to(b), Vector2::new(3.0, 4.0));
        assert_eq!(a.offset_by(a.displacement_to(b)), b);
    }

    #[test]
    fn point_vector_conversion_is_displacement_from_origin() {
        let p = Point2::new(7.0, -3.0);
        let v = Vector2::from(p);
        assert_eq!(v, Vector2::new(7.0, -3.0));
        assert_eq!(Point2::from(v), p);
        assert_eq!(Point2::ORIGIN.offset_by(v), p);
    }

    #[test]
    fn origin_detection_accepts_negative_zero() {
        assert!(Point2::ORIGIN.is_origin());
        assert!(Point2::new(-0.0, 0.0).is_origin());
        assert!(!Point2::new(0.0, 1e-300).is_origin());
    }

    #[test]
    fn size_drawable_requires_positive_finite_sides() {
        assert!(Size::new(200.0, 100.0).is_drawable());
        assert!(!Size::new(0.0, 100.0).is_drawable());
        assert!(!Size::new(200.0, 0.0).is_drawable());
        assert!(!Size::new(-1.0, 100.0).is_drawable());
        assert!(!Size::new(f64::INFINITY, 100.0).is_drawable());
        assert!(!Size::new(200.0, f64::NAN).is_drawable());
    }

    #[test]
    fn vector_serializes_with_dx_dy_names() {
        let json = serde_json::to_value(Vector2::new(1.0, 2.0)).unwrap();
        assert_eq!(json["dx"], 1.0);
        assert_eq!(json["dy"], 2.0);
    }
}
