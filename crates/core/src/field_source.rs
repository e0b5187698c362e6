//! Synthetic field oracles.
//!
//! These stand in for a physics engine's field query: a [`ChargeField`] sums
//! inverse-power point charges over a uniform background, and [`FieldFn`]
//! turns any closure into a [`FieldOracle`]. Both are deterministic.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point2, Vector2};
use crate::host::FieldOracle;

/// Distances below this are treated as zero.
const SINGULARITY_EPS: f64 = 1e-10;

/// Default charge strength.
pub const DEFAULT_STRENGTH: f64 = 3.0;
/// Default distance falloff exponent (inverse square).
pub const DEFAULT_FALLOFF: f64 = 2.0;

fn default_strength() -> f64 {
    DEFAULT_STRENGTH
}

fn default_falloff() -> f64 {
    DEFAULT_FALLOFF
}

/// Wraps a closure `Fn(Point2) -> Vector2` as a [`FieldOracle`].
pub struct FieldFn<F>(pub F);

impl<F: Fn(Point2) -> Vector2> FieldOracle for FieldFn<F> {
    fn query(&self, position: Point2) -> Vector2 {
        (self.0)(position)
    }
}

/// A point charge. Positive strength pushes away from `position`.
///
/// Field magnitude at distance `d` is `strength / d^falloff`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricCharge {
    pub position: Point2,
    #[serde(default = "default_strength")]
    pub strength: f64,
    #[serde(default = "default_falloff")]
    pub falloff: f64,
}

impl ElectricCharge {
    /// A charge with the default strength and falloff.
    pub fn at(position: Point2) -> Self {
        Self {
            position,
            strength: DEFAULT_STRENGTH,
            falloff: DEFAULT_FALLOFF,
        }
    }

    /// Field contribution at `point`; zero at the charge itself.
    pub fn field_at(&self, point: Point2) -> Vector2 {
        let offset = self.position.displacement_to(point);
        let dist = offset.magnitude();
        if dist < SINGULARITY_EPS {
            return Vector2::ZERO;
        }
        offset
            .normalized()
            .scaled(self.strength / dist.powf(self.falloff))
    }
}

/// Sum of point charges over a uniform background field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeField {
    #[serde(default)]
    pub charges: Vec<ElectricCharge>,
    #[serde(default)]
    pub uniform: Vector2,
}

impl ChargeField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a charge (builder pattern).
    pub fn with_charge(mut self, charge: ElectricCharge) -> Self {
        self.charges.push(charge);
        self
    }

    /// Sets the uniform background (builder pattern).
    pub fn with_uniform(mut self, uniform: Vector2) -> Self {
        self.uniform = uniform;
        self
    }
}

impl FieldOracle for ChargeField {
    fn query(&self, position: Point2) -> Vector2 {
        self.charges
            .iter()
            .fold(self.uniform, |acc, charge| acc + charge.field_at(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positive_charge_points_away() {
        let charge = ElectricCharge::at(Point2::new(5.0, 5.0));
        let v = charge.field_at(Point2::new(0.0, 0.0));
        assert!(v.dx < 0.0, "dx should point away from charge, got {}", v.dx);
        assert!(v.dy < 0.0, "dy should point away from charge, got {}", v.dy);
    }

    #[test]
    fn negative_charge_points_toward() {
        let charge = ElectricCharge {
            strength: -3.0,
            ..ElectricCharge::at(Point2::new(5.0, 0.0))
        };
        let v = charge.field_at(Point2::ORIGIN);
        assert!(v.dx > 0.0, "dx should point toward charge, got {}", v.dx);
    }

    #[test]
    fn field_at_charge_is_zero() {
        let charge = ElectricCharge::at(Point2::new(3.0, 3.0));
        assert_eq!(charge.field_at(Point2::new(3.0, 3.0)), Vector2::ZERO);
    }

    #[test]
    fn inverse_square_falloff() {
        let charge = ElectricCharge::at(Point2::ORIGIN);
        let near = charge.field_at(Point2::new(1.0, 0.0)).magnitude();
        let far = charge.field_at(Point2::new(2.0, 0.0)).magnitude();
        assert!((near - 3.0).abs() < 1e-12, "near = {near}");
        let ratio = near / far;
        assert!((ratio - 4.0).abs() < 1e-9, "expected 4x ratio, got {ratio}");
    }

    #[test]
    fn like_charges_cancel_at_midpoint() {
        let field = ChargeField::new()
            .with_charge(ElectricCharge::at(Point2::new(-1.0, 0.0)))
            .with_charge(ElectricCharge::at(Point2::new(1.0, 0.0)));
        let v = field.query(Point2::ORIGIN);
        assert!(v.magnitude() < 1e-12, "got {v:?}");
    }

    #[test]
    fn uniform_background_is_added() {
        let field = ChargeField::new().with_uniform(Vector2::new(0.0, -9.8));
        assert_eq!(field.query(Point2::new(10.0, 10.0)), Vector2::new(0.0, -9.8));
    }

    #[test]
    fn empty_field_is_zero_everywhere() {
        let field = ChargeField::new();
        assert_eq!(field.query(Point2::new(123.0, -4.0)), Vector2::ZERO);
    }

    #[test]
    fn field_fn_delegates_to_closure() {
        let oracle = FieldFn(|p: Point2| Vector2::new(p.y, -p.x));
        assert_eq!(oracle.query(Point2::new(1.0, 2.0)), Vector2::new(2.0, -1.0));
    }

    #[test]
    fn charge_deserializes_with_defaults() {
        let charge: ElectricCharge =
            serde_json::from_value(json!({"position": {"x": 10.0, "y": 20.0}})).unwrap();
        assert_eq!(charge, ElectricCharge::at(Point2::new(10.0, 20.0)));
    }

    #[test]
    fn charge_field_deserializes_from_json() {
        let field: ChargeField = serde_json::from_value(json!({
            "charges": [
                {"position": {"x": 0.0, "y": 0.0}, "strength": 1.0, "falloff": 1.0}
            ],
            "uniform": {"dx": 1.0, "dy": 0.0}
        }))
        .unwrap();
        assert_eq!(field.charges.len(), 1);
        let v = field.query(Point2::new(2.0, 0.0));
        assert!((v.dx - 1.5).abs() < 1e-12, "got {v:?}");
    }
}
