//! Raw field vector to on-screen indicator conversion.
//!
//! Field magnitudes in a physics scene span orders of magnitude, so the
//! indicator length grows with `|field|^exponent` (exponent < 1 compresses the
//! range) rather than linearly. Direction is preserved exactly.
//!
//! This module also classifies raw oracle readings, since a NaN reading has to
//! be resolved before it can be scaled.

use serde::{Deserialize, Serialize};

use crate::error::SamplerError;
use crate::geometry::{Point2, Vector2};

/// Default multiplier applied to the compressed magnitude.
pub const DEFAULT_GAIN: f64 = 15.0;
/// Default magnitude exponent.
pub const DEFAULT_EXPONENT: f64 = 0.3;
/// Default indicator drawn where the field is zero, so empty regions still
/// show a mark.
pub const DEFAULT_MINIMUM: Vector2 = Vector2 { dx: 2.0, dy: 2.0 };

/// Parameters of the magnitude compression.
///
/// `scale(raw) = normalize(raw) * gain * |raw|^exponent`, with `minimum`
/// substituted whenever that result is zero or not finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorScaling {
    pub gain: f64,
    pub exponent: f64,
    pub minimum: Vector2,
}

impl Default for IndicatorScaling {
    fn default() -> Self {
        Self {
            gain: DEFAULT_GAIN,
            exponent: DEFAULT_EXPONENT,
            minimum: DEFAULT_MINIMUM,
        }
    }
}

impl IndicatorScaling {
    /// Checks that gain and exponent are positive and finite and that the
    /// minimum indicator is a visible, finite vector.
    pub fn validate(&self) -> Result<(), SamplerError> {
        if !(self.gain.is_finite() && self.gain > 0.0) {
            return Err(SamplerError::InvalidScaling(format!(
                "gain must be positive and finite, got {}",
                self.gain
            )));
        }
        if !(self.exponent.is_finite() && self.exponent > 0.0) {
            return Err(SamplerError::InvalidScaling(format!(
                "exponent must be positive and finite, got {}",
                self.exponent
            )));
        }
        if !self.minimum.is_finite() || self.minimum.is_zero() {
            return Err(SamplerError::InvalidScaling(format!(
                "minimum indicator must be finite and non-zero, got ({}, {})",
                self.minimum.dx, self.minimum.dy
            )));
        }
        Ok(())
    }

    /// Converts a raw field vector into an indicator displacement.
    pub fn apply(&self, raw: Vector2) -> Vector2 {
        let length = self.gain * raw.magnitude().powf(self.exponent);
        let scaled = raw.normalized().scaled(length);
        if scaled.is_zero() || !scaled.is_finite() {
            self.minimum
        } else {
            scaled
        }
    }
}

/// How NaN readings from the field oracle are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NanPolicy {
    /// NaN at exactly the origin aborts the frame; NaN anywhere else reads as
    /// zero field. Matches physics backends that report NaN at the origin for
    /// one tick after a field source is added.
    #[default]
    AbortAtOrigin,
    /// Every NaN reads as zero field; frames are never aborted.
    SubstituteZero,
}

impl NanPolicy {
    /// All policy names, as accepted by [`NanPolicy::from_name`].
    pub fn list_names() -> &'static [&'static str] {
        &["abort_at_origin", "substitute_zero"]
    }

    /// Parses a snake_case policy name.
    pub fn from_name(name: &str) -> Result<Self, SamplerError> {
        match name {
            "abort_at_origin" => Ok(NanPolicy::AbortAtOrigin),
            "substitute_zero" => Ok(NanPolicy::SubstituteZero),
            other => Err(SamplerError::InvalidParams(format!(
                "unknown nan_policy '{other}', expected one of: {}",
                Self::list_names().join(", ")
            ))),
        }
    }

    /// The snake_case name of this policy.
    pub fn name(self) -> &'static str {
        match self {
            NanPolicy::AbortAtOrigin => "abort_at_origin",
            NanPolicy::SubstituteZero => "substitute_zero",
        }
    }
}

/// A raw oracle reading after NaN handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldReading {
    /// A usable field vector.
    Value(Vector2),
    /// No field here; treated as zero.
    Absent,
    /// The oracle is in a transient bad state; the whole frame should be
    /// dropped.
    Glitch,
}

impl FieldReading {
    /// The vector to scale, or `None` for a glitch.
    pub fn vector(self) -> Option<Vector2> {
        match self {
            FieldReading::Value(v) => Some(v),
            FieldReading::Absent => Some(Vector2::ZERO),
            FieldReading::Glitch => None,
        }
    }
}

/// Classifies the oracle's `raw` answer for `position` under `policy`.
pub fn classify_reading(raw: Vector2, position: Point2, policy: NanPolicy) -> FieldReading {
    if !raw.is_nan() {
        return FieldReading::Value(raw);
    }
    match policy {
        NanPolicy::AbortAtOrigin if position.is_origin() => FieldReading::Glitch,
        _ => FieldReading::Absent,
    }
}
