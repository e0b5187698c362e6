//! Error types for the showfields core.

use thiserror::Error;

/// Errors produced while configuring a sampler or binding it to an area.
///
/// Refreshing never fails with one of these; a refresh that cannot run is
/// reported as a [`SkipReason`](crate::sampler::SkipReason) instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    /// The sampled area had a zero, negative or non-finite width or height.
    #[error("invalid area dimensions ({width} x {height}): width and height must be positive and finite")]
    InvalidDimensions { width: f64, height: f64 },

    /// The vertical sample count was zero.
    #[error("invalid vertical sample count {0}: must be at least 1")]
    InvalidSampleCount(usize),

    /// The indicator scaling parameters would break monotonicity or produce
    /// invisible indicators.
    #[error("invalid indicator scaling: {0}")]
    InvalidScaling(String),

    /// A JSON parameter object could not be interpreted.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// A stroke color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}
