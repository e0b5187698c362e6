#![deny(unsafe_code)]
//! Vector field visualization core for showfields.
//!
//! Samples a host-provided vector field on a uniform grid and turns every
//! reading into a short direction indicator line. Provides the
//! [`FieldSampler`], its [`SampleGrid`] and [`IndicatorScaling`], the host
//! interfaces ([`FieldOracle`], [`AreaProvider`], [`LineRenderer`]), a
//! [`LineBuffer`] renderer, synthetic [`ChargeField`] sources and a
//! [`StaticScene`] host.

pub mod error;
pub mod field_source;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod lines;
pub mod params;
pub mod sampler;
pub mod scaling;
pub mod scene;

pub use error::SamplerError;
pub use field_source::{ChargeField, ElectricCharge, FieldFn};
pub use geometry::{Point2, Size, Vector2};
pub use grid::SampleGrid;
pub use host::{AreaProvider, FieldOracle, LineRenderer, SampledArea};
pub use lines::{LineBuffer, PathSink, RecordingSink, Srgb, StrokeStyle, StrokedFrame};
pub use sampler::{
    FieldSampler, Indicator, LineSet, RefreshOutcome, SamplerConfig, SkipReason,
};
pub use scaling::{FieldReading, IndicatorScaling, NanPolicy};
pub use scene::{StaticScene, ViewTransform};
