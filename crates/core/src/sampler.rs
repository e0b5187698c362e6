//! The field sampler: turns a queryable field into a grid of indicator lines.
//!
//! A [`FieldSampler`] is bound to a host area (see [`SampledArea`]) and a
//! [`LineRenderer`], both held weakly. On every tick the host calls
//! [`FieldSampler::refresh`], which samples the field at each grid position,
//! scales each reading into an [`Indicator`] and hands the complete
//! [`LineSet`] to the renderer. A frame is either delivered whole or not at
//! all.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::error::SamplerError;
use crate::geometry::{Point2, Size, Vector2};
use crate::grid::SampleGrid;
use crate::host::{LineRenderer, SampledArea};
use crate::params::{param_f64, param_string, param_usize};
use crate::scaling::{
    classify_reading, IndicatorScaling, NanPolicy, DEFAULT_EXPONENT, DEFAULT_GAIN,
    DEFAULT_MINIMUM,
};

/// Default number of indicators along the area's height.
pub const DEFAULT_VERTICAL_SAMPLE_COUNT: usize = 36;

/// One drawn segment, in view space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub start: Point2,
    pub end: Point2,
}

impl Indicator {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }
}

/// All indicators of one sampling pass, in row-major grid order.
pub type LineSet = Vec<Indicator>;

/// Sampler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Number of indicators along the area's height. Column count and
    /// spacing are derived from it.
    pub vertical_sample_count: usize,
    pub scaling: IndicatorScaling,
    pub nan_policy: NanPolicy,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            vertical_sample_count: DEFAULT_VERTICAL_SAMPLE_COUNT,
            scaling: IndicatorScaling::default(),
            nan_policy: NanPolicy::default(),
        }
    }
}

impl SamplerConfig {
    /// Reads a configuration from a flat JSON object, falling back to the
    /// default for every missing or wrongly typed key, then validates it.
    pub fn from_json(params: &Value) -> Result<Self, SamplerError> {
        let config = Self {
            vertical_sample_count: param_usize(
                params,
                "vertical_sample_count",
                DEFAULT_VERTICAL_SAMPLE_COUNT,
            ),
            scaling: IndicatorScaling {
                gain: param_f64(params, "gain", DEFAULT_GAIN),
                exponent: param_f64(params, "exponent", DEFAULT_EXPONENT),
                minimum: Vector2::new(
                    param_f64(params, "minimum_dx", DEFAULT_MINIMUM.dx),
                    param_f64(params, "minimum_dy", DEFAULT_MINIMUM.dy),
                ),
            },
            nan_policy: NanPolicy::from_name(&param_string(
                params,
                "nan_policy",
                NanPolicy::default().name(),
            ))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects a zero vertical count and invalid scaling.
    pub fn validate(&self) -> Result<(), SamplerError> {
        if self.vertical_sample_count == 0 {
            return Err(SamplerError::InvalidSampleCount(self.vertical_sample_count));
        }
        self.scaling.validate()
    }

    /// Current values as the flat JSON object [`SamplerConfig::from_json`] reads.
    pub fn to_json(&self) -> Value {
        json!({
            "vertical_sample_count": self.vertical_sample_count,
            "gain": self.scaling.gain,
            "exponent": self.scaling.exponent,
            "minimum_dx": self.scaling.minimum.dx,
            "minimum_dy": self.scaling.minimum.dy,
            "nan_policy": self.nan_policy.name(),
        })
    }

    /// Schema describing every key, its type, default and valid range.
    pub fn schema() -> Value {
        json!({
            "vertical_sample_count": {
                "type": "integer",
                "default": DEFAULT_VERTICAL_SAMPLE_COUNT,
                "min": 1,
                "description": "Indicators along the area height; columns and spacing are derived"
            },
            "gain": {
                "type": "number",
                "default": DEFAULT_GAIN,
                "exclusive_min": 0.0,
                "description": "Indicator length for a unit-magnitude field"
            },
            "exponent": {
                "type": "number",
                "default": DEFAULT_EXPONENT,
                "exclusive_min": 0.0,
                "description": "Magnitude exponent; below 1 compresses the dynamic range"
            },
            "minimum_dx": {
                "type": "number",
                "default": DEFAULT_MINIMUM.dx,
                "description": "x component of the indicator drawn where the field is zero"
            },
            "minimum_dy": {
                "type": "number",
                "default": DEFAULT_MINIMUM.dy,
                "description": "y component of the indicator drawn where the field is zero"
            },
            "nan_policy": {
                "type": "string",
                "default": NanPolicy::default().name(),
                "options": NanPolicy::list_names(),
                "description": "How NaN field readings are handled"
            }
        })
    }
}

/// Why a refresh produced no frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// No area was ever bound, or it was unbound.
    Unbound,
    /// The bound area has been dropped by the host.
    AreaReleased,
    /// No renderer is attached, or it has been dropped.
    RendererMissing,
    /// The renderer is currently borrowed elsewhere.
    RendererBusy,
    /// The area's current size cannot be sampled.
    InvalidArea,
    /// The field oracle glitched at `position`; the frame was discarded.
    OracleGlitch { position: Point2 },
}

/// Result of one [`FieldSampler::refresh`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefreshOutcome {
    /// A full frame of `indicators` lines was handed to the renderer.
    Rendered { indicators: usize },
    /// The renderer was left untouched.
    Skipped(SkipReason),
}

impl RefreshOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RefreshOutcome::Rendered { .. })
    }
}

/// Samples `area` at every position of `grid`.
///
/// Returns the indicators in row-major order, or `Err(position)` with the
/// first position where the oracle glitched. Partial results are dropped on
/// a glitch.
pub fn sample_grid<A: SampledArea + ?Sized>(
    grid: &SampleGrid,
    area: &A,
    config: &SamplerConfig,
) -> Result<LineSet, Point2> {
    grid.positions()
        .map(|position| {
            let raw = area.query(position);
            let field = classify_reading(raw, position, config.nan_policy)
                .vector()
                .ok_or(position)?;
            let indicator = config.scaling.apply(field);
            Ok(Indicator::new(
                area.convert(position),
                area.convert(position.offset_by(indicator)),
            ))
        })
        .collect()
}

/// Grid sampler bound to a host area and renderer.
///
/// Holds only weak references: the host owns the area and the renderer, and
/// either may disappear at any time, which turns [`refresh`](Self::refresh)
/// into a logged no-op.
pub struct FieldSampler {
    config: SamplerConfig,
    area: Option<Weak<dyn SampledArea>>,
    renderer: Option<Weak<RefCell<dyn LineRenderer>>>,
    grid: Option<SampleGrid>,
}

impl FieldSampler {
    /// Creates an unbound sampler with no renderer.
    ///
    /// Returns an error if `config` fails [`SamplerConfig::validate`].
    pub fn new(config: SamplerConfig) -> Result<Self, SamplerError> {
        config.validate()?;
        Ok(Self {
            config,
            area: None,
            renderer: None,
            grid: None,
        })
    }

    /// Builds a sampler from JSON params; see [`SamplerConfig::from_json`].
    pub fn from_json(params: &Value) -> Result<Self, SamplerError> {
        Self::new(SamplerConfig::from_json(params)?)
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// The grid derived for the bound area, if any.
    pub fn grid(&self) -> Option<&SampleGrid> {
        self.grid.as_ref()
    }

    /// True while a bound area is still alive.
    pub fn is_bound(&self) -> bool {
        self.area
            .as_ref()
            .is_some_and(|area| area.strong_count() > 0)
    }

    /// Binds the sampler to `area` and derives its grid.
    ///
    /// Any previous binding is dropped first, so a failed bind leaves the
    /// sampler unbound. Returns `SamplerError::InvalidDimensions` if the
    /// area's size cannot be sampled.
    pub fn bind<A: SampledArea + 'static>(
        &mut self,
        area: &Rc<A>,
    ) -> Result<&SampleGrid, SamplerError> {
        let weak: Weak<A> = Rc::downgrade(area);
        self.bind_weak(weak, area.size())
    }

    /// Like [`bind`](Self::bind) for an already type-erased area.
    pub fn bind_dyn(&mut self, area: &Rc<dyn SampledArea>) -> Result<&SampleGrid, SamplerError> {
        self.bind_weak(Rc::downgrade(area), area.size())
    }

    fn bind_weak(
        &mut self,
        area: Weak<dyn SampledArea>,
        size: Size,
    ) -> Result<&SampleGrid, SamplerError> {
        self.unbind();
        let grid = SampleGrid::new(size, self.config.vertical_sample_count)?;
        self.area = Some(area);
        Ok(self.grid.insert(grid))
    }

    /// Forgets the bound area and its grid.
    pub fn unbind(&mut self) {
        self.area = None;
        self.grid = None;
    }

    /// Sets the renderer that receives finished frames.
    pub fn attach_renderer<R: LineRenderer + 'static>(&mut self, renderer: &Rc<RefCell<R>>) {
        let weak: Weak<RefCell<R>> = Rc::downgrade(renderer);
        let weak: Weak<RefCell<dyn LineRenderer>> = weak;
        self.renderer = Some(weak);
    }

    /// Builder form of [`attach_renderer`](Self::attach_renderer).
    pub fn with_renderer<R: LineRenderer + 'static>(mut self, renderer: &Rc<RefCell<R>>) -> Self {
        self.attach_renderer(renderer);
        self
    }

    pub fn detach_renderer(&mut self) {
        self.renderer = None;
    }

    /// Runs one sampling pass and, if it completes, delivers the frame.
    ///
    /// The renderer's lines are replaced and a redraw requested only when every
    /// grid position was sampled. Every skip is logged and returned; none is
    /// an error.
    pub fn refresh(&mut self) -> RefreshOutcome {
        let area = match self.area.as_ref().map(Weak::upgrade) {
            None => {
                warn!("no area bound, nothing to sample");
                return RefreshOutcome::Skipped(SkipReason::Unbound);
            }
            Some(None) => {
                warn!("bound area was released, nothing to sample");
                self.unbind();
                return RefreshOutcome::Skipped(SkipReason::AreaReleased);
            }
            Some(Some(area)) => area,
        };
        let Some(renderer) = self.renderer.as_ref().and_then(Weak::upgrade) else {
            warn!("no renderer attached, not sampling");
            return RefreshOutcome::Skipped(SkipReason::RendererMissing);
        };

        let grid = match self.current_grid(area.size()) {
            Ok(grid) => grid,
            Err(err) => {
                error!(%err, "area cannot be sampled");
                return RefreshOutcome::Skipped(SkipReason::InvalidArea);
            }
        };

        let lines = match sample_grid(&grid, area.as_ref(), &self.config) {
            Ok(lines) => lines,
            Err(position) => {
                debug!(x = position.x, y = position.y, "field oracle glitch, not updating indicators this frame");
                return RefreshOutcome::Skipped(SkipReason::OracleGlitch { position });
            }
        };

        let Ok(mut renderer) = renderer.try_borrow_mut() else {
            warn!("renderer is busy, dropping frame");
            return RefreshOutcome::Skipped(SkipReason::RendererBusy);
        };
        let indicators = lines.len();
        renderer.set_lines(lines);
        renderer.request_redraw();
        RefreshOutcome::Rendered { indicators }
    }

    /// Returns the grid for `size`, re-deriving it if the area was resized
    /// since the last pass.
    fn current_grid(&mut self, size: Size) -> Result<SampleGrid, SamplerError> {
        match self.grid {
            Some(grid) if grid.area() == size => Ok(grid),
            _ => {
                self.grid = None;
                let grid = SampleGrid::new(size, self.config.vertical_sample_count)?;
                debug!(
                    rows = grid.vertical_count(),
                    columns = grid.horizontal_count(),
                    spacing = grid.spacing(),
                    "sample grid derived"
                );
                Ok(*self.grid.insert(grid))
            }
        }
    }

    /// Current parameter values as a JSON object.
    pub fn params(&self) -> Value {
        self.config.to_json()
    }

    /// Schema describing all available parameters.
    pub fn param_schema(&self) -> Value {
        SamplerConfig::schema()
    }
}
