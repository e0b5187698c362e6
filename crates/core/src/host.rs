//! Interfaces the host application implements for the sampler.
//!
//! The sampler never owns any of these. A host scene typically implements
//! both [`AreaProvider`] and [`FieldOracle`] (and so [`SampledArea`]), and a
//! view implements [`LineRenderer`].

use crate::geometry::{Point2, Size, Vector2};
use crate::sampler::LineSet;

/// Answers "what is the field at this point".
///
/// Implementations may return NaN components; see
/// [`classify_reading`](crate::scaling::classify_reading) for how the sampler
/// treats them.
pub trait FieldOracle {
    /// The raw field vector at `position`, in simulation space.
    fn query(&self, position: Point2) -> Vector2;
}

/// A rectangular simulation area that can be mapped onto a view.
pub trait AreaProvider {
    /// Current size in simulation units.
    fn size(&self) -> Size;

    /// Maps a simulation-space point to view space.
    fn convert(&self, point: Point2) -> Point2;
}

/// An area that can also be queried for its field.
pub trait SampledArea: AreaProvider + FieldOracle {}

impl<T: AreaProvider + FieldOracle + ?Sized> SampledArea for T {}

/// Receives finished line sets and draws them.
pub trait LineRenderer {
    /// Replaces the lines to draw.
    fn set_lines(&mut self, lines: LineSet);

    /// Draws the current lines before the next display refresh.
    fn request_redraw(&mut self);
}

impl<T: FieldOracle + ?Sized> FieldOracle for Box<T> {
    fn query(&self, position: Point2) -> Vector2 {
        (**self).query(position)
    }
}
