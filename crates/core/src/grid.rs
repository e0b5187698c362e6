//! The uniform lattice of positions at which a field is sampled.
//!
//! A [`SampleGrid`] is derived from an area's [`Size`] and a vertical sample
//! count. Spacing is the same in both directions, so the horizontal count
//! follows from the area's aspect ratio.

use crate::error::SamplerError;
use crate::geometry::{Point2, Size};

/// Upper bound on `vertical_count * horizontal_count` for a single grid.
pub const MAX_SAMPLE_COUNT: usize = 1 << 24;

/// Grid shape derived from an area size and a vertical sample count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    area: Size,
    vertical_count: usize,
    horizontal_count: usize,
    spacing: f64,
}

impl SampleGrid {
    /// Derives the grid for `area`.
    ///
    /// `spacing = height / vertical_count` and `horizontal_count =
    /// ceil(width / spacing)`, the smallest column count whose coverage
    /// reaches the full width.
    ///
    /// Returns `SamplerError::InvalidSampleCount` when `vertical_count` is
    /// zero and `SamplerError::InvalidDimensions` when either side of the
    /// area is not positive and finite, or when the grid would hold more than
    /// [`MAX_SAMPLE_COUNT`] positions.
    pub fn new(area: Size, vertical_count: usize) -> Result<Self, SamplerError> {
        if vertical_count == 0 {
            return Err(SamplerError::InvalidSampleCount(vertical_count));
        }
        if !area.is_drawable() {
            return Err(SamplerError::InvalidDimensions {
                width: area.width,
                height: area.height,
            });
        }
        let spacing = area.height / vertical_count as f64;
        let columns = (area.width / spacing).ceil().max(1.0);
        let invalid = SamplerError::InvalidDimensions {
            width: area.width,
            height: area.height,
        };
        if !spacing.is_finite()
            || spacing <= 0.0
            || !columns.is_finite()
            || columns > MAX_SAMPLE_COUNT as f64
        {
            return Err(invalid);
        }
        let horizontal_count = columns as usize;
        match vertical_count.checked_mul(horizontal_count) {
            Some(total) if total <= MAX_SAMPLE_COUNT => Ok(Self {
                area,
                vertical_count,
                horizontal_count,
                spacing,
            }),
            _ => Err(invalid),
        }
    }

    /// The area size this grid was derived from.
    pub fn area(&self) -> Size {
        self.area
    }

    /// Number of rows.
    pub fn vertical_count(&self) -> usize {
        self.vertical_count
    }

    /// Number of columns.
    pub fn horizontal_count(&self) -> usize {
        self.horizontal_count
    }

    /// Distance between neighbouring samples, in both directions.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Total number of positions, `vertical_count * horizontal_count`. Never
    /// exceeds [`MAX_SAMPLE_COUNT`].
    pub fn sample_count(&self) -> usize {
        self.vertical_count * self.horizontal_count
    }

    /// Position of the sample in column `column` of row `row`.
    pub fn position(&self, column: usize, row: usize) -> Point2 {
        Point2::new(column as f64 * self.spacing, row as f64 * self.spacing)
    }

    /// Iterates over every sample position in row-major order: all columns of
    /// row 0, then row 1, and so on.
    pub fn positions(&self) -> impl Iterator<Item = Point2> + '_ {
        (0..self.vertical_count).flat_map(move |row| {
            (0..self.horizontal_count).map(move |column| self.position(column, row))
        })
    }
}
