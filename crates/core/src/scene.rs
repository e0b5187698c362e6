//! A minimal host scene: a resizable area with a field and a view mapping.
//!
//! Simulation space is y-up with the origin at the bottom-left; view space is
//! y-down with the origin at the top-left. [`ViewTransform`] maps between
//! them, and [`StaticScene`] pairs it with a [`FieldOracle`] so it can be
//! bound to a [`FieldSampler`](crate::sampler::FieldSampler).

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::error::SamplerError;
use crate::geometry::{Point2, Size, Vector2};
use crate::host::{AreaProvider, FieldOracle};

/// Uniform scale plus offset from simulation space to view space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// View height used to flip the y axis; `None` keeps y as is.
    pub flip_height: Option<f64>,
}

impl ViewTransform {
    /// Maps every point to itself.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            flip_height: None,
        }
    }

    /// Fits `scene` inside `view` keeping its aspect ratio, centred, with
    /// the y axis flipped.
    ///
    /// Returns `SamplerError::InvalidDimensions` if either size is not
    /// positive and finite.
    pub fn aspect_fit(scene: Size, view: Size) -> Result<Self, SamplerError> {
        for size in [scene, view] {
            if !size.is_drawable() {
                return Err(SamplerError::InvalidDimensions {
                    width: size.width,
                    height: size.height,
                });
            }
        }
        let scale = (view.width / scene.width).min(view.height / scene.height);
        Ok(Self {
            scale,
            offset_x: (view.width - scene.width * scale) / 2.0,
            offset_y: (view.height - scene.height * scale) / 2.0,
            flip_height: Some(view.height),
        })
    }

    /// Maps a simulation-space point to view space.
    pub fn apply(&self, point: Point2) -> Point2 {
        let x = point.x * self.scale + self.offset_x;
        let y = point.y * self.scale + self.offset_y;
        match self.flip_height {
            Some(height) => Point2::new(x, height - y),
            None => Point2::new(x, y),
        }
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A host area with a fixed field oracle and a settable size.
pub struct StaticScene<F> {
    size: Cell<Size>,
    field: F,
    view: ViewTransform,
}

impl<F: FieldOracle> StaticScene<F> {
    /// A scene of `size` whose view mapping is the identity.
    pub fn new(size: Size, field: F) -> Self {
        Self::with_view(size, field, ViewTransform::identity())
    }

    pub fn with_view(size: Size, field: F, view: ViewTransform) -> Self {
        Self {
            size: Cell::new(size),
            field,
            view,
        }
    }

    /// Changes the scene size. A bound sampler picks this up on its next
    /// refresh.
    pub fn set_size(&self, size: Size) {
        self.size.set(size);
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }
}

impl<F: FieldOracle> AreaProvider for StaticScene<F> {
    fn size(&self) -> Size {
        self.size.get()
    }

    fn convert(&self, point: Point2) -> Point2 {
        self.view.apply(point)
    }
}

impl<F: FieldOracle> FieldOracle for StaticScene<F> {
    fn query(&self, position: Point2) -> Vector2 {
        self.field.query(position)
    }
}
