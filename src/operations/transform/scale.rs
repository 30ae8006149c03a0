use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::Point2;
use crate::shape::ShapeId;
use crate::store::ShapeStore;

/// Uniformly scales a shape about a pivot point.
pub struct Scale {
    shape: ShapeId,
    factor: f64,
    pivot: Option<Point2>,
}

impl Scale {
    /// Creates a new `Scale` operation about the shape's own pivot.
    #[must_use]
    pub fn new(shape: ShapeId, factor: f64) -> Self {
        Self {
            shape,
            factor,
            pivot: None,
        }
    }

    /// Scales about `pivot` instead.
    #[must_use]
    pub fn about(mut self, pivot: Point2) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// Executes the scaling, modifying the shape in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist or the factor is not a
    /// positive finite number.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<()> {
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(GeometryError::InvalidParameter(format!(
                "scale factor must be positive, got {}",
                self.factor
            ))
            .into());
        }
        let shape = store.shape_mut(self.shape)?;
        let pivot = self.pivot.unwrap_or_else(|| shape.pivot());
        for v in shape.vertices_mut() {
            *v = pivot + (*v - pivot) * self.factor;
        }
        debug!(shape = ?self.shape, factor = self.factor, "shape scaled");
        Ok(())
    }
}
