use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::Vector2;
use crate::shape::ShapeId;
use crate::store::ShapeStore;

/// Translates a shape by a displacement vector.
pub struct Translate {
    shape: ShapeId,
    displacement: Vector2,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(shape: ShapeId, displacement: Vector2) -> Self {
        Self {
            shape,
            displacement,
        }
    }

    /// Executes the translation, modifying the shape in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist or the displacement is
    /// not finite.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<()> {
        if !self.displacement.iter().all(|c| c.is_finite()) {
            return Err(
                GeometryError::InvalidParameter("displacement must be finite".into()).into(),
            );
        }
        let shape = store.shape_mut(self.shape)?;
        for v in shape.vertices_mut() {
            *v += self.displacement;
        }
        debug!(shape = ?self.shape, dx = self.displacement.x, dy = self.displacement.y, "shape translated");
        Ok(())
    }
}
