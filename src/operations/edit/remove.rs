use tracing::debug;

use crate::error::{GeometryError, Result, StoreError};
use crate::shape::ShapeId;
use crate::store::ShapeStore;

/// Removes a vertex from a free-form polygon, keeping at least three.
pub struct RemoveVertex {
    shape: ShapeId,
    index: usize,
}

impl RemoveVertex {
    /// Creates a new `RemoveVertex` operation.
    #[must_use]
    pub fn new(shape: ShapeId, index: usize) -> Self {
        Self { shape, index }
    }

    /// Executes the removal.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist, is not a free-form
    /// polygon, has only three vertices left, or `index` is out of range.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<()> {
        let shape = store.shape_mut(self.shape)?;
        if !shape.tag().is_free_form() {
            return Err(StoreError::NotAllowed(format!(
                "cannot remove a vertex from a {} shape",
                shape.tag()
            ))
            .into());
        }
        let len = shape.vertices().len();
        if self.index >= len {
            return Err(GeometryError::IndexOutOfRange {
                index: self.index,
                len,
            }
            .into());
        }
        if len <= 3 {
            return Err(StoreError::NotAllowed("a polygon needs at least 3 vertices".into()).into());
        }
        shape.vertex_list_mut().remove(self.index);
        debug!(shape = ?self.shape, index = self.index, "vertex removed");
        Ok(())
    }
}
