use tracing::debug;

use crate::constraint::apply_constraint;
use crate::error::{GeometryError, GeosketchError, Result};
use crate::math::Point2;
use crate::shape::{FamilyKind, ShapeId};
use crate::store::ShapeStore;

/// What a drag did to the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The vertex moved and the shape's invariant holds.
    Applied,
    /// The edit would have collapsed the shape; nothing changed.
    Rejected,
}

/// Moves one vertex of a shape and restores the shape's invariant.
///
/// Dragging the center of a circle-family shape moves the whole shape.
pub struct DragVertex {
    shape: ShapeId,
    index: usize,
    target: Point2,
}

impl DragVertex {
    /// Creates a new `DragVertex` operation.
    #[must_use]
    pub fn new(shape: ShapeId, index: usize, target: Point2) -> Self {
        Self {
            shape,
            index,
            target,
        }
    }

    /// Executes the drag.
    ///
    /// Degenerate edits are not errors: the shape is rolled back and the
    /// outcome is [`DragOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist, the index is out of
    /// range, or the target is not finite.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<DragOutcome> {
        if !self.target.x.is_finite() || !self.target.y.is_finite() {
            return Err(
                GeometryError::InvalidParameter("drag target must be finite".into()).into(),
            );
        }
        let shape = store.shape_mut(self.shape)?;
        let current = shape.vertex(self.index)?;
        let sub_kind = shape.sub_kind();

        if shape.family() == FamilyKind::Circle && self.index == 0 {
            let delta = self.target - current;
            for v in shape.vertices_mut() {
                *v += delta;
            }
            debug!(shape = ?self.shape, "circle moved by its center");
            return Ok(DragOutcome::Applied);
        }

        let before = shape.vertices().to_vec();
        let vertices = shape.vertices_mut();
        vertices[self.index] = self.target;

        match apply_constraint(vertices, self.index, sub_kind) {
            Ok(()) => {
                debug!(shape = ?self.shape, index = self.index, %sub_kind, "vertex dragged");
                Ok(DragOutcome::Applied)
            }
            Err(GeosketchError::Geometry(GeometryError::Degenerate(reason))) => {
                vertices.copy_from_slice(&before);
                debug!(shape = ?self.shape, index = self.index, %reason, "drag rejected");
                Ok(DragOutcome::Rejected)
            }
            Err(e) => {
                vertices.copy_from_slice(&before);
                Err(e)
            }
        }
    }
}
