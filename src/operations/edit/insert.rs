use tracing::debug;

use crate::error::{GeometryError, Result, StoreError};
use crate::math::vector_2d::midpoint;
use crate::math::Point2;
use crate::shape::ShapeId;
use crate::store::ShapeStore;

/// Splits an edge of a free-form polygon by inserting a vertex.
pub struct InsertVertex {
    shape: ShapeId,
    edge: usize,
    point: Option<Point2>,
}

impl InsertVertex {
    /// Creates a new `InsertVertex` operation that splits `edge` at its
    /// midpoint.
    #[must_use]
    pub fn new(shape: ShapeId, edge: usize) -> Self {
        Self {
            shape,
            edge,
            point: None,
        }
    }

    /// Places the new vertex at `point` instead of the edge midpoint.
    #[must_use]
    pub fn at(mut self, point: Point2) -> Self {
        self.point = Some(point);
        self
    }

    /// Executes the insertion and returns the index of the new vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist, is not a free-form
    /// polygon, or `edge` is out of range.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<usize> {
        let shape = store.shape_mut(self.shape)?;
        if !shape.tag().is_free_form() {
            return Err(StoreError::NotAllowed(format!(
                "cannot insert a vertex into a {} shape",
                shape.tag()
            ))
            .into());
        }
        let (a, b) = shape.edge(self.edge).ok_or(GeometryError::IndexOutOfRange {
            index: self.edge,
            len: shape.edge_count(),
        })?;
        let point = self.point.unwrap_or_else(|| midpoint(&a, &b));
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(GeometryError::InvalidParameter("vertex must be finite".into()).into());
        }

        let index = self.edge + 1;
        shape.vertex_list_mut().insert(index, point);
        debug!(shape = ?self.shape, index, "vertex inserted");
        Ok(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn free_square(store: &mut ShapeStore) -> ShapeId {
        let shape = store
            .factory()
            .create_with_vertices(
                "polygon",
                vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)],
            )
            .unwrap();
        store.add_shape(shape)
    }

    #[test]
    fn splits_edge_at_midpoint() {
        let mut store = ShapeStore::new();
        let id = free_square(&mut store);
        let index = InsertVertex::new(id, 3).execute(&mut store).unwrap();
        assert_eq!(index, 4);
        let v = store.shape(id).unwrap().vertices();
        assert_eq!(v.len(), 5);
        assert_eq!(v[4], p(0.0, 2.0));
    }

    #[test]
    fn explicit_point() {
        let mut store = ShapeStore::new();
        let id = free_square(&mut store);
        InsertVertex::new(id, 0).at(p(2.0, -1.0)).execute(&mut store).unwrap();
        let shape = store.shape(id).unwrap();
        assert_eq!(shape.vertices()[1], p(2.0, -1.0));
        assert!((shape.area() - 18.0).abs() < 1e-12);
    }

    #[test]
    fn regular_polygon_refused() {
        let mut store = ShapeStore::new();
        let id = store.create_shape("polygon-5").unwrap();
        assert!(InsertVertex::new(id, 0).execute(&mut store).is_err());
        assert_eq!(store.shape(id).unwrap().vertices().len(), 5);
    }

    #[test]
    fn edge_out_of_range() {
        let mut store = ShapeStore::new();
        let id = free_square(&mut store);
        assert!(InsertVertex::new(id, 4).execute(&mut store).is_err());
    }
}
