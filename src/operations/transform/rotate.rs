use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::vector_2d::rotate_about;
use crate::math::Point2;
use crate::shape::ShapeId;
use crate::store::ShapeStore;

/// Rotates a shape about a pivot point.
pub struct Rotate {
    shape: ShapeId,
    angle: f64,
    pivot: Option<Point2>,
}

impl Rotate {
    /// Creates a new `Rotate` operation about the shape's own pivot (vertex
    /// centroid, or the center for circle-family shapes).
    ///
    /// * `angle` - Rotation angle in radians, counter-clockwise.
    #[must_use]
    pub fn new(shape: ShapeId, angle: f64) -> Self {
        Self {
            shape,
            angle,
            pivot: None,
        }
    }

    /// Rotates about `pivot` instead.
    #[must_use]
    pub fn about(mut self, pivot: Point2) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// Executes the rotation, modifying the shape in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist or the angle is not
    /// finite.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<()> {
        if !self.angle.is_finite() {
            return Err(GeometryError::InvalidParameter("rotation angle must be finite".into()).into());
        }
        let shape = store.shape_mut(self.shape)?;
        let pivot = self.pivot.unwrap_or_else(|| shape.pivot());
        for v in shape.vertices_mut() {
            *v = rotate_about(v, &pivot, self.angle);
        }
        debug!(shape = ?self.shape, angle = self.angle, "shape rotated");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn quarter_turn_about_centroid() {
        let mut store = ShapeStore::new();
        let id = store.create_shape("rectangle").unwrap();
        let before = store.shape(id).unwrap().clone();
        Rotate::new(id, FRAC_PI_2).execute(&mut store).unwrap();
        let after = store.shape(id).unwrap();

        assert_abs_diff_eq!(after.pivot().x, before.pivot().x, epsilon = 1e-9);
        assert_abs_diff_eq!(after.pivot().y, before.pivot().y, epsilon = 1e-9);
        assert_abs_diff_eq!(after.area(), before.area(), epsilon = 1e-9);
        // 150 × 100 rectangle: the long side now runs vertically.
        let e = after.vertices()[1] - after.vertices()[0];
        assert_abs_diff_eq!(e.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(e.y.abs(), 150.0, epsilon = 1e-9);
    }

    #[test]
    fn explicit_pivot() {
        let mut store = ShapeStore::new();
        let id = store.add_shape(
            crate::shape::Shape::new("point".parse().unwrap(), vec![Point2::new(1.0, 0.0)])
                .unwrap(),
        );
        Rotate::new(id, FRAC_PI_2)
            .about(Point2::origin())
            .execute(&mut store)
            .unwrap();
        let v = store.shape(id).unwrap().vertices()[0];
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn nan_angle_rejected() {
        let mut store = ShapeStore::new();
        let id = store.create_shape("square").unwrap();
        assert!(Rotate::new(id, f64::NAN).execute(&mut store).is_err());
    }
}
