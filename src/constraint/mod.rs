//! Per-family constraint solvers.
//!
//! [`apply_constraint`] is called right after `vertices[dragged]` has been
//! set to a new raw position. It may move any vertex, including the dragged
//! one, and leaves the vertices satisfying the sub-kind's invariant. When
//! the edit would collapse the shape, the solver returns
//! [`GeometryError::Degenerate`] and leaves `vertices` untouched.

mod circle;
mod polygon;
mod quadrilateral;
mod triangle;

use crate::error::{GeometryError, GeosketchError, Result};
use crate::math::vector_2d::cross;
use crate::math::{Point2, Vector2};
use crate::shape::SubKind;

/// Restores the invariant of `sub_kind` after an edit of vertex `dragged`.
///
/// # Errors
///
/// Returns [`GeometryError::IndexOutOfRange`] if `dragged` is not a vertex,
/// and [`GeometryError::Degenerate`] if reprojection would divide by a
/// near-zero length. In both cases `vertices` is not modified.
pub fn apply_constraint(vertices: &mut [Point2], dragged: usize, sub_kind: SubKind) -> Result<()> {
    if dragged >= vertices.len() {
        return Err(GeometryError::IndexOutOfRange {
            index: dragged,
            len: vertices.len(),
        }
        .into());
    }
    match sub_kind {
        SubKind::Any => Ok(()),
        SubKind::Equilateral => triangle::equilateral(vertices, dragged),
        SubKind::Isosceles => triangle::isosceles(vertices, dragged),
        SubKind::Right => triangle::right(vertices, dragged),
        SubKind::Parallelogram => quadrilateral::parallelogram(vertices, dragged),
        SubKind::Rectangle => quadrilateral::rectangle(vertices, dragged),
        SubKind::Square => quadrilateral::square(vertices, dragged),
        SubKind::Rhombus => quadrilateral::rhombus(vertices, dragged),
        SubKind::Trapezoid => quadrilateral::trapezoid(vertices, dragged),
        SubKind::Kite => quadrilateral::kite(vertices, dragged),
        SubKind::Regular => polygon::regular(vertices, dragged),
        SubKind::Sector | SubKind::Arc => circle::sector(vertices, dragged),
    }
}

pub(crate) fn degenerate(what: &str) -> GeosketchError {
    GeometryError::Degenerate(what.to_owned()).into()
}

pub(crate) fn expect_len(vertices: &[Point2], n: usize) -> Result<()> {
    if vertices.len() == n {
        Ok(())
    } else {
        Err(GeometryError::InvalidParameter(format!(
            "expected {n} vertices, found {}",
            vertices.len()
        ))
        .into())
    }
}

/// `-1.0` for a clockwise turn from `a` to `b`, `1.0` otherwise.
pub(crate) fn turn_sense(a: &Vector2, b: &Vector2) -> f64 {
    if cross(a, b) < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unconstrained_is_noop() {
        let mut v = vec![Point2::new(0.0, 0.0), Point2::new(3.0, 1.0), Point2::new(1.0, 5.0)];
        let before = v.clone();
        apply_constraint(&mut v, 1, SubKind::Any).unwrap();
        assert_eq!(v, before);
    }

    #[test]
    fn out_of_range_index() {
        let mut v = vec![Point2::origin(); 3];
        let err = apply_constraint(&mut v, 3, SubKind::Equilateral).unwrap_err();
        assert!(matches!(
            err,
            GeosketchError::Geometry(GeometryError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn wrong_vertex_count_is_rejected() {
        let mut v = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert!(apply_constraint(&mut v, 0, SubKind::Square).is_err());
    }
}
