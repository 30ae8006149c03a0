use std::f64::consts::TAU;

use super::{degenerate, triangle, turn_sense};
use crate::error::Result;
use crate::math::vector_2d::{circumcenter, distance, unit_at};
use crate::math::{Point2, TOLERANCE};

/// Regular polygon. The center is recovered from three untouched vertices,
/// which still lie on the original circumcircle. The dragged vertex keeps
/// its radius and angle; the rest are respaced at `2π/n` in the original
/// winding.
pub(super) fn regular(v: &mut [Point2], dragged: usize) -> Result<()> {
    let n = v.len();
    if n == 3 {
        return triangle::equilateral(v, dragged);
    }
    if n < 3 {
        return Err(degenerate("regular polygon needs at least three vertices"));
    }

    let a = v[(dragged + 1) % n];
    let b = v[(dragged + 2) % n];
    let c = v[(dragged + 3) % n];
    let center =
        circumcenter(&a, &b, &c).ok_or_else(|| degenerate("regular polygon vertices are collinear"))?;

    let d = v[dragged];
    let radius = distance(&d, &center);
    if radius < TOLERANCE {
        return Err(degenerate("regular polygon collapsed to its center"));
    }

    let theta = (d.y - center.y).atan2(d.x - center.x);
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / n as f64 * turn_sense(&(a - center), &(b - center));
    for k in 0..n {
        #[allow(clippy::cast_precision_loss)]
        let angle = theta + step * k as f64;
        v[(dragged + k) % n] = center + unit_at(angle) * radius;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::{regular_polygon_vertices, side_lengths};
    use approx::assert_relative_eq;

    #[test]
    fn hexagon_respaced_around_center() {
        let center = Point2::new(10.0, -4.0);
        let mut v = regular_polygon_vertices(&center, 5.0, 6, 0.2);
        v[2] = Point2::new(14.0, 8.0);
        regular(&mut v, 2).unwrap();

        for p in &v {
            assert_relative_eq!(distance(p, &center), distance(&v[2], &center), max_relative = 1e-9);
        }
        let s = side_lengths(&v);
        for side in &s {
            assert_relative_eq!(*side, s[0], max_relative = 1e-9);
        }
        assert_relative_eq!(v[2].x, 14.0, epsilon = 1e-9);
        assert_relative_eq!(v[2].y, 8.0, epsilon = 1e-9);
    }

    #[test]
    fn clockwise_polygon_stays_clockwise() {
        let mut v = regular_polygon_vertices(&Point2::origin(), 3.0, 5, 0.0);
        v.reverse();
        v[0] = Point2::new(4.0, 1.0);
        regular(&mut v, 0).unwrap();
        assert!(crate::math::polygon_2d::signed_area(&v) < 0.0);
    }

    #[test]
    fn triangle_delegates_to_equilateral() {
        let mut v = regular_polygon_vertices(&Point2::origin(), 3.0, 3, 0.0);
        v[1] = Point2::new(0.0, 7.0);
        regular(&mut v, 1).unwrap();
        let s = side_lengths(&v);
        assert_relative_eq!(s[0], s[1], max_relative = 1e-9);
        assert_relative_eq!(s[1], s[2], max_relative = 1e-9);
    }

    #[test]
    fn drag_onto_center_rejected() {
        let mut v = regular_polygon_vertices(&Point2::origin(), 3.0, 4, 0.0);
        v[0] = Point2::origin();
        let before = v.clone();
        assert!(regular(&mut v, 0).is_err());
        assert_eq!(v, before);
    }
}
