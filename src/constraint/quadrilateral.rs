//! Quadrilateral solvers. Vertices run in order around the shape, so vertex
//! `i` is opposite `i + 2` and the other diagonal is `(i + 1, i + 3)`.

use super::{degenerate, expect_len, turn_sense};
use crate::error::Result;
use crate::math::vector_2d::{distance, left_normal, midpoint, reflect_across_line, try_normalize};
use crate::math::{Point2, Vector2, TOLERANCE};

/// The untouched diagonal and the center it defines for a drag of `dragged`.
struct Diagonals {
    dragged: usize,
    opposite: usize,
    side_a: usize,
    side_b: usize,
    center: Point2,
}

impl Diagonals {
    fn new(v: &[Point2], dragged: usize) -> Self {
        let side_a = (dragged + 1) % 4;
        let side_b = (dragged + 3) % 4;
        Self {
            dragged,
            opposite: (dragged + 2) % 4,
            side_a,
            side_b,
            center: midpoint(&v[side_a], &v[side_b]),
        }
    }

    /// Half-diagonal from the center to the dragged vertex.
    fn half_dragged(&self, v: &[Point2]) -> Vector2 {
        v[self.dragged] - self.center
    }

    /// Point reflection of the dragged vertex through the center.
    fn reflected(&self, v: &[Point2]) -> Point2 {
        self.center - self.half_dragged(v)
    }

    /// Places the side diagonal along `dir` (unit) with half-length `half`.
    fn place_side(&self, v: &mut [Point2], dir: &Vector2, half: f64) {
        v[self.side_a] = self.center + dir * half;
        v[self.side_b] = self.center - dir * half;
    }

    /// Unit vector perpendicular to the dragged diagonal, on the side where
    /// `side_a` currently sits.
    fn perpendicular(&self, v: &[Point2]) -> Option<Vector2> {
        let w = try_normalize(&self.half_dragged(v))?;
        let side = v[self.side_a] - self.center;
        Some(left_normal(&w) * turn_sense(&w, &side))
    }
}

/// Diagonals bisect each other: the opposite vertex becomes the point
/// reflection of the dragged vertex through the center.
pub(super) fn parallelogram(v: &mut [Point2], dragged: usize) -> Result<()> {
    expect_len(v, 4)?;
    let diag = Diagonals::new(v, dragged);
    if diag.half_dragged(v).norm() < TOLERANCE {
        return Err(degenerate("parallelogram diagonal has zero length"));
    }
    let opposite = diag.reflected(v);
    v[diag.opposite] = opposite;
    Ok(())
}

/// Parallelogram with equal diagonals: the side diagonal keeps its direction
/// and takes the dragged diagonal's half-length.
pub(super) fn rectangle(v: &mut [Point2], dragged: usize) -> Result<()> {
    expect_len(v, 4)?;
    let diag = Diagonals::new(v, dragged);
    let half = diag.half_dragged(v).norm();
    if half < TOLERANCE {
        return Err(degenerate("rectangle diagonal has zero length"));
    }
    let dir = try_normalize(&(v[diag.side_a] - diag.center))
        .ok_or_else(|| degenerate("rectangle diagonal has zero length"))?;
    let opposite = diag.reflected(v);
    v[diag.opposite] = opposite;
    diag.place_side(v, &dir, half);
    Ok(())
}

/// Equal, perpendicular diagonals.
pub(super) fn square(v: &mut [Point2], dragged: usize) -> Result<()> {
    expect_len(v, 4)?;
    let diag = Diagonals::new(v, dragged);
    let half = diag.half_dragged(v).norm();
    let perp = diag
        .perpendicular(v)
        .ok_or_else(|| degenerate("square diagonal has zero length"))?;
    let opposite = diag.reflected(v);
    v[diag.opposite] = opposite;
    diag.place_side(v, &perp, half);
    Ok(())
}

/// Perpendicular diagonals; the side diagonal keeps its own half-length.
pub(super) fn rhombus(v: &mut [Point2], dragged: usize) -> Result<()> {
    expect_len(v, 4)?;
    let diag = Diagonals::new(v, dragged);
    let half = distance(&v[diag.side_a], &diag.center);
    if half < TOLERANCE {
        return Err(degenerate("rhombus diagonal has zero length"));
    }
    let perp = diag
        .perpendicular(v)
        .ok_or_else(|| degenerate("rhombus diagonal has zero length"))?;
    let opposite = diag.reflected(v);
    v[diag.opposite] = opposite;
    diag.place_side(v, &perp, half);
    Ok(())
}

/// Top edge 0–1, bottom edge 3–2. Dragging a bottom vertex rebuilds the top
/// edge around its midpoint with the bottom edge's direction and length.
/// Dragging a top vertex is unconstrained.
pub(super) fn trapezoid(v: &mut [Point2], dragged: usize) -> Result<()> {
    expect_len(v, 4)?;
    if dragged < 2 {
        return Ok(());
    }
    let bottom = v[2] - v[3];
    let len = bottom.norm();
    let dir = try_normalize(&bottom).ok_or_else(|| degenerate("trapezoid base has zero length"))?;
    let m = midpoint(&v[0], &v[1]);
    v[0] = m - dir * (len * 0.5);
    v[1] = m + dir * (len * 0.5);
    Ok(())
}

/// Axis vertices 0 and 2, wings 1 and 3. Dragging an axis vertex equalizes
/// its two edges at their mean length; dragging a wing mirrors it across the
/// axis onto the other wing.
pub(super) fn kite(v: &mut [Point2], dragged: usize) -> Result<()> {
    expect_len(v, 4)?;

    if dragged % 2 == 0 {
        let tip = v[dragged];
        let e1 = v[1] - tip;
        let e3 = v[3] - tip;
        let (Some(n1), Some(n3)) = (try_normalize(&e1), try_normalize(&e3)) else {
            return Err(degenerate("kite edge has zero length"));
        };
        let mean = (e1.norm() + e3.norm()) * 0.5;
        v[1] = tip + n1 * mean;
        v[3] = tip + n3 * mean;
        return Ok(());
    }

    let partner = 4 - dragged;
    let axis = v[2] - v[0];
    let mirrored = reflect_across_line(&v[dragged], &v[0], &axis)
        .ok_or_else(|| degenerate("kite axis has zero length"))?;
    if distance(&mirrored, &v[dragged]) < TOLERANCE {
        return Err(degenerate("kite wing lies on the axis"));
    }
    v[partner] = mirrored;
    Ok(())
}
