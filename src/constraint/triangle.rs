use std::f64::consts::TAU;

use super::{degenerate, expect_len, turn_sense};
use crate::error::Result;
use crate::math::vector_2d::{
    distance, left_normal, midpoint, reflect_across_line, try_normalize, unit_at,
};
use crate::math::{Point2, TOLERANCE};

/// Equilateral: the circumcenter lies 2/3 of the way from the dragged vertex
/// to the midpoint of the opposite edge. All three vertices are rebuilt on
/// that circle at 120° steps, keeping the dragged vertex and the winding.
pub(super) fn equilateral(v: &mut [Point2], dragged: usize) -> Result<()> {
    expect_len(v, 3)?;
    let d = v[dragged];
    let a = v[(dragged + 1) % 3];
    let b = v[(dragged + 2) % 3];

    let m = midpoint(&a, &b);
    let center = d + (m - d) * (2.0 / 3.0);
    let radius = distance(&d, &center);
    if radius < TOLERANCE {
        return Err(degenerate("equilateral triangle collapsed to a point"));
    }

    let theta = (d.y - center.y).atan2(d.x - center.x);
    let step = TAU / 3.0 * turn_sense(&(a - d), &(b - d));
    for k in 0..3 {
        #[allow(clippy::cast_precision_loss)]
        let angle = theta + step * k as f64;
        v[(dragged + k) % 3] = center + unit_at(angle) * radius;
    }
    Ok(())
}

/// Isosceles with apex 0. Dragging the apex keeps both leg directions and
/// sets them to their mean length; dragging a base vertex mirrors it across
/// the symmetry axis onto the other base vertex.
pub(super) fn isosceles(v: &mut [Point2], dragged: usize) -> Result<()> {
    expect_len(v, 3)?;
    let apex = v[0];

    if dragged == 0 {
        let l1 = v[1] - apex;
        let l2 = v[2] - apex;
        let (Some(n1), Some(n2)) = (try_normalize(&l1), try_normalize(&l2)) else {
            return Err(degenerate("isosceles leg has zero length"));
        };
        let mean = (l1.norm() + l2.norm()) * 0.5;
        v[1] = apex + n1 * mean;
        v[2] = apex + n2 * mean;
        return Ok(());
    }

    let other = 3 - dragged;
    let axis = midpoint(&v[1], &v[2]) - apex;
    let axis = if axis.norm() >= TOLERANCE {
        axis
    } else {
        // Apex sits on the base midpoint: fall back to the base normal.
        let base = v[2] - v[1];
        if base.norm() < TOLERANCE {
            return Err(degenerate("isosceles base has zero length"));
        }
        left_normal(&base)
    };

    let mirrored = reflect_across_line(&v[dragged], &apex, &axis)
        .ok_or_else(|| degenerate("isosceles symmetry axis has zero length"))?;
    if distance(&mirrored, &v[dragged]) < TOLERANCE {
        return Err(degenerate("base vertex lies on the symmetry axis"));
    }
    v[other] = mirrored;
    Ok(())
}

/// Right angle at vertex 0. Dragging vertex 0 or 1 turns leg 0–2 to be
/// perpendicular to leg 0–1; dragging vertex 2 turns leg 0–1 instead. The
/// turned leg keeps its length and stays on the same side.
pub(super) fn right(v: &mut [Point2], dragged: usize) -> Result<()> {
    expect_len(v, 3)?;
    let (fixed, moved) = if dragged == 2 { (2, 1) } else { (1, 2) };

    let origin = v[0];
    let fixed_leg = v[fixed] - origin;
    let moved_leg = v[moved] - origin;
    let Some(dir) = try_normalize(&fixed_leg) else {
        return Err(degenerate("right triangle leg has zero length"));
    };
    let len = moved_leg.norm();
    if len < TOLERANCE {
        return Err(degenerate("right triangle leg has zero length"));
    }

    let normal = left_normal(&dir) * turn_sense(&fixed_leg, &moved_leg);
    v[moved] = origin + normal * len;
    Ok(())
}
