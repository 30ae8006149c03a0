//! Endpoint derivation for auxiliary lines.
//!
//! Every function here reads the owner's current vertices and returns `None`
//! when the geometry is degenerate or an index no longer fits the shape.

use tracing::trace;

use super::kind::ExtensionMode;
use super::line::{AuxGeometry, AuxParams};
use crate::math::intersect_2d::ray_segment_intersect_2d;
use crate::math::vector_2d::{left_normal, midpoint, perpendicular_foot, try_normalize};
use crate::math::{Point2, TOLERANCE};
use crate::shape::Shape;

/// Derives the current geometry of a line with `params` on `shape`.
pub(crate) fn derive(shape: &Shape, params: &AuxParams, extension: f64) -> Option<AuxGeometry> {
    let result = match *params {
        AuxParams::Connecting { from, to } => connecting(shape, from, to),
        AuxParams::Median { vertex } => median(shape, vertex),
        AuxParams::Altitude { vertex } => altitude(shape, vertex),
        AuxParams::PerpendicularBisector { edge } => perpendicular_bisector(shape, edge, extension),
        AuxParams::AngleBisector { vertex } => angle_bisector(shape, vertex, extension),
        AuxParams::Parallel { vertex, edge } => parallel(shape, vertex, edge, extension),
        AuxParams::Perpendicular { vertex, edge } => perpendicular(shape, vertex, edge),
        AuxParams::Midline { first, second } => midline(shape, first, second),
        AuxParams::Extension { edge, mode } => extension_of(shape, edge, mode, extension),
    };
    if result.is_none() {
        trace!(kind = %params.kind(), tag = %shape.tag(), "auxiliary line has no geometry");
    }
    result
}

fn vertex(shape: &Shape, index: usize) -> Option<Point2> {
    shape.vertices().get(index).copied()
}

/// The edge opposite `index` in a closed polygon: `(index+1, index+2)`.
fn opposite_edge(shape: &Shape, index: usize) -> Option<(Point2, Point2)> {
    let v = shape.vertices();
    let n = v.len();
    if index >= n || n < 3 {
        return None;
    }
    Some((v[(index + 1) % n], v[(index + 2) % n]))
}

fn connecting(shape: &Shape, from: usize, to: usize) -> Option<AuxGeometry> {
    Some(AuxGeometry::segment(vertex(shape, from)?, vertex(shape, to)?))
}

fn median(shape: &Shape, index: usize) -> Option<AuxGeometry> {
    let p = vertex(shape, index)?;
    let (a, b) = opposite_edge(shape, index)?;
    let m = midpoint(&a, &b);
    Some(AuxGeometry::segment(p, m).with_marks(vec![m]))
}

fn altitude(shape: &Shape, index: usize) -> Option<AuxGeometry> {
    let p = vertex(shape, index)?;
    let (a, b) = opposite_edge(shape, index)?;
    let foot = perpendicular_foot(&p, &a, &b)?;
    Some(AuxGeometry::segment(p, foot).with_marks(vec![foot]))
}

fn perpendicular_bisector(shape: &Shape, edge: usize, length: f64) -> Option<AuxGeometry> {
    let (a, b) = shape.edge(edge)?;
    let normal = left_normal(&try_normalize(&(b - a))?);
    let m = midpoint(&a, &b);
    Some(AuxGeometry::segment(m - normal * length, m + normal * length).with_marks(vec![m]))
}

/// Ray along the internal bisector, cut at the first non-adjacent edge it
/// crosses in edge order.
fn angle_bisector(shape: &Shape, index: usize, length: f64) -> Option<AuxGeometry> {
    let v = shape.vertices();
    let n = v.len();
    if index >= n || n < 3 {
        return None;
    }
    let p = v[index];
    let prev = v[(index + n - 1) % n];
    let next = v[(index + 1) % n];
    let u1 = try_normalize(&(prev - p))?;
    let u2 = try_normalize(&(next - p))?;
    let dir = try_normalize(&(u1 + u2))?;

    let hit = (0..shape.edge_count())
        .filter_map(|e| shape.edge_indices(e))
        .filter(|&(a, b)| a != index && b != index)
        .find_map(|(a, b)| ray_segment_intersect_2d(&p, &dir, &v[a], &v[b], TOLERANCE));

    let end = hit.map_or_else(|| p + dir * length, |(point, _)| point);
    Some(AuxGeometry::segment(p, end))
}

fn parallel(shape: &Shape, index: usize, edge: usize, length: f64) -> Option<AuxGeometry> {
    let p = vertex(shape, index)?;
    let (a, b) = shape.edge(edge)?;
    let dir = try_normalize(&(b - a))?;
    Some(AuxGeometry::segment(p - dir * length, p + dir * length))
}

fn perpendicular(shape: &Shape, index: usize, edge: usize) -> Option<AuxGeometry> {
    let p = vertex(shape, index)?;
    let (a, b) = shape.edge(edge)?;
    let foot = perpendicular_foot(&p, &a, &b)?;
    Some(AuxGeometry::segment(p, foot).with_marks(vec![foot]))
}

fn midline(shape: &Shape, first: usize, second: usize) -> Option<AuxGeometry> {
    let (a0, a1) = shape.edge(first)?;
    let (b0, b1) = shape.edge(second)?;
    let m1 = midpoint(&a0, &a1);
    let m2 = midpoint(&b0, &b1);
    Some(AuxGeometry::segment(m1, m2).with_marks(vec![m1, m2]))
}

fn extension_of(shape: &Shape, edge: usize, mode: ExtensionMode, length: f64) -> Option<AuxGeometry> {
    let (a, b) = shape.edge(edge)?;
    let dir = try_normalize(&(b - a))?;
    let (start, end) = match mode {
        ExtensionMode::Both => (a - dir * length, b + dir * length),
        ExtensionMode::Start => (a - dir * length, b),
        ExtensionMode::End => (a, b + dir * length),
    };
    Some(AuxGeometry::segment(start, end))
}
