use std::f64::consts::TAU;

use super::vector_2d::{angle_between, distance, unit_at};
use super::{Point2, Vector2};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise (y-up), negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Unsigned polygon area.
#[must_use]
pub fn shoelace_area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Closed perimeter: sum of consecutive distances, wrapping last to first.
#[must_use]
pub fn perimeter(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| distance(&points[i], &points[(i + 1) % n]))
        .sum()
}

/// Length of each edge `i → i+1` of a closed polygon.
#[must_use]
pub fn side_lengths(points: &[Point2]) -> Vec<f64> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .map(|i| distance(&points[i], &points[(i + 1) % n]))
        .collect()
}

/// Angle at `vertex` formed by the rays toward `prev` and `next`, in `[0, π]`.
#[must_use]
pub fn three_point_angle(prev: &Point2, vertex: &Point2, next: &Point2) -> f64 {
    angle_between(&(prev - vertex), &(next - vertex))
}

/// Angle at each vertex of a closed polygon, using its two cyclic neighbours.
#[must_use]
pub fn interior_angles(points: &[Point2]) -> Vec<f64> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let prev = &points[(i + n - 1) % n];
            let next = &points[(i + 1) % n];
            three_point_angle(prev, &points[i], next)
        })
        .collect()
}

/// Ray-casting parity test. Boundary points may go either way.
#[must_use]
pub fn point_in_polygon(p: &Point2, points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for i in 0..n {
        let v0 = &points[i];
        let v1 = &points[(i + 1) % n];
        // Half-open rule: count an edge when p.y is in [min_y, max_y).
        if (v0.y > p.y) != (v1.y > p.y) {
            let t = (p.y - v0.y) / (v1.y - v0.y);
            let x_crossing = v0.x + t * (v1.x - v0.x);
            if x_crossing > p.x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Average of the vertex positions.
#[must_use]
pub fn vertex_centroid(points: &[Point2]) -> Point2 {
    if points.is_empty() {
        return Point2::origin();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    Point2::from(sum / n)
}

/// Vertices of a regular polygon, evenly spaced at `start_angle + 2πi/sides`.
#[must_use]
pub fn regular_polygon_vertices(
    center: &Point2,
    radius: f64,
    sides: usize,
    start_angle: f64,
) -> Vec<Point2> {
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / sides as f64;
    (0..sides)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let theta = start_angle + step * i as f64;
            center + unit_at(theta) * radius
        })
        .collect()
}
