use super::{Point2, Vector2, TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// Midpoint of the segment `a`–`b`.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// Returns the unit vector in the direction of `v`.
///
/// A zero-length input yields the zero vector instead of NaN components.
#[must_use]
pub fn normalize(v: &Vector2) -> Vector2 {
    let len = v.norm();
    if len < TOLERANCE {
        return Vector2::zeros();
    }
    v / len
}

/// Returns the unit vector of `v`, or `None` if `v` has (near) zero length.
#[must_use]
pub fn try_normalize(v: &Vector2) -> Option<Vector2> {
    let len = v.norm();
    if len < TOLERANCE {
        None
    } else {
        Some(v / len)
    }
}

/// Dot product.
#[must_use]
pub fn dot(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.x + a.y * b.y
}

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Unsigned angle between two vectors, in `[0, π]`.
///
/// Returns `0.0` if either vector has zero length.
#[must_use]
pub fn angle_between(a: &Vector2, b: &Vector2) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < TOLERANCE {
        return 0.0;
    }
    (dot(a, b) / denom).clamp(-1.0, 1.0).acos()
}

/// Rotates `v` by +90° (counter-clockwise in a y-up frame).
#[must_use]
pub fn left_normal(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Unit vector at angle `theta` from the positive x axis.
#[must_use]
pub fn unit_at(theta: f64) -> Vector2 {
    Vector2::new(theta.cos(), theta.sin())
}

/// Rotates `p` around `pivot` by `angle` radians.
#[must_use]
pub fn rotate_about(p: &Point2, pivot: &Point2, angle: f64) -> Point2 {
    let rot = nalgebra::Rotation2::new(angle);
    pivot + rot * (p - pivot)
}

/// Orthogonal projection of `p` onto the infinite line through `a` and `b`.
///
/// Returns `None` if `a` and `b` coincide.
#[must_use]
pub fn perpendicular_foot(p: &Point2, a: &Point2, b: &Point2) -> Option<Point2> {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return None;
    }
    let t = dot(&(p - a), &d) / len_sq;
    Some(a + d * t)
}

/// Mirrors `p` across the infinite line through `a` with direction `dir`.
///
/// Returns `None` if `dir` has zero length.
#[must_use]
pub fn reflect_across_line(p: &Point2, a: &Point2, dir: &Vector2) -> Option<Point2> {
    let foot = perpendicular_foot(p, a, &(a + dir))?;
    Some(foot + (foot - p))
}

/// Center of the circle through three points, or `None` if they are collinear.
#[must_use]
pub fn circumcenter(a: &Point2, b: &Point2, c: &Point2) -> Option<Point2> {
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * cross(&ab, &ac);
    if d.abs() < TOLERANCE {
        return None;
    }
    let ab2 = ab.norm_squared();
    let ac2 = ac.norm_squared();
    let ux = (ac.y * ab2 - ab.y * ac2) / d;
    let uy = (ab.x * ac2 - ac.x * ab2) / d;
    Some(Point2::new(a.x + ux, a.y + uy))
}
