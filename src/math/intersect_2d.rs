use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Intersection of the ray `origin + t * dir` (`t > min_t`) with segment `b0`–`b1`.
///
/// Returns the hit point and the ray parameter `t`.
#[must_use]
pub fn ray_segment_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    b0: &Point2,
    b1: &Point2,
    min_t: f64,
) -> Option<(Point2, f64)> {
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(origin, dir, b0, &db)?;
    let eps = 1e-9;
    if t > min_t && u >= -eps && u <= 1.0 + eps {
        Some((point_at(origin, dir, t), t))
    } else {
        None
    }
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn lines_cross() {
        let (t, u) = line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(2.0, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((t - 2.0).abs() < TOLERANCE);
        assert!((u - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn parallel_lines_do_not_cross() {
        assert!(line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 1.0),
            &p(0.0, 1.0),
            &Vector2::new(2.0, 2.0),
        )
        .is_none());
    }

    #[test]
    fn ray_hits_segment_ahead_only() {
        let origin = p(0.0, 0.0);
        let dir = Vector2::new(1.0, 0.0);
        let (hit, t) = ray_segment_intersect_2d(&origin, &dir, &p(3.0, -1.0), &p(3.0, 1.0), 1e-9)
            .unwrap();
        assert!((hit.x - 3.0).abs() < TOLERANCE && (t - 3.0).abs() < TOLERANCE);
        assert!(
            ray_segment_intersect_2d(&origin, &dir, &p(-3.0, -1.0), &p(-3.0, 1.0), 1e-9).is_none()
        );
    }
}
