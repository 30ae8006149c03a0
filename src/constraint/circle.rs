use super::{degenerate, expect_len};
use crate::error::Result;
use crate::math::vector_2d::{distance, try_normalize};
use crate::math::{Point2, TOLERANCE};

/// Sector and arc: center, start point, end point. The start point sets the
/// radius; the end point is pulled back onto that circle along its current
/// direction from the center.
pub(super) fn sector(v: &mut [Point2], _dragged: usize) -> Result<()> {
    expect_len(v, 3)?;
    let center = v[0];
    let radius = distance(&center, &v[1]);
    if radius < TOLERANCE {
        return Err(degenerate("sector radius is zero"));
    }
    let dir = try_normalize(&(v[2] - center))
        .ok_or_else(|| degenerate("sector end point sits on the center"))?;
    v[2] = center + dir * radius;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn end_point_follows_radius() {
        let mut v = vec![Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), Point2::new(0.0, 2.0)];
        sector(&mut v, 1).unwrap();
        assert_relative_eq!(v[2].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v[2].y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn end_point_on_center_rejected() {
        let mut v = vec![Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), Point2::new(0.0, 0.0)];
        assert!(sector(&mut v, 2).is_err());
    }
}
