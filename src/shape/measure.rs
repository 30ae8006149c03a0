//! Derived measurements. Always computed from the current vertices.

use std::f64::consts::{PI, TAU};

use super::{FamilyKind, Shape, SubKind};
use crate::math::polygon_2d::{interior_angles, perimeter, shoelace_area, side_lengths};
use crate::math::vector_2d::{cross, distance, dot};
use crate::math::Point2;

impl Shape {
    /// Radius of a circle-family shape (center to first control point).
    ///
    /// Returns `0.0` for other families.
    #[must_use]
    pub fn radius(&self) -> f64 {
        match self.family() {
            FamilyKind::Circle => distance(&self.vertices()[0], &self.vertices()[1]),
            _ => 0.0,
        }
    }

    /// Counter-clockwise sweep from the start to the end control point of a
    /// sector or arc, in `[0, 2π)`. A full circle reports `2π`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        match self.sub_kind() {
            SubKind::Sector | SubKind::Arc => {
                let v = self.vertices();
                let a = v[1] - v[0];
                let b = v[2] - v[0];
                cross(&a, &b).atan2(dot(&a, &b)).rem_euclid(TAU)
            }
            _ if self.family() == FamilyKind::Circle => TAU,
            _ => 0.0,
        }
    }

    /// Whether the direction from the center to `p` lies within the sweep.
    pub(crate) fn angle_in_sweep(&self, p: &Point2) -> bool {
        let v = self.vertices();
        let a = v[1] - v[0];
        let b = p - v[0];
        cross(&a, &b).atan2(dot(&a, &b)).rem_euclid(TAU) <= self.sweep()
    }

    /// Perimeter (or length, for open shapes).
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        let v = self.vertices();
        match (self.family(), self.sub_kind()) {
            (FamilyKind::Point, _) => 0.0,
            (FamilyKind::Line, _) => distance(&v[0], &v[1]),
            (FamilyKind::Circle, SubKind::Sector) => {
                let r = self.radius();
                2.0 * r + r * self.sweep()
            }
            (FamilyKind::Circle, SubKind::Arc) => self.radius() * self.sweep(),
            (FamilyKind::Circle, _) => TAU * self.radius(),
            _ => perimeter(v),
        }
    }

    /// Enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        match (self.family(), self.sub_kind()) {
            (FamilyKind::Point | FamilyKind::Line, _) | (FamilyKind::Circle, SubKind::Arc) => 0.0,
            (FamilyKind::Circle, SubKind::Sector) => {
                let r = self.radius();
                0.5 * r * r * self.sweep()
            }
            (FamilyKind::Circle, _) => PI * self.radius().powi(2),
            _ => shoelace_area(self.vertices()),
        }
    }

    /// One angle per vertex for polygonal shapes; the central angle for a
    /// sector; empty otherwise.
    #[must_use]
    pub fn interior_angles(&self) -> Vec<f64> {
        match self.sub_kind() {
            SubKind::Sector => vec![self.sweep()],
            _ if self.family().is_polygonal() => interior_angles(self.vertices()),
            _ => Vec::new(),
        }
    }

    /// Consecutive vertex distances for polygonal shapes; the segment length
    /// for a line; empty otherwise.
    #[must_use]
    pub fn side_lengths(&self) -> Vec<f64> {
        match self.family() {
            FamilyKind::Line => vec![self.perimeter()],
            f if f.is_polygonal() => side_lengths(self.vertices()),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn shape(tag: &str, vertices: Vec<Point2>) -> Shape {
        Shape::new(tag.parse().unwrap(), vertices).unwrap()
    }

    #[test]
    fn right_triangle_measurements() {
        let t = shape("triangle", vec![p(0.0, 0.0), p(4.0, 0.0), p(0.0, 3.0)]);
        assert_abs_diff_eq!(t.area(), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.perimeter(), 12.0, epsilon = 1e-12);
        let angles = t.interior_angles();
        assert_abs_diff_eq!(angles[0], FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(angles.iter().sum::<f64>(), PI, epsilon = 1e-12);
        assert_eq!(t.side_lengths(), vec![4.0, 5.0, 3.0]);
    }

    #[test]
    fn circle_measurements() {
        let c = shape("circle", vec![p(1.0, 1.0), p(3.0, 1.0)]);
        assert_abs_diff_eq!(c.radius(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.area(), 4.0 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(c.perimeter(), 4.0 * PI, epsilon = 1e-12);
        assert!(c.interior_angles().is_empty());
    }

    #[test]
    fn quarter_sector() {
        let s = shape("sector", vec![p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0)]);
        assert_abs_diff_eq!(s.sweep(), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(s.area(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(s.perimeter(), 4.0 + PI, epsilon = 1e-12);
        assert_eq!(s.interior_angles().len(), 1);
        assert!(s.contains(&p(0.5, 0.5), 0.0));
        assert!(!s.contains(&p(-0.5, 0.5), 0.0));
    }

    #[test]
    fn arc_has_length_not_area() {
        let a = shape("arc", vec![p(0.0, 0.0), p(1.0, 0.0), p(-1.0, 0.0)]);
        assert_abs_diff_eq!(a.area(), 0.0);
        assert_abs_diff_eq!(a.perimeter(), PI, epsilon = 1e-12);
    }

    #[test]
    fn line_length() {
        let l = shape("line", vec![p(0.0, 0.0), p(3.0, 4.0)]);
        assert_abs_diff_eq!(l.perimeter(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(l.area(), 0.0);
        assert_eq!(l.side_lengths().len(), 1);
    }

    #[test]
    fn point_is_measureless() {
        let pt = shape("point", vec![p(7.0, 7.0)]);
        assert_abs_diff_eq!(pt.area(), 0.0);
        assert_abs_diff_eq!(pt.perimeter(), 0.0);
        assert!(pt.side_lengths().is_empty());
    }
}
