use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

use tracing::debug;

use super::{FamilyKind, Shape, ShapeMeta, ShapeTag, SubKind};
use crate::config::EditorConfig;
use crate::error::Result;
use crate::math::polygon_2d::regular_polygon_vertices;
use crate::math::vector_2d::unit_at;
use crate::math::{Point2, Vector2};

/// Creates shapes from type tags, either with default geometry around the
/// configured center or from explicit vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeFactory {
    config: EditorConfig,
}

impl ShapeFactory {
    /// Creates a factory using `config` for default placement and size.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    /// Creates a shape with synthesized default geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if `tag` is not a known shape tag.
    pub fn create(&self, tag: &str) -> Result<Shape> {
        let tag: ShapeTag = tag.parse()?;
        self.create_tag(tag)
    }

    /// Creates a shape of type `tag` with synthesized default geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the synthesized vertices do not fit the tag.
    pub fn create_tag(&self, tag: ShapeTag) -> Result<Shape> {
        let vertices = self.default_vertices(tag);
        debug!(%tag, vertices = vertices.len(), "creating shape with default geometry");
        Ok(Shape::new(tag, vertices)?.with_meta(default_meta(tag)))
    }

    /// Creates a shape from explicit vertices. The vertices are taken as
    /// given; the standing invariant is restored on the next edit.
    ///
    /// # Errors
    ///
    /// Returns an error if `tag` is unknown or the vertex count does not
    /// match it.
    pub fn create_with_vertices(&self, tag: &str, vertices: Vec<Point2>) -> Result<Shape> {
        let tag: ShapeTag = tag.parse()?;
        Ok(Shape::new(tag, vertices)?.with_meta(default_meta(tag)))
    }

    #[allow(clippy::too_many_lines)]
    fn default_vertices(&self, tag: ShapeTag) -> Vec<Point2> {
        use FamilyKind as F;
        use SubKind as S;

        let c = self.config.center();
        let s = self.config.default_size;
        let h = s * 0.5;
        let at = |dx: f64, dy: f64| c + Vector2::new(dx, dy);

        match (tag.family(), tag.sub_kind()) {
            (F::Point, _) => vec![c],
            (F::Line, _) => vec![at(-h, 0.0), at(h, 0.0)],
            (F::Triangle, S::Equilateral) => {
                regular_polygon_vertices(&c, s / 3f64.sqrt(), 3, -FRAC_PI_2)
            }
            (F::Triangle, S::Isosceles) => {
                vec![at(0.0, -h), at(0.4 * s, h), at(-0.4 * s, h)]
            }
            (F::Triangle, S::Right) => vec![at(-h, h), at(h, h), at(-h, -h)],
            (F::Triangle, _) => vec![at(-0.1 * s, -h), at(0.6 * s, 0.4 * s), at(-h, h)],
            (F::Quadrilateral, S::Parallelogram) => vec![
                at(-0.25 * s, -0.3 * s),
                at(0.75 * s, -0.3 * s),
                at(0.25 * s, 0.3 * s),
                at(-0.75 * s, 0.3 * s),
            ],
            (F::Quadrilateral, S::Rectangle) => vec![
                at(-0.75 * s, -h),
                at(0.75 * s, -h),
                at(0.75 * s, h),
                at(-0.75 * s, h),
            ],
            (F::Quadrilateral, S::Square) => vec![at(-h, -h), at(h, -h), at(h, h), at(-h, h)],
            (F::Quadrilateral, S::Rhombus) => vec![
                at(0.0, -0.75 * s),
                at(h, 0.0),
                at(0.0, 0.75 * s),
                at(-h, 0.0),
            ],
            (F::Quadrilateral, S::Trapezoid) => vec![
                at(-0.3 * s, -h),
                at(0.3 * s, -h),
                at(0.6 * s, h),
                at(-0.6 * s, h),
            ],
            (F::Quadrilateral, S::Kite) => vec![
                at(0.0, -0.6 * s),
                at(0.4 * s, -0.2 * s),
                at(0.0, 0.6 * s),
                at(-0.4 * s, -0.2 * s),
            ],
            (F::Quadrilateral, _) => vec![
                at(-0.6 * s, -0.4 * s),
                at(0.5 * s, -h),
                at(0.7 * s, 0.4 * s),
                at(-0.4 * s, h),
            ],
            (F::Circle, S::Sector | S::Arc) => {
                vec![c, c + unit_at(0.0) * h, c + unit_at(FRAC_PI_3 * 2.0) * h]
            }
            (F::Circle, _) => vec![c, at(h, 0.0)],
            (F::Polygon, _) => {
                let sides = tag.vertex_count().unwrap_or(5);
                regular_polygon_vertices(&c, h, sides, -FRAC_PI_2)
            }
        }
    }
}

fn default_meta(tag: ShapeTag) -> ShapeMeta {
    use FamilyKind as F;
    use SubKind as S;

    let (name, description) = match (tag.family(), tag.sub_kind()) {
        (F::Point, _) => ("Point", "A single free point."),
        (F::Line, _) => ("Line Segment", "A segment between two end points."),
        (F::Triangle, S::Equilateral) => (
            "Equilateral Triangle",
            "All three sides are equal and every angle is 60°.",
        ),
        (F::Triangle, S::Isosceles) => (
            "Isosceles Triangle",
            "Two legs of equal length meet at the apex.",
        ),
        (F::Triangle, S::Right) => ("Right Triangle", "One angle is exactly 90°."),
        (F::Triangle, _) => ("Triangle", "Three free vertices."),
        (F::Quadrilateral, S::Parallelogram) => (
            "Parallelogram",
            "Opposite sides are parallel and equal in length.",
        ),
        (F::Quadrilateral, S::Rectangle) => ("Rectangle", "Four right angles."),
        (F::Quadrilateral, S::Square) => ("Square", "Four equal sides and four right angles."),
        (F::Quadrilateral, S::Rhombus) => (
            "Rhombus",
            "Four equal sides; the diagonals cross at right angles.",
        ),
        (F::Quadrilateral, S::Trapezoid) => (
            "Trapezoid",
            "A quadrilateral with at least one pair of parallel sides.",
        ),
        (F::Quadrilateral, S::Kite) => (
            "Kite",
            "Two pairs of equal adjacent sides, symmetric about one diagonal.",
        ),
        (F::Quadrilateral, _) => ("Quadrilateral", "Four free vertices."),
        (F::Circle, S::Sector) => ("Sector", "A slice of a circle bounded by two radii."),
        (F::Circle, S::Arc) => ("Arc", "A portion of a circle's circumference."),
        (F::Circle, _) => ("Circle", "All points at a fixed distance from the center."),
        (F::Polygon, S::Regular) => (
            "Regular Polygon",
            "All sides and all interior angles are equal.",
        ),
        (F::Polygon, _) => ("Polygon", "A closed shape with free vertices."),
    };
    ShapeMeta::new(name, description)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::vector_2d::distance;
    use approx::assert_abs_diff_eq;

    fn factory() -> ShapeFactory {
        ShapeFactory::new(EditorConfig::default())
    }

    #[test]
    fn every_tag_has_default_geometry() {
        for tag in [
            "point",
            "line",
            "triangle",
            "triangle-equilateral",
            "triangle-isosceles",
            "triangle-right",
            "quadrilateral",
            "parallelogram",
            "rectangle",
            "square",
            "rhombus",
            "trapezoid",
            "kite",
            "circle",
            "sector",
            "arc",
            "polygon",
            "polygon-9",
        ] {
            let shape = factory().create(tag).unwrap();
            assert_eq!(shape.tag().to_string(), tag);
            assert!(!shape.meta.name.is_empty());
        }
    }

    #[test]
    fn default_equilateral_side_matches_size() {
        let shape = factory().create("triangle-equilateral").unwrap();
        for side in shape.side_lengths() {
            assert_abs_diff_eq!(side, 100.0, epsilon = 1e-9);
        }
        let centroid = shape.pivot();
        assert_abs_diff_eq!(centroid.x, 250.0, epsilon = 1e-9);
        assert_abs_diff_eq!(centroid.y, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn default_regular_polygon() {
        let shape = factory().create("polygon-7").unwrap();
        assert_eq!(shape.vertices().len(), 7);
        let c = EditorConfig::default().center();
        for v in shape.vertices() {
            assert_abs_diff_eq!(distance(v, &c), 50.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn explicit_free_polygon_keeps_count() {
        let verts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.5, 2.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.5),
        ];
        let shape = factory().create_with_vertices("polygon", verts).unwrap();
        assert_eq!(shape.vertices().len(), 6);
        assert!(shape.tag().is_free_form());
    }

    #[test]
    fn explicit_vertices_wrong_count() {
        assert!(factory()
            .create_with_vertices("rectangle", vec![Point2::origin(); 3])
            .is_err());
    }

    #[test]
    fn respects_configured_center() {
        let f = ShapeFactory::new(EditorConfig::default().with_default_center(Point2::new(0.0, 0.0)));
        let shape = f.create("square").unwrap();
        let c = shape.pivot();
        assert_abs_diff_eq!(c.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.0, epsilon = 1e-12);
    }
}
