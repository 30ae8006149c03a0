mod factory;
mod kind;
mod measure;
mod style;

pub use factory::ShapeFactory;
pub use kind::{FamilyKind, ShapeTag, SubKind};
pub use style::{ShapeMeta, ShapeStyle};

use crate::error::{GeometryError, Result};
use crate::math::distance_2d::{point_to_circle_dist, point_to_segment_dist};
use crate::math::polygon_2d::{point_in_polygon, vertex_centroid};
use crate::math::vector_2d::distance;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a shape in the shape store.
    pub struct ShapeId;
}

/// A shape: a type tag and the ordered vertex list it exclusively owns.
///
/// Circle-family shapes store their center at index 0 followed by control
/// points on the circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    tag: ShapeTag,
    vertices: Vec<Point2>,
    /// Display style.
    pub style: ShapeStyle,
    /// Name and description.
    pub meta: ShapeMeta,
}

impl Shape {
    /// Creates a shape from explicit vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex count does not match the tag or a
    /// coordinate is not finite.
    pub fn new(tag: ShapeTag, vertices: Vec<Point2>) -> Result<Self> {
        tag.check_vertex_count(vertices.len())?;
        if vertices.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::InvalidParameter(
                "vertex coordinates must be finite".into(),
            )
            .into());
        }
        Ok(Self {
            tag,
            vertices,
            style: ShapeStyle::default(),
            meta: ShapeMeta::default(),
        })
    }

    /// Replaces the style.
    #[must_use]
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Replaces the metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: ShapeMeta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn tag(&self) -> ShapeTag {
        self.tag
    }

    #[must_use]
    pub fn family(&self) -> FamilyKind {
        self.tag.family()
    }

    #[must_use]
    pub fn sub_kind(&self) -> SubKind {
        self.tag.sub_kind()
    }

    /// Current vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Mutable access for operations; the vertex count stays fixed.
    pub(crate) fn vertices_mut(&mut self) -> &mut [Point2] {
        &mut self.vertices
    }

    /// Mutable access to the vertex list itself, for free-form edits.
    pub(crate) fn vertex_list_mut(&mut self) -> &mut Vec<Point2> {
        &mut self.vertices
    }

    /// Returns vertex `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::IndexOutOfRange`] if `index` is invalid.
    pub fn vertex(&self, index: usize) -> Result<Point2> {
        self.vertices.get(index).copied().ok_or_else(|| {
            GeometryError::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            }
            .into()
        })
    }

    /// Number of edges: `n` for closed polygons, 1 for a line, 0 otherwise.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        match self.family() {
            FamilyKind::Line => 1,
            f if f.is_polygonal() => self.vertices.len(),
            _ => 0,
        }
    }

    /// Vertex indices of edge `index`.
    #[must_use]
    pub fn edge_indices(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.edge_count() {
            return None;
        }
        Some((index, (index + 1) % self.vertices.len()))
    }

    /// End points of edge `index`.
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<(Point2, Point2)> {
        let (a, b) = self.edge_indices(index)?;
        Some((self.vertices[a], self.vertices[b]))
    }

    /// Pivot for rotation and scaling: the center for circle-family shapes,
    /// the vertex centroid otherwise.
    #[must_use]
    pub fn pivot(&self) -> Point2 {
        match self.family() {
            FamilyKind::Circle => self.vertices[0],
            _ => vertex_centroid(&self.vertices),
        }
    }

    /// Containment test used for hit testing.
    ///
    /// Open shapes (points, lines, arcs) count as hit within `tolerance` of
    /// their geometry.
    #[must_use]
    pub fn contains(&self, p: &Point2, tolerance: f64) -> bool {
        match (self.family(), self.sub_kind()) {
            (FamilyKind::Point, _) => distance(p, &self.vertices[0]) <= tolerance,
            (FamilyKind::Line, _) => {
                point_to_segment_dist(p, &self.vertices[0], &self.vertices[1]) <= tolerance
            }
            (FamilyKind::Circle, SubKind::Arc) => {
                point_to_circle_dist(p, &self.vertices[0], self.radius()) <= tolerance
                    && self.angle_in_sweep(p)
            }
            (FamilyKind::Circle, SubKind::Sector) => {
                distance(p, &self.vertices[0]) <= self.radius() && self.angle_in_sweep(p)
            }
            (FamilyKind::Circle, _) => distance(p, &self.vertices[0]) <= self.radius(),
            _ => point_in_polygon(p, &self.vertices),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn triangle() -> Shape {
        Shape::new(
            "triangle".parse().unwrap(),
            vec![p(0.0, 0.0), p(4.0, 0.0), p(0.0, 3.0)],
        )
        .unwrap()
    }

    #[test]
    fn vertex_count_enforced() {
        let tag: ShapeTag = "square".parse().unwrap();
        assert!(Shape::new(tag, vec![p(0.0, 0.0); 3]).is_err());
        assert!(Shape::new(tag, vec![p(0.0, 0.0); 4]).is_ok());
    }

    #[test]
    fn non_finite_rejected() {
        let tag: ShapeTag = "point".parse().unwrap();
        assert!(Shape::new(tag, vec![p(f64::NAN, 0.0)]).is_err());
    }

    #[test]
    fn edges_wrap() {
        let t = triangle();
        assert_eq!(t.edge_count(), 3);
        assert_eq!(t.edge_indices(2), Some((2, 0)));
        assert!(t.edge(3).is_none());
    }

    #[test]
    fn line_has_one_edge() {
        let line = Shape::new("line".parse().unwrap(), vec![p(0.0, 0.0), p(1.0, 0.0)]).unwrap();
        assert_eq!(line.edge_count(), 1);
        assert_eq!(line.edge_indices(0), Some((0, 1)));
    }

    #[test]
    fn circle_has_no_edges() {
        let c = Shape::new("circle".parse().unwrap(), vec![p(0.0, 0.0), p(1.0, 0.0)]).unwrap();
        assert_eq!(c.edge_count(), 0);
        assert!(c.contains(&p(0.5, 0.5), 0.0));
        assert!(!c.contains(&p(1.0, 1.0), 0.0));
    }

    #[test]
    fn vertex_out_of_range() {
        assert!(triangle().vertex(3).is_err());
        assert!((triangle().vertex(1).unwrap().x - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn polygon_containment() {
        let t = triangle();
        assert!(t.contains(&p(1.0, 1.0), 0.0));
        assert!(!t.contains(&p(3.0, 3.0), 0.0));
    }
}
