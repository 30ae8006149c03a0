use super::kind::Element;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::vector_2d::distance;
use crate::math::Point2;
use crate::shape::Shape;

/// Picks the element of `shape` under `pointer`.
///
/// Vertices win over edges: the nearest vertex within `radius` is returned
/// if there is one, else the nearest edge within `radius`.
#[must_use]
pub fn pick_element(shape: &Shape, pointer: &Point2, radius: f64) -> Option<Element> {
    let nearest_vertex = shape
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, v)| (i, distance(pointer, v)))
        .filter(|&(_, d)| d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((i, _)) = nearest_vertex {
        return Some(Element::Vertex(i));
    }

    (0..shape.edge_count())
        .filter_map(|e| shape.edge(e).map(|(a, b)| (e, point_to_segment_dist(pointer, &a, &b))))
        .filter(|&(_, d)| d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _)| Element::Edge(e))
}
