use serde::{Deserialize, Serialize};

use super::derive::derive;
use super::kind::{ConstructionKind, Element, ElementKind, ExtensionMode};
use crate::error::{ConstructionError, Result, StoreError};
use crate::math::{Point2, Vector2};
use crate::shape::{Shape, ShapeId, ShapeStyle};
use crate::store::ShapeStore;

slotmap::new_key_type! {
    /// Unique identifier for an auxiliary line in the shape store.
    pub struct AuxLineId;
}

/// The vertex and edge indices an auxiliary line is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AuxParams {
    Connecting { from: usize, to: usize },
    Median { vertex: usize },
    Altitude { vertex: usize },
    PerpendicularBisector { edge: usize },
    AngleBisector { vertex: usize },
    Parallel { vertex: usize, edge: usize },
    Perpendicular { vertex: usize, edge: usize },
    Midline { first: usize, second: usize },
    Extension { edge: usize, mode: ExtensionMode },
}

impl AuxParams {
    /// Returns the construction kind.
    #[must_use]
    pub fn kind(&self) -> ConstructionKind {
        match self {
            Self::Connecting { .. } => ConstructionKind::Connecting,
            Self::Median { .. } => ConstructionKind::Median,
            Self::Altitude { .. } => ConstructionKind::Altitude,
            Self::PerpendicularBisector { .. } => ConstructionKind::PerpendicularBisector,
            Self::AngleBisector { .. } => ConstructionKind::AngleBisector,
            Self::Parallel { .. } => ConstructionKind::Parallel,
            Self::Perpendicular { .. } => ConstructionKind::Perpendicular,
            Self::Midline { .. } => ConstructionKind::Midline,
            Self::Extension { .. } => ConstructionKind::Extension,
        }
    }

    /// Whether every index refers to an existing vertex or edge of `shape`.
    #[must_use]
    pub fn fits(&self, shape: &Shape) -> bool {
        let n = shape.vertices().len();
        let edges = shape.edge_count();
        match *self {
            Self::Connecting { from, to } => from < n && to < n,
            Self::Median { vertex } | Self::Altitude { vertex } | Self::AngleBisector { vertex } => {
                vertex < n
            }
            Self::PerpendicularBisector { edge } | Self::Extension { edge, .. } => edge < edges,
            Self::Parallel { vertex, edge } | Self::Perpendicular { vertex, edge } => {
                vertex < n && edge < edges
            }
            Self::Midline { first, second } => first < edges && second < edges,
        }
    }

    /// Builds parameters from a completed selection sequence.
    ///
    /// `parallel` and `perpendicular` accept vertex and edge in either order.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::SelectionMismatch`] if the elements do not
    /// match the kind's expected sequence, or pick the same element twice.
    pub fn from_selection(
        kind: ConstructionKind,
        elements: &[Element],
        mode: ExtensionMode,
    ) -> std::result::Result<Self, ConstructionError> {
        let picked: Vec<ElementKind> = elements.iter().map(|e| e.kind()).collect();
        let valid = picked.len() == kind.arity()
            && picked
                .iter()
                .enumerate()
                .all(|(i, k)| kind.accepts_next(&picked[..i], *k));
        if !valid {
            return Err(ConstructionError::SelectionMismatch(format!(
                "{kind} expects {:?}, got {picked:?}",
                kind.expected()
            )));
        }

        let vertex = elements.iter().find(|e| e.kind() == ElementKind::Vertex);
        let edge = elements.iter().find(|e| e.kind() == ElementKind::Edge);
        let index_of = |e: Option<&Element>| e.map_or(0, |e| e.index());

        let params = match kind {
            ConstructionKind::Connecting => Self::Connecting {
                from: elements[0].index(),
                to: elements[1].index(),
            },
            ConstructionKind::Median => Self::Median {
                vertex: elements[0].index(),
            },
            ConstructionKind::Altitude => Self::Altitude {
                vertex: elements[0].index(),
            },
            ConstructionKind::PerpendicularBisector => Self::PerpendicularBisector {
                edge: elements[0].index(),
            },
            ConstructionKind::AngleBisector => Self::AngleBisector {
                vertex: elements[0].index(),
            },
            ConstructionKind::Parallel => Self::Parallel {
                vertex: index_of(vertex),
                edge: index_of(edge),
            },
            ConstructionKind::Perpendicular => Self::Perpendicular {
                vertex: index_of(vertex),
                edge: index_of(edge),
            },
            ConstructionKind::Midline => Self::Midline {
                first: elements[0].index(),
                second: elements[1].index(),
            },
            ConstructionKind::Extension => Self::Extension {
                edge: elements[0].index(),
                mode,
            },
        };

        match params {
            Self::Connecting { from, to } if from == to => Err(
                ConstructionError::SelectionMismatch("connecting line needs two vertices".into()),
            ),
            Self::Midline { first, second } if first == second => Err(
                ConstructionError::SelectionMismatch("midline needs two distinct edges".into()),
            ),
            _ => Ok(params),
        }
    }
}

/// Current geometry of an auxiliary line.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxGeometry {
    pub start: Point2,
    pub end: Point2,
    /// Kind-specific points for math marks: midpoints, perpendicular feet.
    pub marks: Vec<Point2>,
}

impl AuxGeometry {
    pub(crate) fn segment(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            marks: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn with_marks(mut self, marks: Vec<Point2>) -> Self {
        self.marks = marks;
        self
    }

    /// Vector from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    /// Distance from start to end.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }
}

/// A construction line bound to a shape by id.
///
/// It holds no coordinates: every query re-derives the geometry from the
/// owning shape's current vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxiliaryLine {
    owner: ShapeId,
    params: AuxParams,
    /// Display style.
    pub style: ShapeStyle,
}

impl AuxiliaryLine {
    /// Creates a line on `owner` with the default construction style.
    #[must_use]
    pub fn new(owner: ShapeId, params: AuxParams) -> Self {
        Self {
            owner,
            params,
            style: ShapeStyle::construction(),
        }
    }

    /// Replaces the style.
    #[must_use]
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn owner(&self) -> ShapeId {
        self.owner
    }

    #[must_use]
    pub fn params(&self) -> &AuxParams {
        &self.params
    }

    #[must_use]
    pub fn kind(&self) -> ConstructionKind {
        self.params.kind()
    }

    /// Derives the current geometry from the owning shape in `store`.
    ///
    /// Returns `Ok(None)` when the shape is in a degenerate state (nothing to
    /// render).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OrphanedAuxLine`] if the owning shape no longer
    /// exists.
    pub fn geometry(&self, store: &ShapeStore) -> Result<Option<AuxGeometry>> {
        let shape = store.shape(self.owner).map_err(|_| StoreError::OrphanedAuxLine {
            line: self.kind().to_string(),
            shape: format!("{:?}", self.owner),
        })?;
        Ok(derive(shape, &self.params, store.config().extension_length))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parallel_from_either_order() {
        let a = AuxParams::from_selection(
            ConstructionKind::Parallel,
            &[Element::Vertex(2), Element::Edge(0)],
            ExtensionMode::Both,
        )
        .unwrap();
        let b = AuxParams::from_selection(
            ConstructionKind::Parallel,
            &[Element::Edge(0), Element::Vertex(2)],
            ExtensionMode::Both,
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a, AuxParams::Parallel { vertex: 2, edge: 0 });
    }

    #[test]
    fn wrong_sequence_rejected() {
        assert!(AuxParams::from_selection(
            ConstructionKind::Median,
            &[Element::Edge(0)],
            ExtensionMode::Both,
        )
        .is_err());
        assert!(AuxParams::from_selection(
            ConstructionKind::Connecting,
            &[Element::Vertex(0)],
            ExtensionMode::Both,
        )
        .is_err());
    }

    #[test]
    fn repeated_element_rejected() {
        assert!(AuxParams::from_selection(
            ConstructionKind::Connecting,
            &[Element::Vertex(1), Element::Vertex(1)],
            ExtensionMode::Both,
        )
        .is_err());
        assert!(AuxParams::from_selection(
            ConstructionKind::Midline,
            &[Element::Edge(2), Element::Edge(2)],
            ExtensionMode::Both,
        )
        .is_err());
    }

    #[test]
    fn extension_carries_mode() {
        let p = AuxParams::from_selection(
            ConstructionKind::Extension,
            &[Element::Edge(1)],
            ExtensionMode::End,
        )
        .unwrap();
        assert_eq!(
            p,
            AuxParams::Extension {
                edge: 1,
                mode: ExtensionMode::End
            }
        );
        assert_eq!(p.kind(), ConstructionKind::Extension);
    }

    #[test]
    fn fits_checks_indices() {
        let t = Shape::new(
            "triangle".parse().unwrap(),
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)],
        )
        .unwrap();
        assert!(AuxParams::Midline { first: 0, second: 2 }.fits(&t));
        assert!(!AuxParams::Midline { first: 0, second: 3 }.fits(&t));
        assert!(!AuxParams::Perpendicular { vertex: 3, edge: 0 }.fits(&t));
    }

    #[test]
    fn params_json_shape() {
        let json = serde_json::to_value(AuxParams::Median { vertex: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "median", "vertex": 2}));
    }
}
