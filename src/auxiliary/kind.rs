use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shape::FamilyKind;

/// Kind of shape element a construction step selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Vertex,
    Edge,
}

/// A selected shape element, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "element", content = "index", rename_all = "lowercase")]
pub enum Element {
    Vertex(usize),
    Edge(usize),
}

impl Element {
    /// Returns the element kind.
    #[must_use]
    pub fn kind(self) -> ElementKind {
        match self {
            Self::Vertex(_) => ElementKind::Vertex,
            Self::Edge(_) => ElementKind::Edge,
        }
    }

    /// Returns the vertex or edge index.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Vertex(i) | Self::Edge(i) => i,
        }
    }
}

/// Which ends of an edge an extension line grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionMode {
    #[default]
    Both,
    /// Beyond the edge's first vertex only.
    Start,
    /// Beyond the edge's second vertex only.
    End,
}

/// The auxiliary constructions a shape can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructionKind {
    Connecting,
    Median,
    Altitude,
    PerpendicularBisector,
    AngleBisector,
    Parallel,
    Perpendicular,
    Midline,
    Extension,
}

const POLYGONAL: &[FamilyKind] = &[
    FamilyKind::Triangle,
    FamilyKind::Quadrilateral,
    FamilyKind::Polygon,
];

const WITH_EDGES: &[FamilyKind] = &[
    FamilyKind::Line,
    FamilyKind::Triangle,
    FamilyKind::Quadrilateral,
    FamilyKind::Polygon,
];

impl ConstructionKind {
    /// All construction kinds.
    pub const ALL: [Self; 9] = [
        Self::Connecting,
        Self::Median,
        Self::Altitude,
        Self::PerpendicularBisector,
        Self::AngleBisector,
        Self::Parallel,
        Self::Perpendicular,
        Self::Midline,
        Self::Extension,
    ];

    /// Kebab-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Median => "median",
            Self::Altitude => "altitude",
            Self::PerpendicularBisector => "perpendicular-bisector",
            Self::AngleBisector => "angle-bisector",
            Self::Parallel => "parallel",
            Self::Perpendicular => "perpendicular",
            Self::Midline => "midline",
            Self::Extension => "extension",
        }
    }

    /// Element kinds to select, in order.
    #[must_use]
    pub fn expected(self) -> &'static [ElementKind] {
        use ElementKind::{Edge, Vertex};
        match self {
            Self::Connecting => &[Vertex, Vertex],
            Self::Median | Self::Altitude | Self::AngleBisector => &[Vertex],
            Self::PerpendicularBisector | Self::Extension => &[Edge],
            Self::Parallel | Self::Perpendicular => &[Vertex, Edge],
            Self::Midline => &[Edge, Edge],
        }
    }

    /// Number of selections needed.
    #[must_use]
    pub fn arity(self) -> usize {
        self.expected().len()
    }

    /// Whether the expected sequence may also be given in reverse.
    #[must_use]
    pub fn accepts_either_order(self) -> bool {
        matches!(self, Self::Parallel | Self::Perpendicular)
    }

    /// Shape families this construction can be built on.
    #[must_use]
    pub fn supported_families(self) -> &'static [FamilyKind] {
        match self {
            Self::Median | Self::Altitude => &[FamilyKind::Triangle],
            Self::Connecting | Self::AngleBisector | Self::Midline => POLYGONAL,
            Self::PerpendicularBisector | Self::Parallel | Self::Perpendicular | Self::Extension => {
                WITH_EDGES
            }
        }
    }

    /// Whether this construction can be built on `family`.
    #[must_use]
    pub fn supports(self, family: FamilyKind) -> bool {
        self.supported_families().contains(&family)
    }

    /// Whether `element` may fill the next slot after `picked`.
    #[must_use]
    pub fn accepts_next(self, picked: &[ElementKind], element: ElementKind) -> bool {
        let expected = self.expected();
        let slot = picked.len();
        if slot >= expected.len() {
            return false;
        }
        if expected[slot] == element && expected[..slot] == *picked {
            return true;
        }
        if self.accepts_either_order() {
            let reversed: Vec<ElementKind> = expected.iter().rev().copied().collect();
            return reversed[slot] == element && reversed[..slot] == *picked;
        }
        false
    }
}

impl fmt::Display for ConstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
