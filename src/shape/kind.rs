use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;

/// Broad shape category. Determines vertex count and available constructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKind {
    Point,
    Line,
    Triangle,
    Quadrilateral,
    Circle,
    Polygon,
}

impl FamilyKind {
    /// Lowercase name, as used in type tags and snapshots.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Triangle => "triangle",
            Self::Quadrilateral => "quadrilateral",
            Self::Circle => "circle",
            Self::Polygon => "polygon",
        }
    }

    /// Whether shapes of this family are closed vertex cycles.
    #[must_use]
    pub fn is_polygonal(self) -> bool {
        matches!(self, Self::Triangle | Self::Quadrilateral | Self::Polygon)
    }
}

impl fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometric specialization within a family.
///
/// Every variant other than [`SubKind::Any`] carries a standing invariant the
/// constraint solver restores after each vertex edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubKind {
    /// Unconstrained.
    Any,
    Equilateral,
    /// Apex at vertex 0, base at vertices 1 and 2.
    Isosceles,
    /// Right angle at vertex 0, restored after an edit of any vertex.
    Right,
    Parallelogram,
    Rectangle,
    Square,
    Rhombus,
    /// Top edge 0–1, bottom edge 2–3.
    Trapezoid,
    /// Axis vertices 0 and 2, wing vertices 1 and 3.
    Kite,
    /// Center, start point, end point.
    Sector,
    /// Center, start point, end point.
    Arc,
    /// Regular polygon; the side count is the vertex count.
    Regular,
}

impl SubKind {
    /// Kebab-case name, as used in snapshots.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Equilateral => "equilateral",
            Self::Isosceles => "isosceles",
            Self::Right => "right",
            Self::Parallelogram => "parallelogram",
            Self::Rectangle => "rectangle",
            Self::Square => "square",
            Self::Rhombus => "rhombus",
            Self::Trapezoid => "trapezoid",
            Self::Kite => "kite",
            Self::Sector => "sector",
            Self::Arc => "arc",
            Self::Regular => "regular",
        }
    }
}

impl fmt::Display for SubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved shape type: family, sub-kind and vertex count rule.
///
/// Parses from and prints to the tag strings used by the factory, e.g.
/// `"triangle-equilateral"`, `"rectangle"`, `"polygon-7"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeTag {
    family: FamilyKind,
    sub_kind: SubKind,
    /// Fixed vertex count, or `None` for free-form polygons (at least 3).
    vertex_count: Option<usize>,
}

impl ShapeTag {
    /// Builds a tag from its parts, checking the combination is valid.
    ///
    /// `vertex_count` is only consulted for regular and free-form polygons.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::UnknownTag`] for combinations that do not name
    /// a shape type, and [`PersistError::VertexCount`] for polygons with
    /// fewer than three vertices.
    pub fn from_parts(
        family: FamilyKind,
        sub_kind: SubKind,
        vertex_count: usize,
    ) -> Result<Self, PersistError> {
        use FamilyKind as F;
        use SubKind as S;

        let fixed = match (family, sub_kind) {
            (F::Point, S::Any) => Some(1),
            (F::Line, S::Any) | (F::Circle, S::Any) => Some(2),
            (F::Triangle, S::Any | S::Equilateral | S::Isosceles | S::Right)
            | (F::Circle, S::Sector | S::Arc) => Some(3),
            (
                F::Quadrilateral,
                S::Any
                | S::Parallelogram
                | S::Rectangle
                | S::Square
                | S::Rhombus
                | S::Trapezoid
                | S::Kite,
            ) => Some(4),
            (F::Polygon, S::Any | S::Regular) => {
                if vertex_count < 3 {
                    return Err(PersistError::VertexCount {
                        tag: format!("{family}-{sub_kind}"),
                        expected: "at least 3".into(),
                        found: vertex_count,
                    });
                }
                None
            }
            _ => {
                return Err(PersistError::UnknownTag(format!("{family}/{sub_kind}")));
            }
        };

        let vertex_count = match (family, sub_kind) {
            (F::Polygon, S::Regular) => Some(vertex_count),
            _ => fixed,
        };
        Ok(Self {
            family,
            sub_kind,
            vertex_count,
        })
    }

    /// Tag for a regular polygon with `sides` sides.
    ///
    /// # Errors
    ///
    /// Returns an error if `sides < 3`.
    pub fn regular_polygon(sides: usize) -> Result<Self, PersistError> {
        Self::from_parts(FamilyKind::Polygon, SubKind::Regular, sides)
    }

    /// Returns the family.
    #[must_use]
    pub fn family(&self) -> FamilyKind {
        self.family
    }

    /// Returns the sub-kind.
    #[must_use]
    pub fn sub_kind(&self) -> SubKind {
        self.sub_kind
    }

    /// Fixed vertex count, or `None` for free-form polygons.
    #[must_use]
    pub fn vertex_count(&self) -> Option<usize> {
        self.vertex_count
    }

    /// Whether the vertex count may change after construction.
    #[must_use]
    pub fn is_free_form(&self) -> bool {
        self.vertex_count.is_none()
    }

    /// Checks that `found` vertices are acceptable for this tag.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::VertexCount`] on mismatch.
    pub fn check_vertex_count(&self, found: usize) -> Result<(), PersistError> {
        let ok = match self.vertex_count {
            Some(n) => n == found,
            None => found >= 3,
        };
        if ok {
            Ok(())
        } else {
            Err(PersistError::VertexCount {
                tag: self.to_string(),
                expected: self
                    .vertex_count
                    .map_or_else(|| "at least 3".into(), |n| n.to_string()),
                found,
            })
        }
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FamilyKind as F;
        use SubKind as S;

        match (self.family, self.sub_kind) {
            (F::Triangle, S::Any) | (F::Quadrilateral, S::Any) => {
                f.write_str(self.family.as_str())
            }
            (F::Triangle, sub) => write!(f, "triangle-{sub}"),
            (F::Circle, S::Any) => f.write_str("circle"),
            (F::Polygon, S::Regular) => {
                write!(f, "polygon-{}", self.vertex_count.unwrap_or_default())
            }
            (F::Polygon, _) => f.write_str("polygon"),
            (F::Point | F::Line, _) => f.write_str(self.family.as_str()),
            (_, sub) => f.write_str(sub.as_str()),
        }
    }
}

impl FromStr for ShapeTag {
    type Err = PersistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use FamilyKind as F;
        use SubKind as S;

        let tag = s.trim().to_ascii_lowercase();
        let (family, sub_kind) = match tag.as_str() {
            "point" => (F::Point, S::Any),
            "line" => (F::Line, S::Any),
            "triangle" => (F::Triangle, S::Any),
            "triangle-equilateral" => (F::Triangle, S::Equilateral),
            "triangle-isosceles" => (F::Triangle, S::Isosceles),
            "triangle-right" => (F::Triangle, S::Right),
            "quadrilateral" => (F::Quadrilateral, S::Any),
            "parallelogram" => (F::Quadrilateral, S::Parallelogram),
            "rectangle" => (F::Quadrilateral, S::Rectangle),
            "square" => (F::Quadrilateral, S::Square),
            "rhombus" => (F::Quadrilateral, S::Rhombus),
            "trapezoid" => (F::Quadrilateral, S::Trapezoid),
            "kite" => (F::Quadrilateral, S::Kite),
            "circle" => (F::Circle, S::Any),
            "sector" => (F::Circle, S::Sector),
            "arc" => (F::Circle, S::Arc),
            "polygon" => return Self::from_parts(F::Polygon, S::Any, 5),
            other => {
                let sides = other
                    .strip_prefix("polygon-")
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(|| PersistError::UnknownTag(s.to_owned()))?;
                return Self::regular_polygon(sides);
            }
        };
        Self::from_parts(family, sub_kind, 0)
    }
}
