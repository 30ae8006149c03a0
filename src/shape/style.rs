use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Display style carried by shapes and auxiliary lines.
///
/// Colors are opaque strings handed through to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    stroke: String,
    fill: Option<String>,
    width: f64,
    #[serde(default)]
    dashed: bool,
}

impl ShapeStyle {
    /// Creates a solid, unfilled style.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is not positive.
    pub fn new(stroke: impl Into<String>, width: f64) -> Result<Self> {
        if width.is_nan() || width <= 0.0 {
            return Err(GeometryError::InvalidParameter(
                "stroke width must be positive".to_owned(),
            )
            .into());
        }
        Ok(Self {
            stroke: stroke.into(),
            fill: None,
            width,
            dashed: false,
        })
    }

    /// Default style for auxiliary construction lines.
    #[must_use]
    pub fn construction() -> Self {
        Self {
            stroke: "#e67e22".to_owned(),
            fill: None,
            width: 1.5,
            dashed: true,
        }
    }

    /// Sets the fill color.
    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets whether the stroke is dashed.
    #[must_use]
    pub fn with_dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    /// Returns the stroke color.
    #[must_use]
    pub fn stroke(&self) -> &str {
        &self.stroke
    }

    /// Returns the fill color, if any.
    #[must_use]
    pub fn fill(&self) -> Option<&str> {
        self.fill.as_deref()
    }

    /// Returns the stroke width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns whether the stroke is dashed.
    #[must_use]
    pub fn dashed(&self) -> bool {
        self.dashed
    }

    /// Checks a deserialized style for the same rules [`ShapeStyle::new`] applies.
    pub(crate) fn is_valid(&self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: "#2c3e50".to_owned(),
            fill: Some("rgba(52, 152, 219, 0.25)".to_owned()),
            width: 2.0,
            dashed: false,
        }
    }
}

/// Human-readable shape metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShapeMeta {
    pub name: String,
    pub description: String,
}

impl ShapeMeta {
    /// Creates metadata from a name and a description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
