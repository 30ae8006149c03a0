use serde::{Deserialize, Serialize};

use crate::math::Point2;

/// Tuning values shared by the shape factory, the element picker and the
/// auxiliary-line derivation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Center used when synthesizing default geometry, as `[x, y]`.
    pub default_center: [f64; 2],
    /// Characteristic size of synthesized shapes (side length or diameter).
    pub default_size: f64,
    /// Maximum pointer distance for picking a vertex or an edge.
    pub pick_radius: f64,
    /// Fixed length used for unbounded construction lines.
    pub extension_length: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_center: [250.0, 200.0],
            default_size: 100.0,
            pick_radius: 8.0,
            extension_length: 1000.0,
        }
    }
}

impl EditorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default center for synthesized shapes.
    #[must_use]
    pub fn with_default_center(mut self, center: Point2) -> Self {
        self.default_center = [center.x, center.y];
        self
    }

    /// Sets the default size for synthesized shapes.
    #[must_use]
    pub fn with_default_size(mut self, size: f64) -> Self {
        self.default_size = size;
        self
    }

    /// Sets the picking radius.
    #[must_use]
    pub fn with_pick_radius(mut self, radius: f64) -> Self {
        self.pick_radius = radius;
        self
    }

    /// Sets the length of unbounded construction lines.
    #[must_use]
    pub fn with_extension_length(mut self, length: f64) -> Self {
        self.extension_length = length;
        self
    }

    /// Returns the default center as a point.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(self.default_center[0], self.default_center[1])
    }
}
