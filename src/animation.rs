//! Time-interpolated vertex positions.
//!
//! The caller owns the clock: it calls [`VertexTween::tick`] with the time
//! elapsed since the tween started until the returned frame is finished or
//! it cancels the tween. Drags should be held off while a tween runs.

use crate::error::{GeometryError, Result};
use crate::math::Point2;
use crate::shape::ShapeId;
use crate::store::ShapeStore;

/// Quadratic ease-in-out on `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) * 0.5
    }
}

/// Vertex positions at one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenFrame {
    pub vertices: Vec<Point2>,
    /// Eased progress in `[0, 1]`.
    pub progress: f64,
    /// No further ticks will change the vertices.
    pub finished: bool,
}

impl TweenFrame {
    /// Writes the frame's vertices into `shape`.
    ///
    /// The positions are copied as they are; no constraint is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist or has a different
    /// vertex count.
    pub fn apply(&self, store: &mut ShapeStore, shape: ShapeId) -> Result<()> {
        let target = store.shape_mut(shape)?.vertices_mut();
        if target.len() != self.vertices.len() {
            return Err(GeometryError::InvalidParameter(format!(
                "frame has {} vertices, shape has {}",
                self.vertices.len(),
                target.len()
            ))
            .into());
        }
        target.copy_from_slice(&self.vertices);
        Ok(())
    }
}

/// Interpolates a vertex list from `from` to `to` over `duration`.
#[derive(Debug, Clone)]
pub struct VertexTween {
    from: Vec<Point2>,
    to: Vec<Point2>,
    duration: f64,
    last: f64,
    cancelled: bool,
}

impl VertexTween {
    /// Creates a tween. `duration` uses the same unit the caller later
    /// passes to [`tick`](Self::tick).
    ///
    /// # Errors
    ///
    /// Returns an error if the lists differ in length or `duration` is not
    /// positive.
    pub fn new(from: Vec<Point2>, to: Vec<Point2>, duration: f64) -> Result<Self> {
        if from.len() != to.len() {
            return Err(GeometryError::InvalidParameter(format!(
                "cannot tween {} vertices into {}",
                from.len(),
                to.len()
            ))
            .into());
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(
                GeometryError::InvalidParameter("tween duration must be positive".into()).into(),
            );
        }
        Ok(Self {
            from,
            to,
            duration,
            last: 0.0,
            cancelled: false,
        })
    }

    /// Frame at `elapsed` time since the start. Once cancelled, every tick
    /// returns the last position reached, marked finished.
    pub fn tick(&mut self, elapsed: f64) -> TweenFrame {
        if !self.cancelled {
            self.last = (elapsed / self.duration).clamp(0.0, 1.0);
        }
        let progress = ease_in_out(self.last);
        let vertices = self
            .from
            .iter()
            .zip(&self.to)
            .map(|(a, b)| a + (b - a) * progress)
            .collect();
        TweenFrame {
            vertices,
            progress,
            finished: self.cancelled || self.last >= 1.0,
        }
    }

    /// Stops the tween where it is.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}
