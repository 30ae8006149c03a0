mod persist;

pub use persist::{AuxLineRecord, PointRecord, SceneSnapshot, ShapeRecord};

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::auxiliary::{AuxGeometry, AuxLineId, AuxiliaryLine};
use crate::config::EditorConfig;
use crate::error::{ConstructionError, Result, StoreError};
use crate::math::Point2;
use crate::shape::{Shape, ShapeFactory, ShapeId};

/// Central arena that owns every shape and auxiliary line of a session.
///
/// Auxiliary lines refer to their owning shape by [`ShapeId`] (a
/// generational index), so a removed shape is detected on lookup instead
/// of leaving a dangling reference. A new store starts empty; ids are never
/// shared across stores.
#[derive(Debug, Default)]
pub struct ShapeStore {
    shapes: SlotMap<ShapeId, Shape>,
    aux_lines: SlotMap<AuxLineId, AuxiliaryLine>,
    /// Drawing order, bottom first.
    order: Vec<ShapeId>,
    config: EditorConfig,
}

impl ShapeStore {
    /// Creates a new, empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty store using `config`.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Factory placing default geometry according to this store's config.
    #[must_use]
    pub fn factory(&self) -> ShapeFactory {
        ShapeFactory::new(self.config)
    }

    // --- Shape operations ---

    /// Inserts a shape on top of the drawing order and returns its ID.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = self.shapes.insert(shape);
        self.order.push(id);
        id
    }

    /// Creates a shape with default geometry from a type tag and adds it.
    ///
    /// # Errors
    ///
    /// Returns an error if `tag` is not a known shape tag.
    pub fn create_shape(&mut self, tag: &str) -> Result<ShapeId> {
        let shape = self.factory().create(tag)?;
        Ok(self.add_shape(shape))
    }

    /// Returns a reference to the shape, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is not in the store.
    pub fn shape(&self, id: ShapeId) -> std::result::Result<&Shape, StoreError> {
        self.shapes
            .get(id)
            .ok_or_else(|| StoreError::ShapeNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to the shape, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is not in the store.
    pub fn shape_mut(&mut self, id: ShapeId) -> std::result::Result<&mut Shape, StoreError> {
        self.shapes
            .get_mut(id)
            .ok_or_else(|| StoreError::ShapeNotFound(format!("{id:?}")))
    }

    /// Removes a shape and returns it.
    ///
    /// Auxiliary lines on the shape are kept and become orphaned: querying
    /// them fails until [`prune_orphans`](Self::prune_orphans) drops them.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is not in the store.
    pub fn remove_shape(&mut self, id: ShapeId) -> std::result::Result<Shape, StoreError> {
        let shape = self
            .shapes
            .remove(id)
            .ok_or_else(|| StoreError::ShapeNotFound(format!("{id:?}")))?;
        self.order.retain(|&s| s != id);
        let orphaned = self.aux_lines.values().filter(|l| l.owner() == id).count();
        if orphaned > 0 {
            warn!(?id, orphaned, "removed shape still owns auxiliary lines");
        }
        Ok(shape)
    }

    /// Shapes in drawing order, bottom first.
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.shapes.get(id).map(|s| (id, s)))
    }

    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.aux_lines.is_empty()
    }

    /// Topmost shape containing `point`. Open shapes are hit within the
    /// configured pick radius.
    #[must_use]
    pub fn shape_at(&self, point: &Point2) -> Option<ShapeId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|&id| {
                self.shapes
                    .get(id)
                    .is_some_and(|s| s.contains(point, self.config.pick_radius))
            })
    }

    /// Moves a shape to the top of the drawing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is not in the store.
    pub fn bring_to_front(&mut self, id: ShapeId) -> std::result::Result<(), StoreError> {
        self.shape(id)?;
        self.order.retain(|&s| s != id);
        self.order.push(id);
        Ok(())
    }

    // --- Auxiliary line operations ---

    /// Inserts an auxiliary line and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the owning shape does not exist, its family does
    /// not support the construction, or an index does not fit the shape.
    pub fn add_aux_line(&mut self, line: AuxiliaryLine) -> Result<AuxLineId> {
        let owner = self.shape(line.owner())?;
        let kind = line.kind();
        if !kind.supports(owner.family()) {
            return Err(ConstructionError::UnsupportedFamily {
                kind: kind.to_string(),
                family: owner.family().to_string(),
            }
            .into());
        }
        if !line.params().fits(owner) {
            return Err(ConstructionError::SelectionMismatch(format!(
                "{:?} does not fit a {} shape",
                line.params(),
                owner.tag()
            ))
            .into());
        }
        let id = self.aux_lines.insert(line);
        debug!(?id, %kind, "auxiliary line added");
        Ok(id)
    }

    /// Returns a reference to the auxiliary line, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not in the store.
    pub fn aux_line(&self, id: AuxLineId) -> std::result::Result<&AuxiliaryLine, StoreError> {
        self.aux_lines
            .get(id)
            .ok_or_else(|| StoreError::AuxLineNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to the auxiliary line, or an error if not
    /// found.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not in the store.
    pub fn aux_line_mut(
        &mut self,
        id: AuxLineId,
    ) -> std::result::Result<&mut AuxiliaryLine, StoreError> {
        self.aux_lines
            .get_mut(id)
            .ok_or_else(|| StoreError::AuxLineNotFound(format!("{id:?}")))
    }

    /// Removes an auxiliary line and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not in the store.
    pub fn remove_aux_line(
        &mut self,
        id: AuxLineId,
    ) -> std::result::Result<AuxiliaryLine, StoreError> {
        self.aux_lines
            .remove(id)
            .ok_or_else(|| StoreError::AuxLineNotFound(format!("{id:?}")))
    }

    /// All auxiliary lines, including orphaned ones.
    pub fn aux_lines(&self) -> impl Iterator<Item = (AuxLineId, &AuxiliaryLine)> + '_ {
        self.aux_lines.iter()
    }

    /// Auxiliary lines owned by `shape`.
    pub fn aux_lines_of(
        &self,
        shape: ShapeId,
    ) -> impl Iterator<Item = (AuxLineId, &AuxiliaryLine)> + '_ {
        self.aux_lines.iter().filter(move |(_, l)| l.owner() == shape)
    }

    /// Current geometry of an auxiliary line, derived from its owner.
    ///
    /// `Ok(None)` means the owner is degenerate and there is nothing to draw.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not exist or its owner was removed.
    pub fn aux_geometry(&self, id: AuxLineId) -> Result<Option<AuxGeometry>> {
        let line = self.aux_line(id)?;
        line.geometry(self).inspect_err(|e| warn!(?id, %e, "auxiliary line lookup failed"))
    }

    /// Drops every auxiliary line whose owner no longer exists and returns
    /// their IDs.
    pub fn prune_orphans(&mut self) -> Vec<AuxLineId> {
        let orphans: Vec<_> = self
            .aux_lines
            .iter()
            .filter(|(_, l)| !self.shapes.contains_key(l.owner()))
            .map(|(id, _)| id)
            .collect();
        for id in &orphans {
            self.aux_lines.remove(*id);
        }
        if !orphans.is_empty() {
            debug!(count = orphans.len(), "pruned orphaned auxiliary lines");
        }
        orphans
    }

    /// Removes every auxiliary line.
    pub fn clear_aux_lines(&mut self) {
        self.aux_lines.clear();
    }

    /// Removes everything. IDs handed out before are never reused.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.aux_lines.clear();
        self.order.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auxiliary::AuxParams;
    use crate::error::GeosketchError;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn add_and_lookup() {
        let mut store = ShapeStore::new();
        let id = store.create_shape("square").unwrap();
        assert_eq!(store.shape(id).unwrap().vertices().len(), 4);
        assert_eq!(store.shape_count(), 1);
    }

    #[test]
    fn unknown_tag() {
        let mut store = ShapeStore::new();
        assert!(store.create_shape("hexagram").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn removed_id_not_reused() {
        let mut store = ShapeStore::new();
        let id = store.create_shape("circle").unwrap();
        store.remove_shape(id).unwrap();
        let next = store.create_shape("circle").unwrap();
        assert_ne!(id, next);
        assert!(store.shape(id).is_err());
    }

    #[test]
    fn shape_at_prefers_topmost() {
        let mut store = ShapeStore::new();
        let below = store.create_shape("square").unwrap();
        let above = store.create_shape("circle").unwrap();
        let c = store.config().center();
        assert_eq!(store.shape_at(&c), Some(above));
        store.bring_to_front(below).unwrap();
        assert_eq!(store.shape_at(&c), Some(below));
        assert_eq!(store.shape_at(&p(-500.0, -500.0)), None);
        let order: Vec<_> = store.shapes().map(|(id, _)| id).collect();
        assert_eq!(order, vec![above, below]);
    }

    #[test]
    fn aux_line_rejects_unsupported_family() {
        let mut store = ShapeStore::new();
        let circle = store.create_shape("circle").unwrap();
        let err = store
            .add_aux_line(AuxiliaryLine::new(circle, AuxParams::Altitude { vertex: 0 }))
            .unwrap_err();
        assert!(matches!(
            err,
            GeosketchError::Construction(ConstructionError::UnsupportedFamily { .. })
        ));
    }

    #[test]
    fn aux_line_rejects_bad_index() {
        let mut store = ShapeStore::new();
        let t = store.create_shape("triangle").unwrap();
        assert!(store
            .add_aux_line(AuxiliaryLine::new(t, AuxParams::Median { vertex: 3 }))
            .is_err());
    }

    #[test]
    fn orphan_detected_then_pruned() {
        let mut store = ShapeStore::new();
        let t = store.create_shape("triangle").unwrap();
        let line = store
            .add_aux_line(AuxiliaryLine::new(t, AuxParams::Median { vertex: 0 }))
            .unwrap();
        assert!(store.aux_geometry(line).unwrap().is_some());

        store.remove_shape(t).unwrap();
        let err = store.aux_geometry(line).unwrap_err();
        assert!(matches!(
            err,
            GeosketchError::Store(StoreError::OrphanedAuxLine { .. })
        ));

        assert_eq!(store.prune_orphans(), vec![line]);
        assert!(store.aux_line(line).is_err());
        assert!(store.prune_orphans().is_empty());
    }

    #[test]
    fn aux_lines_of_filters_owner() {
        let mut store = ShapeStore::new();
        let a = store.create_shape("square").unwrap();
        let b = store.create_shape("square").unwrap();
        store
            .add_aux_line(AuxiliaryLine::new(a, AuxParams::Midline { first: 0, second: 2 }))
            .unwrap();
        store
            .add_aux_line(AuxiliaryLine::new(b, AuxParams::Connecting { from: 0, to: 2 }))
            .unwrap();
        assert_eq!(store.aux_lines_of(a).count(), 1);
        assert_eq!(store.aux_lines().count(), 2);
        store.clear_aux_lines();
        assert_eq!(store.aux_lines().count(), 0);
    }

    #[test]
    fn clear_empties_store() {
        let mut store = ShapeStore::new();
        store.create_shape("kite").unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.shapes().count(), 0);
    }
}
