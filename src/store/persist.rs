//! JSON snapshots of a whole scene.
//!
//! Loading is all-or-nothing: every record is validated and re-bound to a
//! fresh id before the store is touched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tracing::{debug, warn};

use super::ShapeStore;
use crate::auxiliary::{AuxLineId, AuxParams, AuxiliaryLine, ConstructionKind};
use crate::error::{PersistError, Result};
use crate::math::Point2;
use crate::shape::{FamilyKind, Shape, ShapeId, ShapeMeta, ShapeStyle, ShapeTag, SubKind};

/// A vertex as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

impl From<Point2> for PointRecord {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for Point2 {
    fn from(p: PointRecord) -> Self {
        Point2::new(p.x, p.y)
    }
}

/// A shape as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    pub id: ShapeId,
    pub family_kind: FamilyKind,
    pub sub_kind: SubKind,
    pub vertices: Vec<PointRecord>,
    #[serde(default)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub metadata: ShapeMeta,
}

impl ShapeRecord {
    #[must_use]
    pub fn from_shape(id: ShapeId, shape: &Shape) -> Self {
        Self {
            id,
            family_kind: shape.family(),
            sub_kind: shape.sub_kind(),
            vertices: shape.vertices().iter().copied().map(PointRecord::from).collect(),
            style: shape.style.clone(),
            metadata: shape.meta.clone(),
        }
    }

    /// Rebuilds the shape.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] if the kinds do not form a known tag, the
    /// vertex count does not fit it, or a value is out of range.
    pub fn to_shape(&self) -> Result<Shape> {
        let tag = ShapeTag::from_parts(self.family_kind, self.sub_kind, self.vertices.len())?;
        if self.vertices.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(PersistError::Malformed(format!("shape {tag} has a non-finite vertex")).into());
        }
        if !self.style.is_valid() {
            return Err(PersistError::Malformed(format!("shape {tag} has an invalid style")).into());
        }
        let vertices = self.vertices.iter().copied().map(Point2::from).collect();
        Ok(Shape::new(tag, vertices)?
            .with_style(self.style.clone())
            .with_meta(self.metadata.clone()))
    }
}

/// An auxiliary line as persisted. `owner_shape_id` refers to a
/// [`ShapeRecord::id`] in the same snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuxLineRecord {
    pub id: AuxLineId,
    pub construction_kind: ConstructionKind,
    pub owner_shape_id: ShapeId,
    pub params: AuxParams,
    #[serde(default = "ShapeStyle::construction")]
    pub style: ShapeStyle,
}

impl AuxLineRecord {
    #[must_use]
    pub fn from_line(id: AuxLineId, line: &AuxiliaryLine) -> Self {
        Self {
            id,
            construction_kind: line.kind(),
            owner_shape_id: line.owner(),
            params: *line.params(),
            style: line.style.clone(),
        }
    }
}

/// Everything in a store, in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    pub shapes: Vec<ShapeRecord>,
    #[serde(default)]
    pub aux_lines: Vec<AuxLineRecord>,
}

/// Arena contents rebuilt from a snapshot, not yet installed.
struct Restored {
    shapes: SlotMap<ShapeId, Shape>,
    aux_lines: SlotMap<AuxLineId, AuxiliaryLine>,
    order: Vec<ShapeId>,
}

impl SceneSnapshot {
    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Json`] if the text is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(PersistError::from)?)
    }

    /// Serializes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(PersistError::from)?)
    }

    fn restore(&self) -> Result<Restored> {
        let mut shapes = SlotMap::with_key();
        let mut order = Vec::with_capacity(self.shapes.len());
        let mut ids: HashMap<ShapeId, ShapeId> = HashMap::with_capacity(self.shapes.len());

        for record in &self.shapes {
            let shape = record.to_shape()?;
            let id = shapes.insert(shape);
            if ids.insert(record.id, id).is_some() {
                return Err(PersistError::Malformed(format!(
                    "duplicate shape id {:?}",
                    record.id
                ))
                .into());
            }
            order.push(id);
        }

        let mut aux_lines = SlotMap::with_key();
        for record in &self.aux_lines {
            if record.params.kind() != record.construction_kind {
                return Err(PersistError::Malformed(format!(
                    "line {:?} is a {} but carries {} parameters",
                    record.id,
                    record.construction_kind,
                    record.params.kind()
                ))
                .into());
            }
            let owner = ids.get(&record.owner_shape_id).copied().ok_or_else(|| {
                PersistError::Malformed(format!(
                    "line {:?} refers to missing shape {:?}",
                    record.id, record.owner_shape_id
                ))
            })?;
            let shape: &Shape = &shapes[owner];
            if !record.construction_kind.supports(shape.family()) || !record.params.fits(shape) {
                return Err(PersistError::Malformed(format!(
                    "line {:?} does not fit its {} owner",
                    record.id,
                    shape.tag()
                ))
                .into());
            }
            if !record.style.is_valid() {
                return Err(PersistError::Malformed(format!(
                    "line {:?} has an invalid style",
                    record.id
                ))
                .into());
            }
            aux_lines.insert(
                AuxiliaryLine::new(owner, record.params).with_style(record.style.clone()),
            );
        }

        Ok(Restored {
            shapes,
            aux_lines,
            order,
        })
    }
}

impl ShapeStore {
    /// Captures every shape and every live auxiliary line. Orphaned lines
    /// are left out.
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        let shapes = self
            .shapes()
            .map(|(id, shape)| ShapeRecord::from_shape(id, shape))
            .collect();
        let aux_lines = self
            .aux_lines()
            .filter(|(id, line)| {
                let live = self.shapes.contains_key(line.owner());
                if !live {
                    warn!(?id, "orphaned auxiliary line left out of snapshot");
                }
                live
            })
            .map(|(id, line)| AuxLineRecord::from_line(id, line))
            .collect();
        SceneSnapshot { shapes, aux_lines }
    }

    /// Serializes the scene as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        self.snapshot().to_json()
    }

    /// Replaces the scene with `snapshot`. Shapes and lines get fresh ids;
    /// line owners are re-bound through the snapshot's shape ids.
    ///
    /// # Errors
    ///
    /// Returns an error if any record is invalid. The store is left
    /// unchanged in that case.
    pub fn load_snapshot(&mut self, snapshot: &SceneSnapshot) -> Result<()> {
        let restored = snapshot.restore().inspect_err(|e| {
            warn!(%e, "snapshot rejected; scene left unchanged");
        })?;
        self.shapes = restored.shapes;
        self.aux_lines = restored.aux_lines;
        self.order = restored.order;
        debug!(
            shapes = self.shapes.len(),
            aux_lines = self.aux_lines.len(),
            "snapshot loaded"
        );
        Ok(())
    }

    /// Replaces the scene with the snapshot in `json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid snapshot. The store is
    /// left unchanged in that case.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let snapshot = SceneSnapshot::from_json(json).inspect_err(|e| {
            warn!(%e, "snapshot rejected; scene left unchanged");
        })?;
        self.load_snapshot(&snapshot)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GeosketchError;
    use approx::assert_abs_diff_eq;

    fn scene() -> (ShapeStore, ShapeId) {
        let mut store = ShapeStore::new();
        store.create_shape("rectangle").unwrap();
        let t = store.create_shape("triangle-isosceles").unwrap();
        store.create_shape("polygon-6").unwrap();
        store
            .add_aux_line(AuxiliaryLine::new(t, AuxParams::Altitude { vertex: 0 }))
            .unwrap();
        (store, t)
    }

    #[test]
    fn round_trip_preserves_shapes() {
        let (store, _) = scene();
        let json = store.to_json().unwrap();

        let mut loaded = ShapeStore::new();
        loaded.load_json(&json).unwrap();

        assert_eq!(loaded.shape_count(), store.shape_count());
        for ((_, a), (_, b)) in store.shapes().zip(loaded.shapes()) {
            assert_eq!(a.tag(), b.tag());
            assert_eq!(a.style, b.style);
            assert_eq!(a.meta, b.meta);
            for (p, q) in a.vertices().iter().zip(b.vertices()) {
                assert_abs_diff_eq!(p.x, q.x, epsilon = 1e-9);
                assert_abs_diff_eq!(p.y, q.y, epsilon = 1e-9);
            }
        }
        assert_eq!(loaded.aux_lines().count(), 1);
    }

    #[test]
    fn round_trip_rebinds_owner() {
        let (store, _) = scene();
        let mut loaded = ShapeStore::new();
        loaded.load_json(&store.to_json().unwrap()).unwrap();

        let (line_id, line) = loaded.aux_lines().next().unwrap();
        let owner = loaded.shape(line.owner()).unwrap();
        assert_eq!(owner.tag().to_string(), "triangle-isosceles");
        assert!(loaded.aux_geometry(line_id).unwrap().is_some());
    }

    #[test]
    fn json_field_names() {
        let (store, _) = scene();
        let value: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
        let shape = &value["shapes"][1];
        assert_eq!(shape["familyKind"], "triangle");
        assert_eq!(shape["subKind"], "isosceles");
        assert!(shape["vertices"][0]["x"].is_number());
        let line = &value["auxLines"][0];
        assert_eq!(line["constructionKind"], "altitude");
        assert_eq!(line["params"]["kind"], "altitude");
        assert!(line.get("ownerShapeId").is_some());
    }

    #[test]
    fn orphan_fails_whole_load() {
        let (store, _) = scene();
        let mut snapshot = store.snapshot();
        snapshot.shapes.remove(1);

        let mut target = ShapeStore::new();
        let existing = target.create_shape("kite").unwrap();
        let err = target.load_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, GeosketchError::Persist(PersistError::Malformed(_))));
        assert!(target.shape(existing).is_ok());
        assert_eq!(target.shape_count(), 1);
    }

    #[test]
    fn kind_mismatch_rejected() {
        let (store, _) = scene();
        let mut snapshot = store.snapshot();
        snapshot.aux_lines[0].construction_kind = ConstructionKind::Median;
        assert!(ShapeStore::new().load_snapshot(&snapshot).is_err());
    }

    #[test]
    fn wrong_vertex_count_rejected() {
        let (store, _) = scene();
        let mut snapshot = store.snapshot();
        snapshot.shapes[0].vertices.pop();
        let err = ShapeStore::new().load_snapshot(&snapshot).unwrap_err();
        assert!(matches!(
            err,
            GeosketchError::Persist(PersistError::VertexCount { found: 3, .. })
        ));
    }

    #[test]
    fn invalid_json_leaves_store_untouched() {
        let (mut store, t) = scene();
        assert!(matches!(
            store.load_json("{\"shapes\": [").unwrap_err(),
            GeosketchError::Persist(PersistError::Json(_))
        ));
        assert!(store.shape(t).is_ok());
        assert_eq!(store.shape_count(), 3);
    }

    #[test]
    fn snapshot_skips_orphans() {
        let (mut store, t) = scene();
        store.remove_shape(t).unwrap();
        let snapshot = store.snapshot();
        assert!(snapshot.aux_lines.is_empty());
        assert_eq!(snapshot.shapes.len(), 2);
    }
}
