use tracing::debug;

use super::kind::{ConstructionKind, Element, ExtensionMode};
use super::line::{AuxLineId, AuxParams, AuxiliaryLine};
use super::pick::pick_element;
use crate::error::Result;
use crate::math::Point2;
use crate::shape::{Shape, ShapeId};
use crate::store::ShapeStore;

/// Where a construction session currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Inactive,
    Collecting {
        kind: ConstructionKind,
        shape: ShapeId,
        selections: Vec<Element>,
    },
}

/// Result of feeding one element into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// No session, wrong shape, or an element the construction cannot use.
    Ignored,
    /// Accepted; `remaining` more elements are needed.
    Pending { remaining: usize },
    /// The construction completed and its line was added to the store.
    Complete(AuxLineId),
}

/// Collects the element picks for one auxiliary-line construction.
///
/// `Inactive → Collecting → Inactive`, leaving `Collecting` when the
/// selection reaches the kind's arity or on [`cancel`](Self::cancel).
#[derive(Debug, Clone, Default)]
pub struct ConstructionSession {
    state: SessionState,
    mode: ExtensionMode,
}

impl ConstructionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Collecting { .. })
    }

    /// Elements picked so far in the running session.
    #[must_use]
    pub fn selections(&self) -> &[Element] {
        match &self.state {
            SessionState::Collecting { selections, .. } => selections,
            SessionState::Inactive => &[],
        }
    }

    /// Direction used by the next `extension` construction.
    #[must_use]
    pub fn extension_mode(&self) -> ExtensionMode {
        self.mode
    }

    pub fn set_extension_mode(&mut self, mode: ExtensionMode) {
        self.mode = mode;
    }

    /// Starts collecting for `kind` on `shape`.
    ///
    /// Returns `false` and leaves the session untouched if the shape does
    /// not exist or its family does not support `kind`.
    pub fn activate(&mut self, store: &ShapeStore, kind: ConstructionKind, shape: ShapeId) -> bool {
        let Ok(target) = store.shape(shape) else {
            debug!(%kind, "construction rejected: shape not found");
            return false;
        };
        if !kind.supports(target.family()) {
            debug!(%kind, family = %target.family(), "construction rejected: unsupported family");
            return false;
        }
        debug!(%kind, ?shape, "construction session started");
        self.state = SessionState::Collecting {
            kind,
            shape,
            selections: Vec::with_capacity(kind.arity()),
        };
        true
    }

    /// Discards any partial selection. Returns whether a session was running.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        if was_active {
            debug!("construction session cancelled");
        }
        self.state = SessionState::Inactive;
        was_active
    }

    /// Feeds one picked element into the session.
    ///
    /// When the selection completes, the line is added to `store` and the
    /// session returns to inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if the session's shape was removed from the store
    /// (the session is reset) or the finished construction is rejected by
    /// the store.
    pub fn select(
        &mut self,
        store: &mut ShapeStore,
        shape: ShapeId,
        element: Element,
    ) -> Result<SelectOutcome> {
        let SessionState::Collecting {
            kind,
            shape: target,
            selections,
        } = &mut self.state
        else {
            return Ok(SelectOutcome::Ignored);
        };
        if *target != shape {
            return Ok(SelectOutcome::Ignored);
        }
        let kind = *kind;

        let owner = match store.shape(shape) {
            Ok(owner) => owner,
            Err(e) => {
                self.state = SessionState::Inactive;
                return Err(e.into());
            }
        };
        let picked: Vec<_> = selections.iter().map(|e| e.kind()).collect();
        if !element_exists(owner, element)
            || selections.contains(&element)
            || !kind.accepts_next(&picked, element.kind())
        {
            return Ok(SelectOutcome::Ignored);
        }

        selections.push(element);
        let remaining = kind.arity() - selections.len();
        if remaining > 0 {
            debug!(%kind, ?element, remaining, "construction element selected");
            return Ok(SelectOutcome::Pending { remaining });
        }

        let elements = std::mem::take(selections);
        self.state = SessionState::Inactive;
        let params = AuxParams::from_selection(kind, &elements, self.mode)?;
        let id = store.add_aux_line(AuxiliaryLine::new(shape, params))?;
        debug!(%kind, ?id, "construction completed");
        Ok(SelectOutcome::Complete(id))
    }

    /// Picks the element under `pointer` on the session's shape and feeds it
    /// into the session.
    ///
    /// # Errors
    ///
    /// See [`select`](Self::select).
    pub fn pick(&mut self, store: &mut ShapeStore, pointer: &Point2) -> Result<SelectOutcome> {
        match self.hover(store, pointer) {
            Some((shape, element)) => self.select(store, shape, element),
            None => Ok(SelectOutcome::Ignored),
        }
    }

    /// The element `pointer` would pick, for highlighting. Does not change
    /// the session.
    #[must_use]
    pub fn hover(&self, store: &ShapeStore, pointer: &Point2) -> Option<(ShapeId, Element)> {
        let SessionState::Collecting { shape, .. } = &self.state else {
            return None;
        };
        let target = store.shape(*shape).ok()?;
        pick_element(target, pointer, store.config().pick_radius).map(|e| (*shape, e))
    }
}

fn element_exists(shape: &Shape, element: Element) -> bool {
    match element {
        Element::Vertex(i) => i < shape.vertices().len(),
        Element::Edge(i) => i < shape.edge_count(),
    }
}
