//! Auxiliary construction lines: medians, altitudes, bisectors and friends,
//! bound to a shape by id and re-derived from its live vertices.

mod derive;
mod kind;
mod line;
mod pick;
mod session;

pub use kind::{ConstructionKind, Element, ElementKind, ExtensionMode};
pub use line::{AuxGeometry, AuxLineId, AuxParams, AuxiliaryLine};
pub use pick::pick_element;
pub use session::{ConstructionSession, SelectOutcome, SessionState};
