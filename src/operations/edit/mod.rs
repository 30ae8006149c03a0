mod drag;
mod insert;
mod remove;

pub use drag::{DragOutcome, DragVertex};
pub use insert::InsertVertex;
pub use remove::RemoveVertex;
