//! Edits applied to shapes in a [`ShapeStore`](crate::store::ShapeStore).
//!
//! Each operation is a small struct built with `new(..)` and run with
//! `execute(&mut store)`.

pub mod edit;
pub mod transform;
