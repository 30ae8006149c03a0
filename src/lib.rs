pub mod animation;
pub mod auxiliary;
pub mod config;
pub mod constraint;
pub mod error;
pub mod math;
pub mod operations;
pub mod shape;
pub mod store;

pub use config::EditorConfig;
pub use error::{GeosketchError, Result};
