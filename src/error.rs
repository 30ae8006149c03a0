use thiserror::Error;

/// Top-level error type for the Geosketch engine.
#[derive(Debug, Error)]
pub enum GeosketchError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("vertex index {index} is out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Errors related to the shape store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("shape not found: {0}")]
    ShapeNotFound(String),

    #[error("auxiliary line not found: {0}")]
    AuxLineNotFound(String),

    #[error("auxiliary line {line} refers to removed shape {shape}")]
    OrphanedAuxLine { line: String, shape: String },

    #[error("operation not allowed: {0}")]
    NotAllowed(String),
}

/// Errors related to auxiliary-line constructions.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("{kind} construction is not supported on {family} shapes")]
    UnsupportedFamily { kind: String, family: String },

    #[error("selection does not match construction: {0}")]
    SelectionMismatch(String),
}

/// Errors related to snapshot persistence.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown shape tag: {0}")]
    UnknownTag(String),

    #[error("shape tag {tag} expects {expected} vertices, found {found}")]
    VertexCount {
        tag: String,
        expected: String,
        found: usize,
    },

    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

/// Convenience type alias for results using [`GeosketchError`].
pub type Result<T> = std::result::Result<T, GeosketchError>;
