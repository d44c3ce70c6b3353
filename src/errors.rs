use thiserror::Error;

/// Errors raised while setting up a compile (catalog construction, configuration).
///
/// The compile path itself never returns these: malformed model output is always
/// recovered with a logged fallback.
#[derive(Error, Debug)]
pub enum CompilerError {
    /// A catalog was built from an empty template list.
    #[error("Template catalog is empty")]
    EmptyCatalog,

    /// Two templates in one catalog share an id.
    #[error("Duplicate layout id in catalog: {0}")]
    DuplicateLayout(String),

    /// The catalog's designated default layout is not one of its templates.
    #[error("Default layout '{0}' is not in the catalog")]
    UnknownDefaultLayout(String),

    /// Configuration values that cannot work together (e.g. an inverted font range).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error occurred while (de)serializing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A type alias for `Result<T, CompilerError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, CompilerError>;
