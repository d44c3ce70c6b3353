use thiserror::Error;

/// Errors raised while comparing compiled decks.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Text diff generation failed: {0}")]
    Format(#[from] std::fmt::Error),

    /// The builder was asked for a comparer before a base deck was set.
    #[error("Base deck not set")]
    MissingBase,
}
