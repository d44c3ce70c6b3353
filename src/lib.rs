//! Compiles loosely-structured slide payloads written by language models into positioned,
//! collision-free, contrast-safe slide decks.
//!
//! The pipeline runs repair and parsing, shorthand decoding, slot normalization, layout
//! classification, template rendering and geometry resolution, in that order. Every stage
//! recovers from malformed input with a logged fallback, so compiling never fails.

pub mod classify;
pub mod compiler;
pub mod config;
pub mod converters;
pub mod errors;
pub mod ingest;
pub mod models;
pub mod templates;
pub mod wasm;

pub use classify::{Classifier, ScoringTable};
pub use compiler::{DeckCompiler, ImageRequest};
pub use config::CompilerConfig;
pub use converters::markdown;
pub use errors::{CompilerError, Result};
pub use models::deck::{CompiledDeck, CompiledSlide, DeckSpec};
pub use models::template::AssetCache;
pub use templates::Catalog;

// features
#[cfg(feature = "diff")]
pub mod diff;
#[cfg(feature = "diff")]
pub use diff::comparer::ComparerBuilder;
