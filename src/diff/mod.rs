//! Comparison of two compiled decks: a structured change list over their JSON form, a
//! readable per-slide summary and unified text diffs.

pub mod comparer;
pub mod error;
pub(crate) mod formatting;
pub mod markdown;
pub mod structured;

pub use comparer::{Comparer, ComparerBuilder, ComparisonResult};
pub use error::DiffError;
pub use markdown::generate_markdown_diff;
pub use structured::{Change, ChangeType, ValueRepr};
