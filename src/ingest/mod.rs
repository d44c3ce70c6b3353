//! Ingestion of model output: JSON repair, shorthand decoding, slot normalization.

pub mod csv;
pub mod deck;
pub mod normalize;
pub mod repair;
pub mod shorthand;

pub use deck::{parse_deck, parse_outline, parse_slide};
pub use normalize::normalize;
pub use repair::{repair, safe_parse};
pub use shorthand::{decode_chart, decode_table};
