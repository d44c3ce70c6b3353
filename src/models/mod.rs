//! Serde data model shared by every compiler stage.

pub mod content;
pub mod deck;
pub mod element;
pub mod template;
pub mod theme;
