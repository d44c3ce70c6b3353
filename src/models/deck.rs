use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::models::{element::ElementRecord, theme::Background};

/// Raw, un-normalized fields of one slide as the LLM produced them.
pub type RawFields = Map<String, JsonValue>;

/// One slide of an incoming deck payload before normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSlide {
    /// Layout the LLM asked for, if any.
    pub requested_layout: Option<String>,
    pub fields: RawFields,
}

/// A parsed deck payload: optional title plus raw slides in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeckSpec {
    pub title: Option<String>,
    pub slides: Vec<RawSlide>,
}

/// One entry of a slide outline (the first phase of two-phase generation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineItem {
    pub layout: String,
    pub title: String,
    pub focus: String,
}

/// A slide after compilation: final layout, background and resolved elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledSlide {
    /// The stable per-slide key element ids are namespaced by.
    pub id: String,
    pub layout: String,
    pub background: Background,
    pub elements: Vec<ElementRecord>,
}

/// The compiler output for a whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledDeck {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    pub theme: String,
    pub slides: Vec<CompiledSlide>,
}
