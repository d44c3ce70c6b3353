//! Deck-level payload parsing: whole decks, single slides and outlines.

use log::{debug, warn};
use serde_json::Value as JsonValue;

use crate::ingest::normalize::{is_falsy, normalize, value_to_string};
use crate::ingest::repair::safe_parse;
use crate::models::content::ContentSpec;
use crate::models::deck::{DeckSpec, OutlineItem, RawFields, RawSlide};
use crate::templates::Catalog;

/// Keys a slide object may carry its layout under, in priority order.
const LAYOUT_KEYS: &[&str] = &["layout", "slide_layout", "slide_type"];
/// Keys a slide object may nest its content under, in priority order.
const CONTENT_KEYS: &[&str] = &["content", "slots"];

impl RawSlide {
    /// Splits one slide object into its layout tag and its content fields.
    ///
    /// Content comes from the first truthy `content`/`slots` entry; when neither exists
    /// the slide object itself is the content. Non-object input yields an empty slide.
    pub fn from_value(value: &JsonValue) -> RawSlide {
        let Some(object) = value.as_object() else {
            warn!("Slide entry is not an object: {}", value);
            return RawSlide::default();
        };

        let requested_layout = LAYOUT_KEYS
            .iter()
            .filter_map(|k| object.get(*k))
            .find(|v| !is_falsy(v))
            .map(value_to_string);

        let nested = CONTENT_KEYS
            .iter()
            .filter_map(|k| object.get(*k))
            .find(|v| !is_falsy(v));
        let fields = match nested {
            Some(JsonValue::Object(map)) => map.clone(),
            Some(other) => {
                warn!("Slide content is not an object, ignoring: {}", other);
                RawFields::new()
            }
            None => object.clone(),
        };

        RawSlide {
            requested_layout,
            fields,
        }
    }
}

/// Parses a whole deck payload.
///
/// Accepts `{"title": ..., "slides": [...]}` or a bare array of slides. Anything else
/// (including text that cannot be repaired) yields an empty deck.
pub fn parse_deck(raw: &str) -> DeckSpec {
    let value: JsonValue = safe_parse(raw, JsonValue::Null);
    let (title, slides) = match &value {
        JsonValue::Array(slides) => (None, slides.as_slice()),
        JsonValue::Object(object) => (
            object
                .get("title")
                .filter(|t| !is_falsy(t))
                .map(value_to_string),
            object
                .get("slides")
                .and_then(JsonValue::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        ),
        _ => (None, &[][..]),
    };

    debug!("Parsed deck payload with {} slides", slides.len());
    DeckSpec {
        title,
        slides: slides.iter().map(RawSlide::from_value).collect(),
    }
}

/// Parses and normalizes a single slide payload.
///
/// The layout tag inside the payload wins over `requested_layout`.
pub fn parse_slide(raw: &str, requested_layout: &str, catalog: &Catalog) -> ContentSpec {
    let value: JsonValue = safe_parse(raw, JsonValue::Object(RawFields::new()));
    let slide = RawSlide::from_value(&value);
    let layout = slide.requested_layout.as_deref().unwrap_or(requested_layout);
    normalize(&slide.fields, layout, catalog)
}

/// Parses the outline produced by the first phase of two-phase generation.
///
/// Accepts a bare array or an object with a `slides` array. Missing fields default to
/// layout `content`, title `Untitled Slide` and an empty focus.
pub fn parse_outline(raw: &str) -> Vec<OutlineItem> {
    let value: JsonValue = safe_parse(raw, JsonValue::Array(Vec::new()));
    let items: &[JsonValue] = match &value {
        JsonValue::Array(items) => items.as_slice(),
        JsonValue::Object(object) => object
            .get("slides")
            .and_then(JsonValue::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    };

    let field = |item: &JsonValue, key: &str, default: &str| {
        item.get(key)
            .filter(|v| !is_falsy(v))
            .map(value_to_string)
            .unwrap_or_else(|| default.to_string())
    };

    items
        .iter()
        .map(|item| OutlineItem {
            layout: field(item, "layout", "content"),
            title: field(item, "title", "Untitled Slide"),
            focus: field(item, "focus", ""),
        })
        .collect()
}
