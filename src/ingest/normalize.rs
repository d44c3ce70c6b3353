//! Maps raw model content onto a template's declared slots.

use log::{debug, warn};
use serde_json::Value as JsonValue;

use crate::ingest::shorthand::{decode_chart, decode_table};
use crate::models::content::{
    ChartSpec, ContentSpec, ImageSpec, ImageStyle, SlotValue, TableSpec,
};
use crate::models::deck::RawFields;
use crate::templates::Catalog;

/// Prompt used when an image slot carries nothing usable.
pub const DEFAULT_IMAGE_PROMPT: &str = "Visual representation of the slide topic";

/// Alternative field names models use for each canonical slot, tried in order.
pub const SLOT_ALIASES: &[(&str, &[&str])] = &[
    ("title", &["header", "heading", "slide_title", "main_title", "subject"]),
    ("subtitle", &["sub_header", "subheading", "intro", "tagline"]),
    (
        "points",
        &["bullets", "list", "content_points", "items", "bullet_points", "text_list"],
    ),
    (
        "text",
        &[
            "body",
            "content_text",
            "paragraph",
            "description",
            "main_body",
            "quote_text",
            "quote",
        ],
    ),
    ("left_text", &["column1", "left_content", "side_a", "left"]),
    ("right_text", &["column2", "right_content", "side_b", "right"]),
    ("left_title", &["left_heading", "left_header"]),
    ("right_title", &["right_heading", "right_header"]),
    ("left_points", &["pros", "advantages", "left_list", "left_items"]),
    ("right_points", &["cons", "disadvantages", "right_list", "right_items"]),
    ("image", &["picture", "visual", "graphic", "photo", "illustration"]),
    ("second_image", &["image_2", "image2", "secondary_image", "picture_2"]),
    ("background_image", &["bg_image", "cover_image", "hero_image"]),
    ("caption", &["image_caption", "subtext", "label", "author", "source"]),
    ("statistic", &["stat", "number", "figure", "metric", "value"]),
    ("table", &["data_table", "comparison_table", "stats_table"]),
    ("chart", &["graph", "data_chart", "visualization", "plot"]),
];

/// The value shape a slot is coerced to, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Chart,
    Table,
    Image,
    List,
    Text,
}

impl SlotKind {
    pub fn of(slot: &str) -> Self {
        if slot.contains("chart") {
            SlotKind::Chart
        } else if slot.contains("table") {
            SlotKind::Table
        } else if slot.contains("image") {
            SlotKind::Image
        } else if slot.contains("points") || slot.contains("list") {
            SlotKind::List
        } else {
            SlotKind::Text
        }
    }
}

/// The aliases registered for a slot (empty for slots without any).
pub fn aliases_for(slot: &str) -> &'static [&'static str] {
    SLOT_ALIASES
        .iter()
        .find(|(name, _)| *name == slot)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Looks a slot up by exact name, then by alias. `null` counts as absent.
pub fn lookup<'a>(raw: &'a RawFields, slot: &str) -> Option<&'a JsonValue> {
    let present = |key: &str| raw.get(key).filter(|v| !v.is_null());
    if let Some(value) = present(slot) {
        return Some(value);
    }
    let hit = aliases_for(slot)
        .iter()
        .find_map(|alias| present(alias).map(|v| (*alias, v)));
    if let Some((alias, value)) = hit {
        debug!("Slot '{}' filled from alias '{}'", slot, alias);
        return Some(value);
    }
    None
}

/// JavaScript-style truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_falsy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64() == Some(0.0),
        JsonValue::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Renders a JSON value as slide text. Integral numbers print without a fraction,
/// arrays become one line per non-empty item and objects stay as JSON.
pub fn value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items
            .iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        JsonValue::Object(_) => value.to_string(),
    }
}

fn tagged_as(value: &JsonValue, tag: &str) -> bool {
    match value.get("type").and_then(JsonValue::as_str) {
        Some(t) => t.eq_ignore_ascii_case(tag),
        None => true,
    }
}

fn coerce_chart(slot: &str, value: Option<&JsonValue>) -> ChartSpec {
    match value {
        Some(JsonValue::String(s)) => decode_chart(s),
        Some(v @ JsonValue::Object(_)) if tagged_as(v, "chart") => {
            match serde_json::from_value::<ChartSpec>(v.clone()) {
                Ok(chart) => chart.conform(),
                Err(e) => {
                    warn!("Slot '{}' has a malformed chart object: {}", slot, e);
                    ChartSpec::empty()
                }
            }
        }
        _ => ChartSpec::empty(),
    }
}

fn coerce_table(slot: &str, value: Option<&JsonValue>) -> TableSpec {
    match value {
        Some(JsonValue::String(s)) => decode_table(s),
        Some(v @ JsonValue::Object(_)) if tagged_as(v, "table") => {
            match serde_json::from_value::<TableSpec>(v.clone()) {
                Ok(table) => table.conform(),
                Err(e) => {
                    warn!("Slot '{}' has a malformed table object: {}", slot, e);
                    TableSpec::default()
                }
            }
        }
        _ => TableSpec::default(),
    }
}

fn coerce_image(value: Option<&JsonValue>) -> ImageSpec {
    match value {
        Some(JsonValue::String(prompt)) if !prompt.trim().is_empty() => ImageSpec::new(prompt.trim()),
        Some(v @ JsonValue::Object(_)) => {
            let prompt = v
                .get("prompt")
                .and_then(JsonValue::as_str)
                .filter(|p| !p.trim().is_empty());
            match prompt {
                Some(prompt) => ImageSpec {
                    prompt: prompt.trim().to_string(),
                    style: v
                        .get("style")
                        .and_then(|s| serde_json::from_value::<ImageStyle>(s.clone()).ok()),
                },
                None => ImageSpec::new(DEFAULT_IMAGE_PROMPT),
            }
        }
        _ => ImageSpec::new(DEFAULT_IMAGE_PROMPT),
    }
}

fn coerce_list(value: Option<&JsonValue>) -> Vec<String> {
    match value {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(value_to_string)
            .collect(),
        Some(v) if !is_falsy(v) => vec![value_to_string(v)],
        _ => Vec::new(),
    }
}

fn coerce_text(value: Option<&JsonValue>) -> String {
    match value {
        Some(v) if !is_falsy(v) => value_to_string(v),
        _ => String::new(),
    }
}

/// Coerces one raw value into the shape its slot name calls for.
pub fn coerce_slot(slot: &str, value: Option<&JsonValue>) -> SlotValue {
    match SlotKind::of(slot) {
        SlotKind::Chart => SlotValue::Chart(coerce_chart(slot, value)),
        SlotKind::Table => SlotValue::Table(coerce_table(slot, value)),
        SlotKind::Image => SlotValue::Image(coerce_image(value)),
        SlotKind::List => SlotValue::List(coerce_list(value)),
        SlotKind::Text => SlotValue::Text(coerce_text(value)),
    }
}

/// Normalizes raw slide content against a catalog template.
///
/// The template is resolved through [`Catalog::resolve`] (exact id, fuzzy id, then the
/// catalog default). Every slot the template declares is then filled, from the exact
/// key or an alias, and coerced to its slot kind.
///
/// # Arguments
///
/// * `raw` - The slide's content fields as the model produced them.
/// * `requested_layout` - The layout id the model (or classifier) asked for.
/// * `catalog` - The deck-mode catalog to resolve against.
///
/// # Returns
///
/// A [`ContentSpec`] holding exactly the resolved template's slots, in declaration order.
pub fn normalize(raw: &RawFields, requested_layout: &str, catalog: &Catalog) -> ContentSpec {
    let template = catalog.resolve(requested_layout);
    let mut spec = ContentSpec::new(template.id.clone());
    for slot in &template.slots {
        let value = coerce_slot(slot, lookup(raw, slot));
        spec.slots.insert(slot.clone(), value);
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::ChartKind;
    use serde_json::json;

    fn fields(value: JsonValue) -> RawFields {
        match value {
            JsonValue::Object(map) => map,
            _ => RawFields::new(),
        }
    }

    #[test]
    fn slot_kinds_follow_names() {
        assert_eq!(SlotKind::of("chart"), SlotKind::Chart);
        assert_eq!(SlotKind::of("table"), SlotKind::Table);
        assert_eq!(SlotKind::of("background_image"), SlotKind::Image);
        assert_eq!(SlotKind::of("left_points"), SlotKind::List);
        assert_eq!(SlotKind::of("caption"), SlotKind::Text);
    }

    #[test]
    fn aliases_fill_missing_slots() {
        let raw = fields(json!({"heading": "Plan", "bullets": ["a", "b"], "title_extra": 1}));
        assert_eq!(lookup(&raw, "title"), Some(&json!("Plan")));
        assert_eq!(lookup(&raw, "points"), Some(&json!(["a", "b"])));
        assert_eq!(lookup(&raw, "caption"), None);

        let raw = fields(json!({"title": null, "header": "From alias"}));
        assert_eq!(lookup(&raw, "title"), Some(&json!("From alias")));
    }

    #[test]
    fn coercion_by_slot_kind() {
        assert_eq!(
            coerce_slot("points", Some(&json!("single"))),
            SlotValue::List(vec!["single".into()])
        );
        assert_eq!(coerce_slot("points", Some(&json!(""))), SlotValue::List(vec![]));
        assert_eq!(coerce_slot("text", Some(&json!(42))), SlotValue::Text("42".into()));
        assert_eq!(coerce_slot("text", Some(&json!(0))), SlotValue::Text(String::new()));
        assert_eq!(
            coerce_slot("text", Some(&json!(["one", "two"]))),
            SlotValue::Text("one\ntwo".into())
        );
        assert_eq!(
            coerce_slot("image", Some(&json!({"type": "image", "prompt": "a fox", "style": "photo"}))),
            SlotValue::Image(ImageSpec {
                prompt: "a fox".into(),
                style: Some(ImageStyle::Photo),
            })
        );
        assert_eq!(
            coerce_slot("image", Some(&json!(7))),
            SlotValue::Image(ImageSpec::new(DEFAULT_IMAGE_PROMPT))
        );
    }

    #[test]
    fn charts_decode_or_pass_through() {
        let SlotValue::Chart(decoded) = coerce_slot("chart", Some(&json!("PIE|A,B|S:1,2"))) else {
            panic!("expected chart");
        };
        assert_eq!(decoded.kind, ChartKind::Pie);

        let object = json!({"type": "chart", "chartType": "LINE", "labels": ["a", "b"],
                            "datasets": [{"label": "s", "data": [1, 2, 3]}]});
        let SlotValue::Chart(passed) = coerce_slot("chart", Some(&object)) else {
            panic!("expected chart");
        };
        assert_eq!(passed.kind, ChartKind::Line);
        assert_eq!(passed.series[0].values, vec![1.0, 2.0]);

        assert_eq!(
            coerce_slot("chart", Some(&json!({"type": "table"}))),
            SlotValue::Chart(ChartSpec::empty())
        );
        assert_eq!(coerce_slot("table", None), SlotValue::Table(TableSpec::default()));
    }

    #[test]
    fn normalize_fills_exactly_the_declared_slots() {
        let catalog = Catalog::standard();
        let raw = fields(json!({"header": "Why", "items": "only one", "unrelated": true}));
        let spec = normalize(&raw, "content", &catalog);
        assert_eq!(spec.layout_id, "content");
        assert_eq!(spec.slots.keys().collect::<Vec<_>>(), vec!["title", "points"]);
        assert_eq!(spec.text("title"), "Why");
        assert_eq!(spec.items("points"), vec!["only one"]);
    }

    #[test]
    fn unknown_layout_resolves_through_catalog() {
        let catalog = Catalog::standard();
        let spec = normalize(&RawFields::new(), "chart", &catalog);
        assert_eq!(spec.layout_id, "chart_focus");
        assert!(matches!(spec.get("chart"), Some(SlotValue::Chart(_))));

        let spec = normalize(&RawFields::new(), "does-not-exist", &catalog);
        assert_eq!(spec.layout_id, catalog.default_template().id);
        for slot in &catalog.default_template().slots {
            assert!(spec.slots.contains_key(slot));
        }
    }
}
