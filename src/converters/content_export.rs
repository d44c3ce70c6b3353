//! Rebuilds slot content from compiled slides, so an edited deck can be fed back
//! through the compiler.
//!
//! Each element's `slot` back-reference says where its content came from. The trip is
//! lossy where templates transform text (upper-cased titles, team roles, default
//! titles), but every slot value survives in a form the normalizer accepts.

use log::debug;
use serde_json::{json, Map, Value as JsonValue};

use crate::ingest::normalize::SlotKind;
use crate::models::content::{ChartSeries, ChartSpec, ContentSpec, ImageSpec, SlotValue, TableSpec};
use crate::models::deck::{CompiledDeck, CompiledSlide};
use crate::models::element::{ElementKind, ElementRecord};
use crate::templates::helpers::{BULLET_PREFIXES, PLACEHOLDER_PROMPT, TEXT_PREFIXES};

fn strip_any<'a>(text: &'a str, prefixes: &[&str]) -> &'a str {
    prefixes
        .iter()
        .find_map(|p| text.strip_prefix(p))
        .unwrap_or(text)
}

fn list_items(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| strip_any(line.trim(), BULLET_PREFIXES).trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// The slot value an element holds, or `None` for elements without content.
fn element_value(element: &ElementRecord, slot: &str) -> Option<SlotValue> {
    match &element.kind {
        ElementKind::Text { .. } if element.style.extra.contains_key("placeholderFor") => {
            let prompt = element
                .style
                .extra
                .get("prompt")
                .and_then(JsonValue::as_str)
                .unwrap_or(PLACEHOLDER_PROMPT);
            Some(SlotValue::Image(ImageSpec::new(prompt)))
        }
        ElementKind::Text { content } => Some(match SlotKind::of(slot) {
            SlotKind::List => SlotValue::List(list_items(content)),
            _ => SlotValue::Text(strip_any(content.trim(), TEXT_PREFIXES).to_string()),
        }),
        ElementKind::Image { prompt, .. } => Some(SlotValue::Image(ImageSpec::new(
            prompt.as_deref().unwrap_or(PLACEHOLDER_PROMPT),
        ))),
        ElementKind::Table { cell_data, .. } => {
            let mut rows = cell_data
                .iter()
                .map(|row| row.iter().map(|cell| cell.content.clone()).collect::<Vec<_>>());
            let headers = rows.next().unwrap_or_default();
            Some(SlotValue::Table(TableSpec {
                headers,
                rows: rows.collect(),
            }))
        }
        ElementKind::Chart { chart_type, data } => Some(SlotValue::Chart(ChartSpec {
            kind: *chart_type,
            labels: data.labels.clone(),
            series: data
                .datasets
                .iter()
                .map(|d| ChartSeries {
                    name: d.label.clone(),
                    values: d.data.clone(),
                })
                .collect(),
        })),
        ElementKind::Shape { .. } | ElementKind::Icon { .. } => None,
    }
}

/// Rebuilds the content of a compiled slide from its elements' slot back-references.
///
/// Elements sharing a list slot (columns, process steps) are merged in element order;
/// for other slots the first element wins.
pub fn slide_to_content(slide: &CompiledSlide) -> ContentSpec {
    let mut content = ContentSpec::new(slide.layout.clone());
    for element in &slide.elements {
        let Some(slot) = element.slot.as_deref() else {
            continue;
        };
        let Some(value) = element_value(element, slot) else {
            continue;
        };
        if let Some(existing) = content.slots.get_mut(slot) {
            match (existing, value) {
                (SlotValue::List(items), SlotValue::List(more)) => items.extend(more),
                _ => debug!("Slot '{}' already filled, skipping {}", slot, element.id),
            }
            continue;
        }
        content.slots.insert(slot.to_string(), value);
    }
    content
}

/// The payload form of a slot value, as a model would write it.
pub fn slot_value_to_json(value: &SlotValue) -> JsonValue {
    match value {
        SlotValue::Text(text) => JsonValue::String(text.clone()),
        SlotValue::List(items) => json!(items),
        SlotValue::Image(image) => json!({ "prompt": image.prompt }),
        SlotValue::Table(table) => json!({ "headers": table.headers, "rows": table.rows }),
        SlotValue::Chart(chart) => serde_json::to_value(chart).unwrap_or_default(),
    }
}

/// Serializes a compiled deck back into a deck payload that recompiles to the same
/// layouts.
pub fn deck_to_payload(deck: &CompiledDeck) -> JsonValue {
    let slides: Vec<JsonValue> = deck
        .slides
        .iter()
        .map(|slide| {
            let spec = slide_to_content(slide);
            let content: Map<String, JsonValue> = spec
                .slots
                .iter()
                .map(|(slot, value)| (slot.clone(), slot_value_to_json(value)))
                .collect();
            json!({ "layout": spec.layout_id, "content": content })
        })
        .collect();

    let mut payload = Map::new();
    if let Some(title) = &deck.title {
        payload.insert("title".to_string(), JsonValue::String(title.clone()));
    }
    payload.insert("slides".to_string(), JsonValue::Array(slides));
    JsonValue::Object(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::DeckCompiler;
    use crate::config::CompilerConfig;
    use crate::models::content::ChartKind;
    use crate::models::template::AssetCache;

    fn compile(payload: &str) -> CompiledDeck {
        DeckCompiler::for_topic("Review", false, CompilerConfig::default())
            .expect("compiler")
            .compile_payload(payload, &AssetCache::new())
    }

    #[test]
    fn bullets_and_prefixes_are_stripped() {
        let deck = compile(
            r#"[{"layout": "content", "title": "Plan", "points": ["Ship it", "Measure"]},
                {"layout": "quote", "text": "Less is more", "caption": "Mies"}]"#,
        );
        let content = slide_to_content(&deck.slides[0]);
        assert_eq!(content.layout_id, "content");
        assert_eq!(content.text("title"), "Plan");
        assert_eq!(content.items("points"), vec!["Ship it", "Measure"]);

        let quote = slide_to_content(&deck.slides[1]);
        assert_eq!(quote.text("caption"), "Mies");
        assert_eq!(quote.text("text"), "Less is more");
    }

    #[test]
    fn columns_merge_back_into_one_list() {
        let deck = compile(
            r#"[{"layout": "content_multi_column", "title": "Pillars", "points": ["a", "b", "c", "d", "e"]}]"#,
        );
        let content = slide_to_content(&deck.slides[0]);
        assert_eq!(content.items("points"), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn structured_slots_survive() {
        let deck = compile(
            r#"[{"layout": "chart_focus", "title": "Sales", "chart": "PIE|A,B,C|X:1,2"},
                {"layout": "content_with_table", "title": "T", "table": "|h1|h2|\n|---|---|\n|1|2|"},
                {"layout": "image_focus", "title": "Look", "image": "a red fox"}]"#,
        );
        match slide_to_content(&deck.slides[0]).get("chart") {
            Some(SlotValue::Chart(chart)) => {
                assert_eq!(chart.kind, ChartKind::Pie);
                assert_eq!(chart.series[0].values, vec![1.0, 2.0, 0.0]);
            }
            other => panic!("expected chart, got {other:?}"),
        }
        match slide_to_content(&deck.slides[1]).get("table") {
            Some(SlotValue::Table(table)) => {
                assert_eq!(table.headers, vec!["h1", "h2"]);
                assert_eq!(table.rows, vec![vec!["1".to_string(), "2".to_string()]]);
            }
            other => panic!("expected table, got {other:?}"),
        }
        match slide_to_content(&deck.slides[2]).get("image") {
            Some(SlotValue::Image(image)) => assert_eq!(image.prompt, "a red fox"),
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn payload_recompiles_to_the_same_layouts() {
        let deck = compile(
            r#"{"title": "Loop", "slides": [
                {"layout": "title", "title": "Start", "subtitle": "here"},
                {"layout": "statistic", "title": "Growth", "statistic": "42%", "text": "year over year"},
                {"layout": "chart_focus", "title": "Sales", "chart": "LINE|Jan,Feb|Units:3,4"}]}"#,
        );
        let payload = deck_to_payload(&deck);
        assert_eq!(payload["title"], "Loop");
        let again = compile(&payload.to_string());
        let layouts = |d: &CompiledDeck| d.slides.iter().map(|s| s.layout.clone()).collect::<Vec<_>>();
        assert_eq!(layouts(&again), layouts(&deck));
        assert_eq!(
            slide_to_content(&again.slides[2]).get("chart"),
            slide_to_content(&deck.slides[2]).get("chart")
        );
    }
}
