//! Content signals extracted from a slide's raw fields.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::config::ClassifierConfig;
use crate::ingest::normalize::{is_falsy, lookup, value_to_string};
use crate::models::deck::RawFields;

/// A fact about a slide the scoring table can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// A quotation and its author are both present.
    QuoteWithAuthor,
    /// A headline figure with an explanation.
    StatisticWithText,
    /// Explicit column fields (`columns`, `column3`, ...).
    MultiColumn,
    /// Left and right comparison fields are both present.
    Comparison,
    /// Left and right free-text fields are both present.
    SideBySideText,
    /// Two distinct image fields are present.
    TwoImages,
    Table,
    Chart,
    /// An explicit question/answer pair, or a title phrased as a question.
    QuestionAnswer,
    /// References or further reading.
    Sources,
    FirstSlide,
    FirstSlideWithImage,
    /// One of the last two slides, titled with a closing phrase.
    Closing,
    /// A list whose items mostly carry a year, step or phase marker.
    Sequence,
    BulletList,
    Text,
    LongText,
    LongTextWithImage,
    ShortTextWithImage,
}

const QUOTE_KEYS: &[&str] = &["quote", "quote_text", "quotation"];
const AUTHOR_KEYS: &[&str] = &["author", "attribution", "quote_author", "speaker", "caption"];
const COLUMN_KEYS: &[&str] = &["columns", "column3", "column_3", "col3", "three_columns"];
const QUESTION_KEYS: &[&str] = &["question", "q"];
const ANSWER_KEYS: &[&str] = &["answer", "a"];
const SOURCE_KEYS: &[&str] = &["sources", "references", "citations", "bibliography"];
const SOURCE_TITLES: &[&str] = &["reference", "source", "bibliograph", "further reading", "citation"];

/// Phrases that mark a closing slide when they appear in its title.
pub const CLOSING_KEYWORDS: &[&str] = &[
    "thank you",
    "thanks",
    "conclusion",
    "q&a",
    "questions",
    "summary",
    "wrap up",
    "wrap-up",
    "final thoughts",
    "next steps",
    "key takeaways",
];

const SEQUENCE_WORDS: &[&str] = &["step", "phase", "stage", "milestone", "week", "day", "month", "q1", "q2", "q3", "q4"];

fn any_key(raw: &RawFields, keys: &[&str]) -> bool {
    keys.iter().any(|k| raw.get(*k).is_some_and(|v| !is_blank(v)))
}

fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Array(items) => items.iter().all(is_blank),
        JsonValue::String(s) => s.trim().is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        other => is_falsy(other),
    }
}

fn slot<'a>(raw: &'a RawFields, name: &str) -> Option<&'a JsonValue> {
    lookup(raw, name).filter(|v| !is_blank(v))
}

fn has_image(raw: &RawFields) -> bool {
    ["image", "second_image", "background_image"]
        .iter()
        .any(|name| slot(raw, name).is_some())
        || raw.iter().any(|(k, v)| k.contains("image") && !is_blank(v))
}

/// List items of a field: arrays item by item, strings line by line.
fn list_items(value: &JsonValue) -> Vec<String> {
    let items: Vec<String> = match value {
        JsonValue::Array(items) => items.iter().map(value_to_string).collect(),
        other => value_to_string(other).lines().map(str::to_string).collect(),
    };
    items.into_iter().filter(|s| !s.trim().is_empty()).collect()
}

fn has_sequence_marker(item: &str) -> bool {
    let lower = item.to_lowercase();
    let year = lower
        .split(|c: char| !c.is_ascii_digit())
        .any(|token| token.len() == 4 && matches!(token.parse::<u32>(), Ok(1000..=2999)));
    year || lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| SEQUENCE_WORDS.contains(&word))
}

/// Whether a title reads like the end of a deck.
pub fn is_closing_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    CLOSING_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Detects every signal a slide carries.
///
/// # Arguments
///
/// * `raw` - The slide's content fields as the model produced them.
/// * `index` - Zero-based slide position.
/// * `total` - Number of slides in the deck.
/// * `config` - Thresholds such as the long-text length.
pub fn detect(raw: &RawFields, index: usize, total: usize, config: &ClassifierConfig) -> Vec<Signal> {
    let mut signals = Vec::new();
    let image = has_image(raw);
    let title = slot(raw, "title").map(value_to_string).unwrap_or_default();
    let text = slot(raw, "text").map(value_to_string).unwrap_or_default();

    if any_key(raw, QUOTE_KEYS) && any_key(raw, AUTHOR_KEYS) {
        signals.push(Signal::QuoteWithAuthor);
    }
    if slot(raw, "statistic").is_some() && !text.trim().is_empty() {
        signals.push(Signal::StatisticWithText);
    }
    if any_key(raw, COLUMN_KEYS) {
        signals.push(Signal::MultiColumn);
    }
    let sided = |left: &str, right: &str| slot(raw, left).is_some() && slot(raw, right).is_some();
    if sided("left_points", "right_points") || sided("left_title", "right_title") {
        signals.push(Signal::Comparison);
    }
    if sided("left_text", "right_text") {
        signals.push(Signal::SideBySideText);
    }
    match (slot(raw, "image"), slot(raw, "second_image")) {
        (Some(first), Some(second)) if first != second => signals.push(Signal::TwoImages),
        _ => {}
    }
    if slot(raw, "table").is_some() {
        signals.push(Signal::Table);
    }
    if slot(raw, "chart").is_some() {
        signals.push(Signal::Chart);
    }
    if (any_key(raw, QUESTION_KEYS) && any_key(raw, ANSWER_KEYS)) || title.trim_end().ends_with('?') {
        signals.push(Signal::QuestionAnswer);
    }
    let lower_title = title.to_lowercase();
    if any_key(raw, SOURCE_KEYS) || SOURCE_TITLES.iter().any(|k| lower_title.contains(k)) {
        signals.push(Signal::Sources);
    }

    if index == 0 {
        signals.push(if image {
            Signal::FirstSlideWithImage
        } else {
            Signal::FirstSlide
        });
    }
    if total > 0 && index + 2 >= total && is_closing_title(&title) {
        signals.push(Signal::Closing);
    }

    let points = slot(raw, "points").map(list_items).unwrap_or_default();
    if !points.is_empty() {
        let marked = points.iter().filter(|p| has_sequence_marker(p)).count();
        if points.len() >= 2 && marked * 2 >= points.len() {
            signals.push(Signal::Sequence);
        }
        signals.push(Signal::BulletList);
    }

    let text_len = text.trim().chars().count();
    if text_len > 0 {
        signals.push(Signal::Text);
        if text_len > config.long_text_chars {
            signals.push(Signal::LongText);
            if image {
                signals.push(Signal::LongTextWithImage);
            }
        } else if image {
            signals.push(Signal::ShortTextWithImage);
        }
    }
    signals
}

/// Whether a slide has body copy (points or text) a generic layout can show.
pub fn has_body(raw: &RawFields) -> bool {
    slot(raw, "points").is_some() || slot(raw, "text").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: JsonValue) -> RawFields {
        match value {
            JsonValue::Object(map) => map,
            _ => RawFields::new(),
        }
    }

    fn signals(value: JsonValue, index: usize, total: usize) -> Vec<Signal> {
        detect(&fields(value), index, total, &ClassifierConfig::default())
    }

    #[test]
    fn strong_signals() {
        let s = signals(json!({"quote": "Stay hungry", "author": "Jobs"}), 3, 10);
        assert!(s.contains(&Signal::QuoteWithAuthor));

        let s = signals(json!({"stat": "87%", "description": "of users return"}), 3, 10);
        assert!(s.contains(&Signal::StatisticWithText));

        let s = signals(json!({"pros": ["fast"], "cons": ["costly"]}), 3, 10);
        assert!(s.contains(&Signal::Comparison));

        let s = signals(json!({"image": "a cat", "second_image": "a cat"}), 3, 10);
        assert!(!s.contains(&Signal::TwoImages));
        let s = signals(json!({"image": "a cat", "image_2": "a dog"}), 3, 10);
        assert!(s.contains(&Signal::TwoImages));
    }

    #[test]
    fn positional_signals() {
        assert!(signals(json!({"title": "Hello"}), 0, 5).contains(&Signal::FirstSlide));
        assert!(signals(json!({"title": "Hello", "hero_image": "city"}), 0, 5).contains(&Signal::FirstSlideWithImage));
        assert!(signals(json!({"title": "Thank You!"}), 4, 5).contains(&Signal::Closing));
        assert!(signals(json!({"title": "Conclusion"}), 3, 5).contains(&Signal::Closing));
        assert!(!signals(json!({"title": "Conclusion"}), 1, 5).contains(&Signal::Closing));
    }

    #[test]
    fn sequences_need_markers_on_most_items() {
        let s = signals(json!({"points": ["2019: founded", "2021: series A", "2024: IPO"]}), 2, 6);
        assert!(s.contains(&Signal::Sequence));
        let s = signals(json!({"points": "Step 1 plan\nStep 2 build\nship"}), 2, 6);
        assert!(s.contains(&Signal::Sequence));
        let s = signals(json!({"points": ["fast", "cheap", "in 2024"]}), 2, 6);
        assert!(!s.contains(&Signal::Sequence));
        assert!(s.contains(&Signal::BulletList));
    }

    #[test]
    fn blank_slots_count_as_missing() {
        let raw = fields(json!({"image": "  ", "quote": "Stay hungry", "points": []}));
        assert_eq!(slot(&raw, "quote"), Some(&json!("Stay hungry")));
        assert!(slot(&raw, "image").is_none());
        assert!(slot(&raw, "points").is_none());
        assert!(!has_image(&raw));
    }

    #[test]
    fn text_length_and_images() {
        let long = "word ".repeat(80);
        let s = signals(json!({"text": long, "image": "chart"}), 2, 6);
        assert!(s.contains(&Signal::LongText));
        assert!(s.contains(&Signal::LongTextWithImage));
        let s = signals(json!({"text": "short", "photo": "beach"}), 2, 6);
        assert!(s.contains(&Signal::ShortTextWithImage));
        assert!(!has_body(&fields(json!({"title": "x"}))));
    }
}
