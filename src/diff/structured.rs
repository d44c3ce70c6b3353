use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use treediff::{value::Key, Delegate};

/// A compact view of a value involved in a change. Arrays and objects are summarized.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ValueRepr {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
    /// e.g. `"[Array len=5]"`
    Array(String),
    /// e.g. `"{Object keys=4}"`
    Object(String),
}

impl ValueRepr {
    fn from_json_value(val: &JsonValue) -> Self {
        match val {
            JsonValue::Null => ValueRepr::Null,
            JsonValue::Bool(b) => ValueRepr::Boolean(*b),
            JsonValue::Number(n) => ValueRepr::Number(n.clone()),
            JsonValue::String(s) => ValueRepr::String(s.clone()),
            JsonValue::Array(arr) => ValueRepr::Array(format!("[Array len={}]", arr.len())),
            JsonValue::Object(map) => ValueRepr::Object(format!("{{Object keys={}}}", map.len())),
        }
    }

    /// Formats the value for display; strings are quoted with control characters escaped.
    pub fn format_for_display(&self) -> String {
        match self {
            ValueRepr::String(s) => {
                let escaped_s = s
                    .replace('\\', "\\\\") // backslash first
                    .replace('\n', "\\n")
                    .replace('\r', "\\r")
                    .replace('\t', "\\t")
                    .replace('\'', "\\'");
                format!("'{}'", escaped_s)
            }
            ValueRepr::Number(n) => n.to_string(),
            ValueRepr::Boolean(b) => b.to_string(),
            ValueRepr::Null => "null".to_string(),
            ValueRepr::Array(s) | ValueRepr::Object(s) => s.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
}

/// A single difference between two serialized decks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Change {
    /// Dot-separated path with bracket notation for array indices, e.g.
    /// `"slides[1].elements[0].style.top"`.
    pub path: String,
    pub change_type: ChangeType,
    /// The value before the change (`None` for `Added`).
    pub old_value: Option<ValueRepr>,
    /// The value after the change (`None` for `Removed`).
    pub new_value: Option<ValueRepr>,
}

impl Change {
    /// The slide index the change belongs to, for paths under `slides[N]`.
    pub fn slide_index(&self) -> Option<usize> {
        let rest = self.path.strip_prefix("slides[")?;
        rest[..rest.find(']')?].parse().ok()
    }
}

/// treediff delegate that records every leaf difference as a [`Change`].
#[derive(Debug, Default)]
pub(crate) struct ChangeCollector {
    pub(crate) changes: Vec<Change>,
    current_path: Vec<String>,
}

impl ChangeCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A path segment for `key`, carrying its own separator.
    fn segment(&self, key: &Key) -> String {
        match key {
            Key::String(s) if self.current_path.is_empty() => s.clone(),
            Key::String(s) => format!(".{}", s),
            Key::Index(i) => format!("[{}]", i),
        }
    }

    /// Records a change at the current path, extended by `key` for added and removed
    /// entries (treediff reports those without pushing their key).
    fn record(
        &mut self,
        key: Option<&Key>,
        change_type: ChangeType,
        old: Option<&JsonValue>,
        new: Option<&JsonValue>,
    ) {
        let mut path = self.current_path.concat();
        if let Some(key) = key {
            path.push_str(&self.segment(key));
        }
        self.changes.push(Change {
            path,
            change_type,
            old_value: old.map(ValueRepr::from_json_value),
            new_value: new.map(ValueRepr::from_json_value),
        });
    }
}

impl<'a> Delegate<'a, Key, JsonValue> for ChangeCollector {
    fn push(&mut self, key: &Key) {
        let segment = self.segment(key);
        self.current_path.push(segment);
    }

    fn pop(&mut self) {
        self.current_path.pop();
    }

    fn removed<'b>(&mut self, key: &'b Key, value: &'a JsonValue) {
        self.record(Some(key), ChangeType::Removed, Some(value), None);
    }

    fn added<'b>(&mut self, key: &'b Key, value: &'a JsonValue) {
        self.record(Some(key), ChangeType::Added, None, Some(value));
    }

    fn modified(&mut self, old: &'a JsonValue, new: &'a JsonValue) {
        self.record(None, ChangeType::Modified, Some(old), Some(new));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use treediff::diff;

    #[test]
    fn collects_paths_for_each_change() {
        let old = json!({"theme": "A", "slides": [{"layout": "content", "elements": [1, 2]}]});
        let new = json!({"theme": "B", "slides": [{"layout": "content", "elements": [1]}], "title": "T"});
        let mut collector = ChangeCollector::new();
        diff(&old, &new, &mut collector);

        let find = |path: &str| collector.changes.iter().find(|c| c.path == path);
        let theme = find("theme").expect("theme change");
        assert_eq!(theme.change_type, ChangeType::Modified);
        assert_eq!(theme.new_value, Some(ValueRepr::String("B".into())));

        let removed = find("slides[0].elements[1]").expect("removed element");
        assert_eq!(removed.change_type, ChangeType::Removed);
        assert_eq!(removed.slide_index(), Some(0));

        assert_eq!(find("title").map(|c| c.change_type.clone()), Some(ChangeType::Added));
        assert_eq!(theme.slide_index(), None);
    }

    #[test]
    fn strings_are_escaped_for_display() {
        assert_eq!(ValueRepr::String("a\n'b'".into()).format_for_display(), "'a\\n\\'b\\''");
        assert_eq!(ValueRepr::Array("[Array len=2]".into()).format_for_display(), "[Array len=2]");
    }
}
