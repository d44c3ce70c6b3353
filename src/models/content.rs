use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The visual form of a chart.
/// Shorthand and JSON inputs are matched case-insensitively; anything unknown becomes `Bar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    /// Parses a chart kind name, falling back to `Bar` for anything unrecognised.
    pub fn parse_lenient(input: &str) -> Self {
        match input.trim().to_ascii_uppercase().as_str() {
            "LINE" => ChartKind::Line,
            "PIE" => ChartKind::Pie,
            _ => ChartKind::Bar,
        }
    }
}

impl<'de> Deserialize<'de> for ChartKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ChartKind::parse_lenient(&raw))
    }
}

/// One named data series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Series name (legend label). LLM payloads call this `label`.
    #[serde(alias = "label")]
    pub name: String,
    /// One value per chart label. LLM payloads call this `data`.
    #[serde(alias = "data")]
    pub values: Vec<f64>,
}

/// A chart specification: kind, category labels and value series.
///
/// Invariant (enforced by [`ChartSpec::conform`]): every series has exactly
/// `labels.len()` values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(alias = "chartType", alias = "chart_type", default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(alias = "datasets", default)]
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// The placeholder returned when a chart payload carries no usable series.
    pub fn fallback() -> Self {
        ChartSpec {
            kind: ChartKind::Bar,
            labels: vec!["No Data".to_string()],
            series: vec![ChartSeries {
                name: "Empty".to_string(),
                values: vec![0.0],
            }],
        }
    }

    /// An empty chart of the default kind (no labels, no series).
    pub fn empty() -> Self {
        ChartSpec::default()
    }

    /// Pads (with zeros) or truncates every series so it matches the label count.
    pub fn conform(mut self) -> Self {
        let label_count = self.labels.len();
        for series in &mut self.series {
            series.values.resize(label_count, 0.0);
        }
        self
    }
}

/// A table specification: a header row plus data rows.
///
/// Invariant (enforced by [`TableSpec::conform`]): every row has exactly
/// `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    /// The placeholder returned when a table payload has too few rows to be a table.
    pub fn fallback() -> Self {
        TableSpec {
            headers: vec!["Header".to_string()],
            rows: vec![vec!["Data".to_string()]],
        }
    }

    /// Pads rows with empty cells (or truncates them) to the header width.
    pub fn conform(mut self) -> Self {
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
        self
    }
}

/// Requested rendering style for a generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Photo,
    Illustration,
    Diagram,
}

/// An image slot: the prompt an external generator should draw, plus an optional style hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub style: Option<ImageStyle>,
}

impl ImageSpec {
    pub fn new(prompt: impl Into<String>) -> Self {
        ImageSpec {
            prompt: prompt.into(),
            style: None,
        }
    }
}

/// Normalized content of a single slot.
/// The JSON representation is tagged by `type` (e.g. `{"type": "chart", ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SlotValue {
    Text(String),
    List(Vec<String>),
    Image(ImageSpec),
    Table(TableSpec),
    Chart(ChartSpec),
}

impl SlotValue {
    /// Returns the text if this is a `Text` slot.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this is a `List` slot.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SlotValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// True when the value carries nothing a template could show.
    pub fn is_blank(&self) -> bool {
        match self {
            SlotValue::Text(s) => s.trim().is_empty(),
            SlotValue::List(items) => items.iter().all(|i| i.trim().is_empty()),
            SlotValue::Image(img) => img.prompt.trim().is_empty(),
            SlotValue::Table(t) => t.headers.is_empty() && t.rows.is_empty(),
            SlotValue::Chart(c) => c.series.is_empty(),
        }
    }
}

/// The normalized, type-safe content of one slide: a layout id plus one value per
/// slot the layout declares, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSpec {
    pub layout_id: String,
    pub slots: IndexMap<String, SlotValue>,
}

impl ContentSpec {
    pub fn new(layout_id: impl Into<String>) -> Self {
        ContentSpec {
            layout_id: layout_id.into(),
            slots: IndexMap::new(),
        }
    }

    pub fn get(&self, slot: &str) -> Option<&SlotValue> {
        self.slots.get(slot)
    }

    /// Text of a slot, or an empty string when the slot is absent or not text.
    pub fn text(&self, slot: &str) -> &str {
        self.slots
            .get(slot)
            .and_then(SlotValue::as_text)
            .unwrap_or("")
    }

    /// Items of a list slot. A text slot is split into lines so templates can treat
    /// both shapes uniformly.
    pub fn items(&self, slot: &str) -> Vec<String> {
        match self.slots.get(slot) {
            Some(SlotValue::List(items)) => items.clone(),
            Some(SlotValue::Text(text)) => text.lines().map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }
}
