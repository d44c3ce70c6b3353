// src/models/element.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::models::content::ChartKind;

/// Width of the fixed slide canvas in pixels.
pub const CANVAS_WIDTH_PX: f64 = 1280.0;
/// Height of the fixed slide canvas in pixels.
pub const CANVAS_HEIGHT_PX: f64 = 720.0;

/// Which canvas axis a length is measured along. Needed to convert pixels into
/// percentages because the canvas is not square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn extent_px(self) -> f64 {
        match self {
            Axis::Horizontal => CANVAS_WIDTH_PX,
            Axis::Vertical => CANVAS_HEIGHT_PX,
        }
    }
}

/// A CSS-like length: a percentage of the canvas, an absolute pixel size, or `auto`.
/// Serialized as `"40%"`, `"130px"` or `"auto"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Length {
    Percent(f64),
    Px(f64),
    #[default]
    Auto,
}

impl Length {
    /// The length as a percentage of the given axis, or `None` for `auto`.
    pub fn to_percent(self, axis: Axis) -> Option<f64> {
        match self {
            Length::Percent(p) => Some(p),
            Length::Px(px) => Some(px / axis.extent_px() * 100.0),
            Length::Auto => None,
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Length::Auto)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Percent(p) => write!(f, "{}%", trim_float(*p)),
            Length::Px(px) => write!(f, "{}px", trim_float(*px)),
            Length::Auto => f.write_str("auto"),
        }
    }
}

impl From<Length> for String {
    fn from(value: Length) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Length {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let v = value.trim();
        if v.eq_ignore_ascii_case("auto") {
            return Ok(Length::Auto);
        }
        let (number, ctor): (&str, fn(f64) -> Length) = if let Some(n) = v.strip_suffix('%') {
            (n, Length::Percent)
        } else if let Some(n) = v.strip_suffix("px") {
            (n, Length::Px)
        } else {
            (v, Length::Px) // bare numbers are pixels, as in CSS-in-JS styles
        };
        number
            .trim()
            .parse::<f64>()
            .map(ctor)
            .map_err(|_| format!("invalid length: {value}"))
    }
}

/// Rounds to 3 decimals and drops trailing zeros so serialized geometry stays readable.
fn trim_float(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let s = format!("{rounded:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Style record of an element: geometry, typography, colors, plus free-form
/// presentation attributes the compiler passes through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Left edge, percent of canvas width.
    pub left: f64,
    /// Top edge, percent of canvas height.
    pub top: f64,
    #[serde(default)]
    pub width: Length,
    #[serde(default)]
    pub height: Length,

    /// Font size in pixels.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_family: Option<String>,
    /// Numeric CSS font weight (400 normal, 700 bold).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_weight: Option<u16>,
    /// Line height as a multiple of the font size.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub background_color: Option<String>,

    /// Anything else (border radius, opacity, letter spacing, ...).
    #[serde(flatten, default)]
    pub extra: IndexMap<String, JsonValue>,
}

impl Style {
    /// A style positioned at `left`/`top` (percent) with the given box.
    pub fn at(left: f64, top: f64, width: Length, height: Length) -> Self {
        Style {
            left,
            top,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn font(mut self, family: &str, size_px: f64, weight: u16) -> Self {
        self.font_family = Some(family.to_string());
        self.font_size = Some(size_px);
        self.font_weight = Some(weight);
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn background(mut self, color: &str) -> Self {
        self.background_color = Some(color.to_string());
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn line_height(mut self, line_height: f64) -> Self {
        self.line_height = Some(line_height);
        self
    }

    /// Adds a pass-through presentation attribute.
    pub fn with(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

/// Basic shape primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    Rectangle,
    Ellipse,
}

/// One cell of a table element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub bold: bool,
}

/// A chart series with the colors it is drawn in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    /// One color per data point for pie charts, a single color otherwise.
    pub background_color: Vec<String>,
    pub border_color: String,
}

/// Render-ready chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// The type-specific payload of an element.
/// The JSON representation is tagged by `type` (e.g. `"type": "TEXT"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    Text {
        content: String,
    },
    Image {
        src: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        prompt: Option<String>,
    },
    Shape {
        shape: ShapeType,
    },
    Icon {
        #[serde(rename = "iconName")]
        icon_name: String,
    },
    Table {
        rows: usize,
        columns: usize,
        #[serde(rename = "cellData")]
        cell_data: Vec<Vec<TableCell>>,
    },
    Chart {
        #[serde(rename = "chartType")]
        chart_type: ChartKind,
        data: ChartData,
    },
}

/// A fully described slide element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    /// Stable identifier, namespaced by the slide key.
    pub id: String,
    /// The content slot this element was rendered from, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slot: Option<String>,
    pub style: Style,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl ElementRecord {
    pub fn new(id: impl Into<String>, slot: Option<&str>, kind: ElementKind, style: Style) -> Self {
        ElementRecord {
            id: id.into(),
            slot: slot.map(str::to_string),
            style,
            kind,
        }
    }

    /// The text content for `Text` elements.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content } => Some(content),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// Short tag naming the variant, for logging.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ElementKind::Text { .. } => "TEXT",
            ElementKind::Image { .. } => "IMAGE",
            ElementKind::Shape { .. } => "SHAPE",
            ElementKind::Icon { .. } => "ICON",
            ElementKind::Table { .. } => "TABLE",
            ElementKind::Chart { .. } => "CHART",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_round_trips_through_strings() {
        assert_eq!(Length::try_from("40%".to_string()), Ok(Length::Percent(40.0)));
        assert_eq!(Length::try_from("130px".to_string()), Ok(Length::Px(130.0)));
        assert_eq!(Length::try_from("auto".to_string()), Ok(Length::Auto));
        assert_eq!(Length::try_from("12".to_string()), Ok(Length::Px(12.0)));
        assert!(Length::try_from("wide".to_string()).is_err());
        assert_eq!(String::from(Length::Percent(33.3333333)), "33.333%");
        assert_eq!(String::from(Length::Px(4.0)), "4px");
    }

    #[test]
    fn px_converts_per_axis() {
        let px = Length::Px(72.0);
        assert_eq!(px.to_percent(Axis::Vertical), Some(10.0));
        assert_eq!(Length::Px(128.0).to_percent(Axis::Horizontal), Some(10.0));
        assert_eq!(Length::Auto.to_percent(Axis::Horizontal), None);
    }

    #[test]
    fn element_serializes_with_type_tag() {
        let element = ElementRecord::new(
            "slide-0-title",
            Some("title"),
            ElementKind::Text {
                content: "Hello".into(),
            },
            Style::at(8.0, 10.0, Length::Percent(84.0), Length::Auto)
                .font("Inter", 44.0, 800)
                .with("letterSpacing", "0.05em"),
        );
        let json = serde_json::to_value(&element).expect("element should serialize");
        assert_eq!(json["type"], "TEXT");
        assert_eq!(json["content"], "Hello");
        assert_eq!(json["style"]["width"], "84%");
        assert_eq!(json["style"]["height"], "auto");
        assert_eq!(json["style"]["letterSpacing"], "0.05em");

        let back: ElementRecord = serde_json::from_value(json).expect("element should deserialize");
        assert_eq!(back, element);
    }
}
