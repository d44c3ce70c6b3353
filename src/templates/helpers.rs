//! Element builders shared by the built-in templates.

use log::debug;

use crate::models::content::{ChartKind, SlotValue};
use crate::models::element::{
    ChartData, ChartDataset, ElementKind, ElementRecord, Length, ShapeType, Style, TableCell,
    TextAlign,
};
use crate::models::template::RenderContext;

/// Left margin shared by most layouts, percent of canvas width.
pub const MARGIN_X: f64 = 8.0;
pub const CONTENT_WIDTH: f64 = 84.0;
pub const TITLE_TOP: f64 = 8.0;
pub const CONTENT_TOP: f64 = 25.0;

pub const TEXT_TITLE_LARGE: f64 = 58.0;
pub const TEXT_TITLE: f64 = 48.0;
pub const TEXT_HEADING: f64 = 36.0;
pub const TEXT_SUBTITLE: f64 = 24.0;
pub const TEXT_BODY: f64 = 22.0;
pub const TEXT_BODY_SMALL: f64 = 18.0;
pub const TEXT_CAPTION: f64 = 16.0;

pub const DEFAULT_BULLET: &str = "• ";
/// Every prefix a template puts in front of list items.
pub const BULLET_PREFIXES: &[&str] = &["• ", "→ ", "✅ ", "[Ref] "];
/// Prefixes templates add to single text slots.
pub const TEXT_PREFIXES: &[&str] = &["Q: ", "A: ", "📚 ", "— "];

/// Prompt shown by image placeholders whose slot carries no prompt.
pub const PLACEHOLDER_PROMPT: &str = "Visual concept";
const PLACEHOLDER_BACKGROUND: &str = "#f8fafc";
const PLACEHOLDER_COLOR: &str = "#64748b";

/// Palette used when a background defines no chart colors.
pub const DEFAULT_CHART_COLORS: &[&str] = &[
    "#3b82f6", "#ef4444", "#f97316", "#eab308", "#22c55e", "#14b8a6", "#6366f1", "#a855f7",
];

const EMOJI_KEYWORDS: &[(&str, &str)] = &[
    ("idea", "💡"),
    ("lightbulb", "💡"),
    ("innovation", "💡"),
    ("rocket", "🚀"),
    ("start", "🚀"),
    ("goal", "🎯"),
    ("target", "🎯"),
    ("chart", "📈"),
    ("growth", "📈"),
    ("decline", "📉"),
    ("graph", "📊"),
    ("money", "💰"),
    ("team", "👥"),
    ("meeting", "🤝"),
    ("deal", "🤝"),
    ("success", "🏆"),
    ("win", "🏆"),
    ("calendar", "📅"),
    ("deadline", "⏳"),
    ("warning", "⚠️"),
    ("important", "❗"),
    ("info", "ℹ️"),
    ("check", "✔️"),
    ("yes", "✅"),
    ("correct", "✅"),
    ("no", "❌"),
    ("wrong", "❌"),
    ("question", "❓"),
    ("think", "🤔"),
    ("star", "⭐"),
    ("fire", "🔥"),
    ("celebrate", "🎉"),
    ("tech", "💻"),
    ("computer", "💻"),
    ("ai", "🤖"),
    ("robot", "🤖"),
    ("science", "🔬"),
    ("data", "💾"),
    ("cloud", "☁️"),
    ("security", "🔒"),
    ("network", "🌐"),
    ("world", "🌍"),
    ("nature", "🌿"),
    ("book", "📚"),
    ("study", "📚"),
    ("school", "🏫"),
    ("search", "🔍"),
    ("time", "⏰"),
    ("finish", "🏁"),
];

/// The emoji for a shortcode keyword (case-insensitive).
pub fn emoji_for(keyword: &str) -> Option<&'static str> {
    let lower = keyword.to_lowercase();
    EMOJI_KEYWORDS
        .iter()
        .find(|(k, _)| *k == lower)
        .map(|(_, e)| *e)
}

/// Replaces `[emoji: keyword]` shortcodes. Unknown keywords are dropped.
fn expand_emoji(text: &str, out: &mut String) {
    const OPEN: &str = "[emoji:";
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let trimmed = after.trim_start();
        let word_len = trimmed
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(trimmed.len());
        let (word, tail) = trimmed.split_at(word_len);
        let tail = tail.trim_start();
        match tail.strip_prefix(']') {
            Some(remaining) if !word.is_empty() => {
                out.push_str(emoji_for(word).unwrap_or_default());
                rest = remaining;
            }
            _ => {
                out.push_str(OPEN);
                rest = after;
            }
        }
    }
    out.push_str(rest);
}

/// Formats slot text for display: expands emoji shortcodes while leaving `$...$` and
/// `$$...$$` math spans untouched.
pub fn format_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('$') {
        let (plain, math) = rest.split_at(start);
        let end = if let Some(body) = math.strip_prefix("$$") {
            body.find("$$").map(|i| 2 + i + 2)
        } else {
            math[1..]
                .find(['$', '\n'])
                .filter(|&i| math[1 + i..].starts_with('$'))
                .map(|i| 1 + i + 1)
        };
        match end {
            Some(end) => {
                expand_emoji(plain, &mut out);
                out.push_str(&math[..end]);
                rest = &math[end..];
            }
            None => {
                expand_emoji(plain, &mut out);
                out.push('$');
                rest = &math[1..];
            }
        }
    }
    expand_emoji(rest, &mut out);
    out
}

/// Renders list items as display lines.
///
/// Items are trimmed, any bullet the model already wrote (`*`, `-`, `•`) is stripped,
/// empty items are skipped, and each line gets `prefix`.
pub fn bullet_text(items: &[String], prefix: &str) -> String {
    items
        .iter()
        .map(|item| item.trim())
        .map(|item| {
            item.strip_prefix(['*', '-', '•'])
                .map(str::trim_start)
                .unwrap_or(item)
        })
        .filter(|item| !item.is_empty())
        .map(|item| format!("{prefix}{}", format_text(item)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `prefix` followed by the trimmed text, or an empty string when the text is blank.
pub fn prefixed(prefix: &str, text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        String::new()
    } else {
        format!("{prefix}{text}")
    }
}

/// A box covering the whole canvas.
pub fn full_bleed() -> Style {
    Style::at(0.0, 0.0, Length::Percent(100.0), Length::Percent(100.0))
}

/// A style for a heading in the theme's title font and primary text color.
pub fn title_style(ctx: &RenderContext<'_>, left: f64, top: f64, width: f64, size: f64) -> Style {
    Style::at(left, top, Length::Percent(width), Length::Auto)
        .font(&ctx.theme.title_font, size, 800)
        .color(&ctx.background.primary_text_color)
        .line_height(1.2)
}

/// A style for body copy in the theme's body font and secondary text color.
pub fn body_style(ctx: &RenderContext<'_>, left: f64, top: f64, width: f64, size: f64) -> Style {
    Style::at(left, top, Length::Percent(width), Length::Auto)
        .font(&ctx.theme.body_font, size, 400)
        .color(&ctx.background.secondary_text_color)
        .line_height(1.4)
}

/// Builds a text element, or `None` when there is nothing to show.
///
/// # Arguments
///
/// * `ctx` - The render context; supplies the id namespace.
/// * `suffix` - Element id suffix, unique within the slide.
/// * `slot` - The slot the text came from, if any.
/// * `content` - Raw slot text; emoji shortcodes are expanded.
/// * `style` - Declared style.
pub fn text_element(
    ctx: &RenderContext<'_>,
    suffix: &str,
    slot: Option<&str>,
    content: &str,
    style: Style,
) -> Option<ElementRecord> {
    formatted_text_element(ctx, suffix, slot, format_text(content), style)
}

fn formatted_text_element(
    ctx: &RenderContext<'_>,
    suffix: &str,
    slot: Option<&str>,
    content: String,
    style: Style,
) -> Option<ElementRecord> {
    if content.trim().is_empty() {
        return None;
    }
    Some(ElementRecord::new(
        ctx.element_id(suffix),
        slot,
        ElementKind::Text { content },
        style,
    ))
}

/// A bullet-list text element from a list (or multi-line text) slot.
pub fn list_element(
    ctx: &RenderContext<'_>,
    suffix: &str,
    slot: &str,
    prefix: &str,
    style: Style,
) -> Option<ElementRecord> {
    items_element(ctx, suffix, slot, &ctx.content.items(slot), prefix, style)
}

/// A bullet-list text element from some of a slot's items.
pub fn items_element(
    ctx: &RenderContext<'_>,
    suffix: &str,
    slot: &str,
    items: &[String],
    prefix: &str,
    style: Style,
) -> Option<ElementRecord> {
    formatted_text_element(ctx, suffix, Some(slot), bullet_text(items, prefix), style)
}

pub fn shape(ctx: &RenderContext<'_>, suffix: &str, shape: ShapeType, style: Style) -> Option<ElementRecord> {
    Some(ElementRecord::new(
        ctx.element_id(suffix),
        None,
        ElementKind::Shape { shape },
        style,
    ))
}

/// The prompt of an image slot.
pub fn image_prompt<'a>(ctx: &RenderContext<'a>, slot: &str) -> &'a str {
    match ctx.content.get(slot) {
        Some(SlotValue::Image(image)) if !image.prompt.trim().is_empty() => &image.prompt,
        _ => PLACEHOLDER_PROMPT,
    }
}

/// An image element for a slot.
///
/// Uses the pre-fetched URL from the asset cache when there is one. Otherwise renders a
/// placeholder block (a text element) that shows the prompt, so the slide still says
/// what belongs there.
pub fn image_element(ctx: &RenderContext<'_>, suffix: &str, slot: &str, mut style: Style) -> Option<ElementRecord> {
    let prompt = image_prompt(ctx, slot);
    let id = ctx.element_id(suffix);
    style
        .extra
        .entry("objectFit".to_string())
        .or_insert_with(|| "cover".into());

    if let Some(url) = ctx.asset(slot) {
        return Some(ElementRecord::new(
            id,
            Some(slot),
            ElementKind::Image {
                src: url.to_string(),
                prompt: Some(prompt.to_string()),
            },
            style,
        ));
    }

    debug!("No asset for {} slot '{}', rendering placeholder", ctx.slide_key, slot);
    let style = style
        .font(&ctx.theme.body_font, TEXT_BODY_SMALL, 400)
        .color(PLACEHOLDER_COLOR)
        .background(PLACEHOLDER_BACKGROUND)
        .align(TextAlign::Center)
        .with("border", "1px solid #e2e8f0")
        .with("borderRadius", "12px")
        .with("placeholderFor", "image")
        .with("prompt", prompt);
    Some(ElementRecord::new(
        id,
        Some(slot),
        ElementKind::Text {
            content: format!("🖼️ Visual Element\n\"{prompt}\""),
        },
        style,
    ))
}

/// A table element for a slot, or `None` when the slot holds no table or the table has
/// no columns.
///
/// The header row is bold. Rows shorter than the widest row are padded with empty cells.
pub fn table_element(ctx: &RenderContext<'_>, suffix: &str, slot: &str, style: Style) -> Option<ElementRecord> {
    let Some(SlotValue::Table(table)) = ctx.content.get(slot) else {
        return None;
    };
    let all_rows: Vec<&Vec<String>> = std::iter::once(&table.headers).chain(table.rows.iter()).collect();
    let columns = all_rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if columns == 0 {
        return None;
    }

    let id = ctx.element_id(suffix);
    let cell_data = all_rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            (0..columns)
                .map(|c| TableCell {
                    id: format!("{id}-r{r}-c{c}"),
                    content: row.get(c).map(|s| format_text(s)).unwrap_or_default(),
                    bold: r == 0,
                })
                .collect()
        })
        .collect();

    Some(ElementRecord::new(
        id,
        Some(slot),
        ElementKind::Table {
            rows: all_rows.len(),
            columns,
            cell_data,
        },
        style,
    ))
}

/// A chart element for a slot, or `None` when the slot holds no series.
///
/// Colors come from the background's chart palette. Pie charts color each slice;
/// other kinds color each series.
pub fn chart_element(ctx: &RenderContext<'_>, suffix: &str, slot: &str, style: Style) -> Option<ElementRecord> {
    let Some(SlotValue::Chart(chart)) = ctx.content.get(slot) else {
        return None;
    };
    if chart.series.is_empty() {
        return None;
    }

    let palette: Vec<&str> = match &ctx.background.chart_colors {
        Some(colors) if !colors.is_empty() => colors.iter().map(String::as_str).collect(),
        _ => DEFAULT_CHART_COLORS.to_vec(),
    };
    let color = |i: usize| palette[i % palette.len()].to_string();
    let per_slice = chart.kind == ChartKind::Pie;

    let datasets = chart
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| ChartDataset {
            label: series.name.clone(),
            data: series.values.clone(),
            background_color: if per_slice {
                (0..chart.labels.len()).map(color).collect()
            } else {
                vec![color(i)]
            },
            border_color: color(i),
        })
        .collect();

    Some(ElementRecord::new(
        ctx.element_id(suffix),
        Some(slot),
        ElementKind::Chart {
            chart_type: chart.kind,
            data: ChartData {
                labels: chart.labels.clone(),
                datasets,
            },
        },
        style,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::{ChartSeries, ChartSpec, ContentSpec, ImageSpec, TableSpec};
    use crate::models::template::AssetCache;
    use crate::models::theme::{Background, Theme};

    fn with_ctx<R>(content: ContentSpec, assets: &AssetCache, f: impl FnOnce(&RenderContext<'_>) -> R) -> R {
        let packs = Theme::standard_packs();
        let theme = &packs[0];
        let background = Background::default();
        let ctx = RenderContext {
            content: &content,
            theme,
            background: &background,
            assets,
            slide_index: 2,
            slide_key: "slide-2",
        };
        f(&ctx)
    }

    #[test]
    fn emoji_shortcodes_expand_outside_math() {
        assert_eq!(format_text("Big [emoji: idea] here"), "Big 💡 here");
        assert_eq!(format_text("[emoji:IDEA]"), "💡");
        assert_eq!(format_text("drop [emoji: nonsense] it"), "drop  it");
        assert_eq!(format_text("$[emoji: idea]$ and [emoji: idea]"), "$[emoji: idea]$ and 💡");
        assert_eq!(format_text("$$x [emoji: fire]$$"), "$$x [emoji: fire]$$");
        assert_eq!(format_text("costs $5 [emoji: money]"), "costs $5 💰");
        assert_eq!(format_text("[emoji: broken"), "[emoji: broken");
    }

    #[test]
    fn bullets_strip_model_markers() {
        let items = vec!["* one".to_string(), "  ".to_string(), "- two".to_string(), "•three".to_string()];
        assert_eq!(bullet_text(&items, "→ "), "→ one\n→ two\n→ three");
        assert_eq!(bullet_text(&[], DEFAULT_BULLET), "");
    }

    #[test]
    fn empty_text_renders_nothing() {
        with_ctx(ContentSpec::new("content"), &AssetCache::new(), |ctx| {
            assert!(text_element(ctx, "title", Some("title"), "   ", Style::default()).is_none());
            let element = text_element(ctx, "title", Some("title"), "Hi", Style::default());
            assert_eq!(element.map(|e| e.id), Some("slide-2-title".to_string()));
        });
    }

    #[test]
    fn images_fall_back_to_prompt_placeholders() {
        let mut content = ContentSpec::new("image_focus");
        content.slots.insert("image".into(), SlotValue::Image(ImageSpec::new("a red fox")));

        let placeholder = with_ctx(content.clone(), &AssetCache::new(), |ctx| {
            image_element(ctx, "img", "image", Style::default())
        });
        let placeholder = placeholder.expect("placeholder element");
        assert!(placeholder.is_text());
        assert!(placeholder.text().unwrap_or_default().contains("a red fox"));
        assert_eq!(placeholder.style.extra.get("prompt"), Some(&serde_json::json!("a red fox")));

        let mut assets = AssetCache::new();
        assets.insert(2, "image", "https://img.example/fox.png");
        let image = with_ctx(content, &assets, |ctx| image_element(ctx, "img", "image", Style::default()));
        match image.map(|e| e.kind) {
            Some(ElementKind::Image { src, prompt }) => {
                assert_eq!(src, "https://img.example/fox.png");
                assert_eq!(prompt.as_deref(), Some("a red fox"));
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn tables_pad_to_widest_row() {
        let mut content = ContentSpec::new("content_with_table");
        content.slots.insert(
            "table".into(),
            SlotValue::Table(TableSpec {
                headers: vec!["A".into()],
                rows: vec![vec!["1".into(), "2".into()]],
            }),
        );
        let table = with_ctx(content, &AssetCache::new(), |ctx| table_element(ctx, "table", "table", Style::default()));
        match table.map(|e| e.kind) {
            Some(ElementKind::Table { rows, columns, cell_data }) => {
                assert_eq!((rows, columns), (2, 2));
                assert!(cell_data[0][0].bold);
                assert!(!cell_data[1][0].bold);
                assert_eq!(cell_data[0][1].content, "");
                assert_eq!(cell_data[1][1].id, "slide-2-table-r1-c1");
            }
            other => panic!("expected table, got {other:?}"),
        }

        let mut empty = ContentSpec::new("content_with_table");
        empty.slots.insert("table".into(), SlotValue::Table(TableSpec::default()));
        assert!(with_ctx(empty, &AssetCache::new(), |ctx| table_element(ctx, "t", "table", Style::default())).is_none());
    }

    #[test]
    fn pie_charts_color_each_slice() {
        let chart = ChartSpec {
            kind: ChartKind::Pie,
            labels: vec!["A".into(), "B".into(), "C".into()],
            series: vec![ChartSeries {
                name: "X".into(),
                values: vec![1.0, 2.0, 0.0],
            }],
        };
        let mut content = ContentSpec::new("chart_focus");
        content.slots.insert("chart".into(), SlotValue::Chart(chart.clone()));
        let element = with_ctx(content, &AssetCache::new(), |ctx| chart_element(ctx, "chart", "chart", Style::default()));
        match element.map(|e| e.kind) {
            Some(ElementKind::Chart { chart_type, data }) => {
                assert_eq!(chart_type, ChartKind::Pie);
                assert_eq!(data.datasets[0].background_color.len(), 3);
                assert_eq!(data.datasets[0].background_color[0], DEFAULT_CHART_COLORS[0]);
            }
            other => panic!("expected chart, got {other:?}"),
        }

        let mut bar = ContentSpec::new("chart_focus");
        bar.slots.insert("chart".into(), SlotValue::Chart(ChartSpec { kind: ChartKind::Bar, ..chart }));
        let element = with_ctx(bar, &AssetCache::new(), |ctx| chart_element(ctx, "chart", "chart", Style::default()));
        match element.map(|e| e.kind) {
            Some(ElementKind::Chart { data, .. }) => assert_eq!(data.datasets[0].background_color.len(), 1),
            other => panic!("expected chart, got {other:?}"),
        }

        let mut empty = ContentSpec::new("chart_focus");
        empty.slots.insert("chart".into(), SlotValue::Chart(ChartSpec::empty()));
        assert!(with_ctx(empty, &AssetCache::new(), |ctx| chart_element(ctx, "c", "chart", Style::default())).is_none());
    }
}
