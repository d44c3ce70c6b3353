//! Layouts of the standard deck catalog.

use super::helpers::*;
use crate::models::element::{ElementKind, ElementRecord, Length, ShapeType, Style, TextAlign};
use crate::models::template::{LayoutTemplate, RenderContext};

type Rendered = Vec<Option<ElementRecord>>;

/// Layout used when a requested id cannot be resolved.
pub const DEFAULT_LAYOUT: &str = "content";

const HERO_OVERLAY: &str = "rgba(15, 23, 42, 0.6)";
const DIVIDER: &str = "#d1d5db";
const CARD: &str = "#e2e8f0";
const AVATAR_INK: &str = "#475569";
const PROS: &str = "#047857";
const CONS: &str = "#b91c1c";

pub fn templates() -> Vec<LayoutTemplate> {
    vec![
        LayoutTemplate::new(
            "title",
            "Title",
            &["title", "subtitle"],
            "Opening slide: deck title and a one-line subtitle.",
            title,
        ),
        LayoutTemplate::new(
            "title_image_background",
            "Image Hero",
            &["title", "background_image"],
            "Opening slide over a full-bleed image for a strong first impression.",
            title_image_background,
        ),
        LayoutTemplate::new(
            "section_header",
            "Section Header",
            &["title", "subtitle"],
            "Divides the deck into parts. Subtitle holds a section number or short label.",
            section_header,
        ),
        LayoutTemplate::new(
            "statement",
            "Statement",
            &["title", "text"],
            "One bold message or key takeaway on a solid accent background.",
            statement,
        ),
        LayoutTemplate::new(
            "content",
            "Bullets",
            &["title", "points"],
            "Detailed content as a short bulleted list.",
            content,
        ),
        LayoutTemplate::new(
            "content_with_table",
            "Table",
            &["title", "table"],
            "Tabular data. Table as a Markdown table string or {headers, rows}.",
            content_with_table,
        ),
        LayoutTemplate::new(
            "chart_focus",
            "Chart",
            &["title", "chart"],
            "Numeric data as a chart. Chart as TYPE|labels|name:values shorthand.",
            chart_focus,
        ),
        LayoutTemplate::new(
            "two_column_text",
            "Two Columns",
            &["title", "left_text", "right_text"],
            "Two related blocks of text side by side.",
            two_column_text,
        ),
        LayoutTemplate::new(
            "two_column_image",
            "Text and Image",
            &["title", "text", "image"],
            "Explanatory text with a supporting image on the right.",
            two_column_image,
        ),
        LayoutTemplate::new(
            "image_focus",
            "Image Focus",
            &["title", "image", "caption"],
            "A large image as the centre of attention with a short caption.",
            image_focus,
        ),
        LayoutTemplate::new(
            "content_left_image",
            "Image Left",
            &["title", "image", "text"],
            "Image on the left, text on the right.",
            content_left_image,
        ),
        LayoutTemplate::new(
            "content_multi_column",
            "Three Columns",
            &["title", "points"],
            "Parallel ideas split evenly into three columns.",
            content_multi_column,
        ),
        LayoutTemplate::new(
            "content_comparison",
            "Comparison",
            &["title", "left_title", "left_points", "right_title", "right_points"],
            "Pros and cons, before and after, or any two-sided comparison.",
            content_comparison,
        ),
        LayoutTemplate::new(
            "quote",
            "Quote",
            &["text", "caption"],
            "A memorable quotation; caption holds the author.",
            quote,
        ),
        LayoutTemplate::new(
            "statistic",
            "Big Number",
            &["title", "statistic", "text"],
            "One headline figure with a sentence of context.",
            statistic,
        ),
        LayoutTemplate::new(
            "timeline",
            "Timeline",
            &["title", "points"],
            "Chronological events. Start each point with a year or step.",
            timeline,
        ),
        LayoutTemplate::new(
            "process_flow",
            "Process",
            &["title", "points"],
            "A process of three or four steps.",
            process_flow,
        ),
        LayoutTemplate::new(
            "team_showcase",
            "Team",
            &["title", "points"],
            "Three or four people. Format each point as \"Name - Role\".",
            team_showcase,
        ),
        LayoutTemplate::new(
            "image_grid",
            "Image Pair",
            &["title", "image", "second_image"],
            "Two images side by side for visual comparison.",
            image_grid,
        ),
        LayoutTemplate::new(
            "math_theorem_proof",
            "Theorem",
            &["title", "text", "points"],
            "A theorem statement followed by proof steps. LaTeX between $...$.",
            math_theorem_proof,
        ),
        LayoutTemplate::new(
            "math_definition",
            "Definition",
            &["title", "text"],
            "A formal definition of a single concept.",
            math_definition,
        ),
        LayoutTemplate::new(
            "math_graph_explanation",
            "Graph and Explanation",
            &["title", "chart", "text"],
            "A chart on the left, its explanation on the right.",
            math_graph_explanation,
        ),
        LayoutTemplate::new(
            "conclusion",
            "Closing",
            &["title", "text"],
            "Final slide: thanks, summary or contact details.",
            conclusion,
        ),
    ]
}

fn heading(ctx: &RenderContext<'_>) -> Option<ElementRecord> {
    text_element(
        ctx,
        "title",
        Some("title"),
        ctx.content.text("title"),
        title_style(ctx, MARGIN_X, TITLE_TOP, CONTENT_WIDTH, TEXT_TITLE),
    )
}

fn rule(ctx: &RenderContext<'_>, suffix: &str, left: f64, top: f64, width: Length) -> Option<ElementRecord> {
    shape(
        ctx,
        suffix,
        ShapeType::Rectangle,
        Style::at(left, top, width, Length::Px(4.0))
            .background(ctx.accent())
            .with("borderRadius", "2px"),
    )
}

fn side_bar(ctx: &RenderContext<'_>) -> Option<ElementRecord> {
    shape(
        ctx,
        "side-bar",
        ShapeType::Rectangle,
        Style::at(0.0, 0.0, Length::Px(12.0), Length::Percent(100.0)).background(ctx.accent()),
    )
}

fn block(left: f64, top: f64, width: f64, height: f64) -> Style {
    Style::at(left, top, Length::Percent(width), Length::Percent(height))
}

fn title(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        rule(ctx, "accent", 46.0, 32.0, Length::Percent(8.0)),
        text_element(
            ctx,
            "title",
            Some("title"),
            &c.text("title").to_uppercase(),
            title_style(ctx, 10.0, 38.0, 80.0, 56.0)
                .align(TextAlign::Center)
                .with("letterSpacing", "0.05em"),
        ),
        text_element(
            ctx,
            "subtitle",
            Some("subtitle"),
            c.text("subtitle"),
            body_style(ctx, 15.0, 56.0, 70.0, TEXT_BODY)
                .align(TextAlign::Center)
                .with("opacity", 0.8),
        ),
    ]
}

fn title_image_background(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        image_element(ctx, "bg-img", "background_image", full_bleed()),
        shape(ctx, "overlay", ShapeType::Rectangle, full_bleed().background(HERO_OVERLAY)),
        text_element(
            ctx,
            "title",
            Some("title"),
            ctx.content.text("title"),
            title_style(ctx, 10.0, 45.0, 80.0, TEXT_TITLE_LARGE)
                .align(TextAlign::Center)
                .color("#ffffff"),
        ),
    ]
}

fn section_header(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        side_bar(ctx),
        text_element(
            ctx,
            "subtitle",
            Some("subtitle"),
            c.text("subtitle"),
            title_style(ctx, MARGIN_X, 25.0, CONTENT_WIDTH, 72.0)
                .color(ctx.accent())
                .line_height(1.1),
        ),
        text_element(
            ctx,
            "title",
            Some("title"),
            c.text("title"),
            title_style(ctx, MARGIN_X, 45.0, 80.0, TEXT_TITLE),
        ),
    ]
}

fn statement(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        shape(ctx, "bg", ShapeType::Rectangle, full_bleed().background(ctx.accent())),
        text_element(
            ctx,
            "title",
            Some("title"),
            &c.text("title").to_uppercase(),
            body_style(ctx, 10.0, 30.0, 80.0, TEXT_SUBTITLE)
                .font(&ctx.theme.body_font, TEXT_SUBTITLE, 700)
                .align(TextAlign::Center)
                .color("rgba(255, 255, 255, 0.8)")
                .with("letterSpacing", "0.2em"),
        ),
        text_element(
            ctx,
            "text",
            Some("text"),
            c.text("text"),
            title_style(ctx, 10.0, 45.0, 80.0, TEXT_TITLE_LARGE)
                .align(TextAlign::Center)
                .color("#ffffff"),
        ),
    ]
}

fn content(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        side_bar(ctx),
        text_element(
            ctx,
            "title",
            Some("title"),
            ctx.content.text("title"),
            title_style(ctx, MARGIN_X, 10.0, CONTENT_WIDTH, 44.0),
        ),
        rule(ctx, "title-line", MARGIN_X, 20.0, Length::Px(60.0)),
        list_element(
            ctx,
            "points",
            "points",
            "→ ",
            body_style(ctx, MARGIN_X, 28.0, 70.0, TEXT_SUBTITLE).line_height(1.6),
        ),
    ]
}

fn content_with_table(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            ctx.content.text("title"),
            title_style(ctx, MARGIN_X, TITLE_TOP, CONTENT_WIDTH, 34.0),
        ),
        table_element(
            ctx,
            "table",
            "table",
            block(MARGIN_X, CONTENT_TOP, CONTENT_WIDTH, 65.0)
                .color(&ctx.background.primary_text_color),
        ),
    ]
}

fn chart_focus(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            ctx.content.text("title"),
            title_style(ctx, MARGIN_X, TITLE_TOP, CONTENT_WIDTH, 34.0),
        ),
        chart_element(ctx, "chart", "chart", block(MARGIN_X, CONTENT_TOP, CONTENT_WIDTH, 65.0)),
    ]
}

fn two_column_text(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            ctx.content.text("title"),
            title_style(ctx, MARGIN_X, TITLE_TOP, CONTENT_WIDTH, 38.0),
        ),
        list_element(ctx, "left", "left_text", DEFAULT_BULLET, body_style(ctx, 8.0, 25.0, 42.0, 20.0)),
        shape(
            ctx,
            "divider",
            ShapeType::Rectangle,
            Style::at(52.0, 25.0, Length::Px(1.0), Length::Percent(60.0))
                .background(&ctx.background.secondary_text_color)
                .with("opacity", 0.2),
        ),
        list_element(ctx, "right", "right_text", DEFAULT_BULLET, body_style(ctx, 56.0, 25.0, 36.0, 20.0)),
    ]
}

fn two_column_image(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            ctx.content.text("title"),
            title_style(ctx, MARGIN_X, TITLE_TOP, CONTENT_WIDTH, 34.0),
        ),
        list_element(ctx, "text", "text", DEFAULT_BULLET, body_style(ctx, 8.0, 25.0, 40.0, TEXT_BODY_SMALL)),
        image_element(
            ctx,
            "image",
            "image",
            block(52.0, 25.0, 40.0, 60.0).with("borderRadius", "8px"),
        ),
    ]
}

fn image_focus(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            c.text("title"),
            title_style(ctx, MARGIN_X, 5.0, CONTENT_WIDTH, 32.0).align(TextAlign::Center),
        ),
        image_element(
            ctx,
            "img",
            "image",
            block(10.0, 18.0, 80.0, 65.0)
                .with("objectFit", "contain")
                .with("borderRadius", "8px"),
        ),
        text_element(
            ctx,
            "caption",
            Some("caption"),
            c.text("caption"),
            body_style(ctx, 20.0, 85.0, 60.0, TEXT_CAPTION)
                .align(TextAlign::Center)
                .with("fontStyle", "italic"),
        ),
    ]
}

fn content_left_image(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        heading(ctx),
        image_element(
            ctx,
            "image",
            "image",
            block(5.0, 25.0, 40.0, 60.0).with("borderRadius", "8px"),
        ),
        list_element(ctx, "text", "text", DEFAULT_BULLET, body_style(ctx, 50.0, 25.0, 45.0, TEXT_BODY)),
    ]
}

fn content_multi_column(ctx: &RenderContext<'_>) -> Rendered {
    let items: Vec<String> = ctx
        .content
        .items("points")
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .collect();
    let per_column = items.len().div_ceil(3).max(1);

    let mut elements = vec![heading(ctx)];
    for (i, column) in items.chunks(per_column).enumerate() {
        let left = 5.0 + 31.0 * i as f64;
        elements.push(items_element(
            ctx,
            &format!("col-{i}"),
            "points",
            column,
            DEFAULT_BULLET,
            body_style(ctx, left, CONTENT_TOP, 28.0, TEXT_BODY_SMALL),
        ));
    }
    elements
}

fn content_comparison(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    let side_title = |suffix: &str, slot: &str, left: f64, color: &str| {
        text_element(
            ctx,
            suffix,
            Some(slot),
            c.text(slot),
            title_style(ctx, left, 25.0, 35.0, 28.0)
                .align(TextAlign::Center)
                .color(color),
        )
    };
    let side_points = |suffix: &str, slot: &str, left: f64| {
        list_element(
            ctx,
            suffix,
            slot,
            DEFAULT_BULLET,
            body_style(ctx, left, 40.0, 35.0, TEXT_BODY_SMALL).line_height(1.6),
        )
    };

    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            c.text("title"),
            title_style(ctx, 10.0, 10.0, 80.0, 42.0).align(TextAlign::Center),
        ),
        shape(
            ctx,
            "divider",
            ShapeType::Rectangle,
            Style::at(50.0, 25.0, Length::Px(2.0), Length::Percent(60.0)).background(DIVIDER),
        ),
        side_title("left-title", "left_title", 10.0, PROS),
        side_points("left-points", "left_points", 10.0),
        side_title("right-title", "right_title", 55.0, CONS),
        side_points("right-points", "right_points", 55.0),
    ]
}

fn quote(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        text_element(
            ctx,
            "mark",
            None,
            "“",
            title_style(ctx, 10.0, 12.0, 10.0, 150.0)
                .color(ctx.accent())
                .line_height(1.0),
        ),
        text_element(
            ctx,
            "text",
            Some("text"),
            c.text("text"),
            title_style(ctx, 15.0, 40.0, 70.0, 44.0)
                .font(&ctx.theme.title_font, 44.0, 500)
                .align(TextAlign::Center)
                .line_height(1.4)
                .with("fontStyle", "italic"),
        ),
        text_element(
            ctx,
            "caption",
            Some("caption"),
            &prefixed("— ", c.text("caption")),
            body_style(ctx, 15.0, 68.0, 70.0, TEXT_SUBTITLE).align(TextAlign::Right),
        ),
    ]
}

fn statistic(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            c.text("title"),
            body_style(ctx, 10.0, 20.0, 80.0, 32.0).align(TextAlign::Center),
        ),
        text_element(
            ctx,
            "statistic",
            Some("statistic"),
            c.text("statistic"),
            title_style(ctx, 10.0, 32.0, 80.0, 140.0)
                .align(TextAlign::Center)
                .color(ctx.accent())
                .line_height(1.0),
        ),
        text_element(
            ctx,
            "text",
            Some("text"),
            c.text("text"),
            body_style(ctx, 20.0, 62.0, 60.0, TEXT_SUBTITLE).align(TextAlign::Center),
        ),
    ]
}

fn timeline(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            ctx.content.text("title"),
            title_style(ctx, 10.0, 10.0, 80.0, 52.0).align(TextAlign::Center),
        ),
        shape(
            ctx,
            "axis",
            ShapeType::Rectangle,
            Style::at(50.0, 25.0, Length::Px(4.0), Length::Percent(65.0))
                .background(ctx.accent())
                .with("opacity", 0.3),
        ),
        list_element(
            ctx,
            "points",
            "points",
            DEFAULT_BULLET,
            body_style(ctx, 20.0, 28.0, 60.0, TEXT_BODY)
                .align(TextAlign::Center)
                .line_height(2.5),
        ),
    ]
}

fn process_flow(ctx: &RenderContext<'_>) -> Rendered {
    let steps: Vec<String> = ctx
        .content
        .items("points")
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(4)
        .collect();
    let width = CONTENT_WIDTH / steps.len().max(1) as f64;

    let mut elements = vec![heading(ctx)];
    for (i, step) in steps.iter().enumerate() {
        let left = MARGIN_X + width * i as f64;
        let (fill, ink) = if i % 2 == 0 {
            (ctx.accent(), "#ffffff")
        } else {
            (CARD, ctx.background.secondary_text_color.as_str())
        };
        elements.push(shape(
            ctx,
            &format!("box-{i}"),
            ShapeType::Rectangle,
            block(left + 1.0, 40.0, width - 2.0, 20.0)
                .background(fill)
                .with("borderRadius", "8px"),
        ));
        elements.push(text_element(
            ctx,
            &format!("step-{i}"),
            Some("points"),
            step,
            Style {
                height: Length::Percent(16.0),
                ..body_style(ctx, left + 2.0, 42.0, width - 4.0, TEXT_CAPTION)
                    .align(TextAlign::Center)
                    .color(ink)
            },
        ));
        if i + 1 < steps.len() {
            elements.push(Some(ElementRecord::new(
                ctx.element_id(&format!("arrow-{i}")),
                None,
                ElementKind::Icon {
                    icon_name: "ArrowRight".to_string(),
                },
                block(left + width - 2.0, 48.0, 4.0, 4.0).color(&ctx.background.secondary_text_color),
            )));
        }
    }
    elements
}

/// Splits a `Name - Role` entry at the first dash or colon.
fn split_member(entry: &str) -> (&str, Option<&str>) {
    match entry.split_once(['-', '–', ':']) {
        Some((name, role)) if !role.trim().is_empty() => (name.trim(), Some(role.trim())),
        Some((name, _)) => (name.trim(), None),
        None => (entry.trim(), None),
    }
}

fn team_showcase(ctx: &RenderContext<'_>) -> Rendered {
    let members: Vec<String> = ctx
        .content
        .items("points")
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .take(4)
        .collect();
    let width = CONTENT_WIDTH / members.len().max(1) as f64;

    let mut elements = vec![heading(ctx)];
    for (i, entry) in members.iter().enumerate() {
        let (name, role) = split_member(entry);
        let left = MARGIN_X + width * i as f64;
        let avatar_left = left + width / 2.0 - 5.0;
        let initial: String = name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_else(|| "?".to_string());

        elements.push(shape(
            ctx,
            &format!("avatar-{i}"),
            ShapeType::Ellipse,
            Style::at(avatar_left, 32.0, Length::Percent(10.0), Length::Px(128.0)).background(CARD),
        ));
        elements.push(text_element(
            ctx,
            &format!("initial-{i}"),
            None,
            &initial,
            title_style(ctx, avatar_left, 36.0, 10.0, TEXT_TITLE)
                .align(TextAlign::Center)
                .color(AVATAR_INK),
        ));
        elements.push(text_element(
            ctx,
            &format!("name-{i}"),
            Some("points"),
            name,
            title_style(ctx, left, 55.0, width, 20.0).align(TextAlign::Center),
        ));
        if let Some(role) = role {
            elements.push(text_element(
                ctx,
                &format!("role-{i}"),
                None,
                role,
                body_style(ctx, left, 61.0, width, TEXT_CAPTION)
                    .align(TextAlign::Center)
                    .color(ctx.accent()),
            ));
        }
    }
    elements
}

fn image_grid(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            ctx.content.text("title"),
            title_style(ctx, 5.0, TITLE_TOP, 90.0, 42.0).align(TextAlign::Center),
        ),
        image_element(ctx, "image-1", "image", block(5.0, 25.0, 43.0, 60.0).with("borderRadius", "8px")),
        image_element(
            ctx,
            "image-2",
            "second_image",
            block(52.0, 25.0, 43.0, 60.0).with("borderRadius", "8px"),
        ),
    ]
}

fn math_theorem_proof(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    let has_proof = c.items("points").iter().any(|p| !p.trim().is_empty());
    vec![
        heading(ctx),
        shape(
            ctx,
            "theorem-bg",
            ShapeType::Rectangle,
            block(10.0, 22.0, 80.0, 25.0)
                .background("rgba(59, 130, 246, 0.1)")
                .with("borderRadius", "8px")
                .with("borderLeft", format!("6px solid {}", ctx.accent())),
        ),
        text_element(
            ctx,
            "theorem-label",
            None,
            "THEOREM",
            body_style(ctx, 12.0, 24.0, 76.0, TEXT_CAPTION)
                .font(&ctx.theme.body_font, TEXT_CAPTION, 700)
                .color(ctx.accent())
                .with("letterSpacing", "0.1em"),
        ),
        text_element(
            ctx,
            "theorem",
            Some("text"),
            c.text("text"),
            body_style(ctx, 12.0, 30.0, 76.0, TEXT_SUBTITLE)
                .color(&ctx.background.primary_text_color)
                .with("fontStyle", "italic"),
        ),
        text_element(
            ctx,
            "proof-label",
            None,
            if has_proof { "Proof:" } else { "" },
            body_style(ctx, 10.0, 52.0, 80.0, 20.0).with("fontStyle", "italic"),
        ),
        list_element(
            ctx,
            "proof",
            "points",
            DEFAULT_BULLET,
            body_style(ctx, 10.0, 58.0, 80.0, 20.0)
                .color(&ctx.background.primary_text_color)
                .line_height(1.5),
        ),
    ]
}

fn math_definition(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        heading(ctx),
        shape(
            ctx,
            "def-frame",
            ShapeType::Rectangle,
            block(15.0, 30.0, 70.0, 50.0)
                .background("transparent")
                .with("border", format!("3px solid {}", ctx.accent()))
                .with("borderRadius", "12px"),
        ),
        shape(
            ctx,
            "def-label-bg",
            ShapeType::Rectangle,
            Style::at(40.0, 28.0, Length::Percent(20.0), Length::Px(40.0)).background(&ctx.background.color),
        ),
        text_element(
            ctx,
            "def-label",
            None,
            "DEFINITION",
            Style {
                height: Length::Px(40.0),
                ..body_style(ctx, 40.0, 28.0, 20.0, 20.0)
                    .font(&ctx.theme.body_font, 20.0, 700)
                    .align(TextAlign::Center)
                    .color(ctx.accent())
            },
        ),
        text_element(
            ctx,
            "text",
            Some("text"),
            c.text("text"),
            body_style(ctx, 20.0, 38.0, 60.0, 28.0)
                .align(TextAlign::Center)
                .color(&ctx.background.primary_text_color)
                .line_height(1.6),
        ),
    ]
}

fn math_graph_explanation(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        heading(ctx),
        chart_element(ctx, "chart", "chart", block(5.0, 25.0, 45.0, 60.0)),
        list_element(ctx, "text", "text", DEFAULT_BULLET, body_style(ctx, 55.0, 25.0, 40.0, TEXT_BODY)),
    ]
}

fn conclusion(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        rule(ctx, "accent", 46.0, 24.0, Length::Percent(8.0)),
        text_element(
            ctx,
            "title",
            Some("title"),
            c.text("title"),
            title_style(ctx, 10.0, 30.0, 80.0, 72.0).align(TextAlign::Center),
        ),
        text_element(
            ctx,
            "text",
            Some("text"),
            c.text("text"),
            body_style(ctx, 10.0, 50.0, 80.0, TEXT_HEADING).align(TextAlign::Center),
        ),
    ]
}
