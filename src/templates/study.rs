//! Layouts of the study-notes catalog.

use super::helpers::*;
use crate::models::element::{ElementRecord, Length, ShapeType, Style, TextAlign};
use crate::models::template::{LayoutTemplate, RenderContext};

type Rendered = Vec<Option<ElementRecord>>;

pub const DEFAULT_LAYOUT: &str = "study_breakdown";

pub fn templates() -> Vec<LayoutTemplate> {
    vec![
        LayoutTemplate::new(
            "study_title",
            "Study Title",
            &["title", "subtitle"],
            "Topic of the study set and what it covers.",
            study_title,
        ),
        LayoutTemplate::new(
            "study_concept",
            "Concept Card",
            &["title", "text"],
            "One key concept or definition explained in a short paragraph.",
            study_concept,
        ),
        LayoutTemplate::new(
            "study_breakdown",
            "Breakdown",
            &["title", "points"],
            "A topic broken into its key points.",
            study_breakdown,
        ),
        LayoutTemplate::new(
            "study_qa",
            "Question and Answer",
            &["title", "text"],
            "Self-test card. Title holds the question, text the answer.",
            study_qa,
        ),
        LayoutTemplate::new(
            "study_summary",
            "Summary",
            &["title", "points"],
            "Recap of the main takeaways.",
            study_summary,
        ),
        LayoutTemplate::new(
            "study_sources",
            "Sources",
            &["title", "points"],
            "References and further reading, one per point.",
            study_sources,
        ),
    ]
}

fn study_title(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            c.text("title"),
            title_style(ctx, 10.0, 35.0, 80.0, TEXT_TITLE_LARGE).align(TextAlign::Center),
        ),
        text_element(
            ctx,
            "subtitle",
            Some("subtitle"),
            c.text("subtitle"),
            body_style(ctx, 10.0, 55.0, 80.0, TEXT_SUBTITLE).align(TextAlign::Center),
        ),
    ]
}

fn study_concept(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        shape(
            ctx,
            "card",
            ShapeType::Rectangle,
            Style::at(10.0, 10.0, Length::Percent(80.0), Length::Percent(80.0))
                .background("rgba(255, 255, 255, 0.5)")
                .with("borderRadius", "16px"),
        ),
        text_element(
            ctx,
            "title",
            Some("title"),
            c.text("title"),
            title_style(ctx, 15.0, 18.0, 70.0, TEXT_HEADING),
        ),
        text_element(
            ctx,
            "text",
            Some("text"),
            c.text("text"),
            body_style(ctx, 15.0, 40.0, 70.0, TEXT_SUBTITLE).line_height(1.6),
        ),
    ]
}

fn study_breakdown(ctx: &RenderContext<'_>) -> Rendered {
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            ctx.content.text("title"),
            title_style(ctx, 10.0, 10.0, 80.0, TEXT_TITLE),
        ),
        list_element(
            ctx,
            "points",
            "points",
            DEFAULT_BULLET,
            body_style(ctx, 12.0, CONTENT_TOP, 76.0, TEXT_BODY).line_height(1.6),
        ),
    ]
}

fn study_qa(ctx: &RenderContext<'_>) -> Rendered {
    let c = ctx.content;
    vec![
        text_element(
            ctx,
            "question",
            Some("title"),
            &prefixed("Q: ", c.text("title")),
            title_style(ctx, 10.0, 15.0, 80.0, TEXT_HEADING).color(ctx.accent()),
        ),
        shape(
            ctx,
            "divider",
            ShapeType::Rectangle,
            Style::at(10.0, 45.0, Length::Percent(80.0), Length::Px(2.0))
                .background(&ctx.background.secondary_text_color)
                .with("opacity", 0.3),
        ),
        text_element(
            ctx,
            "answer",
            Some("text"),
            &prefixed("A: ", c.text("text")),
            body_style(ctx, 10.0, 55.0, 80.0, TEXT_SUBTITLE).line_height(1.5),
        ),
    ]
}

fn study_summary(ctx: &RenderContext<'_>) -> Rendered {
    let title = match ctx.content.text("title").trim() {
        "" => "Summary",
        title => title,
    };
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            &prefixed("📚 ", title),
            title_style(ctx, 10.0, 12.0, 80.0, TEXT_TITLE).align(TextAlign::Center),
        ),
        list_element(
            ctx,
            "points",
            "points",
            "✅ ",
            body_style(ctx, 15.0, 30.0, 70.0, TEXT_BODY).line_height(1.6),
        ),
    ]
}

fn study_sources(ctx: &RenderContext<'_>) -> Rendered {
    let title = match ctx.content.text("title").trim() {
        "" => "References",
        title => title,
    };
    vec![
        text_element(
            ctx,
            "title",
            Some("title"),
            title,
            title_style(ctx, MARGIN_X, 10.0, 80.0, TEXT_HEADING),
        ),
        list_element(
            ctx,
            "points",
            "points",
            "[Ref] ",
            body_style(ctx, MARGIN_X, CONTENT_TOP, 80.0, TEXT_BODY_SMALL)
                .font("monospace", TEXT_BODY_SMALL, 400)
                .line_height(1.6),
        ),
    ]
}
