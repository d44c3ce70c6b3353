use crate::models::{
    deck::{CompiledDeck, CompiledSlide},
    element::{ElementKind, ElementRecord, TableCell},
};
use std::cmp::Ordering;
use std::fmt::Write;

/// Compares two elements by their top edge.
fn compare_elements_by_top(a: &ElementRecord, b: &ElementRecord) -> Ordering {
    a.style.top.total_cmp(&b.style.top)
}

/// Image placeholders are text elements, but their text describes a missing image
/// rather than slide content.
fn is_placeholder(element: &ElementRecord) -> bool {
    element.style.extra.contains_key("placeholderFor")
}

/// Formats table cells row by row, cells separated by `" | "`.
fn extract_text_from_table(cell_data: &[Vec<TableCell>]) -> Option<String> {
    let rows: Vec<String> = cell_data
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.content.trim())
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .filter(|row| !row.is_empty())
        .collect();
    if rows.is_empty() {
        None
    } else {
        Some(rows.join("\n"))
    }
}

/// Extracts the Markdown text of a single element.
fn extract_text_from_element(element: &ElementRecord) -> Option<String> {
    match &element.kind {
        ElementKind::Text { content } if !is_placeholder(element) => {
            let trimmed = content.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        ElementKind::Image { src, prompt } => Some(format!(
            "![{}]({})",
            prompt.as_deref().unwrap_or_default(),
            src
        )),
        ElementKind::Table { cell_data, .. } => extract_text_from_table(cell_data),
        ElementKind::Chart { chart_type, data } => {
            let series: Vec<String> = data
                .datasets
                .iter()
                .map(|d| {
                    let values: Vec<String> = d.data.iter().map(|v| v.to_string()).collect();
                    format!("{}: {}", d.label, values.join(", "))
                })
                .collect();
            Some(format!(
                "[{:?} chart: {}] {}",
                chart_type,
                data.labels.join(", "),
                series.join("; ")
            ))
        }
        _ => None,
    }
}

/// Extracts the text of all elements on a slide, sorted top to bottom.
fn extract_text_from_slide(slide: &CompiledSlide) -> Option<String> {
    let mut sorted_elements: Vec<&ElementRecord> = slide.elements.iter().collect();
    sorted_elements.sort_by(|a, b| compare_elements_by_top(a, b));

    let slide_parts: Vec<String> = sorted_elements
        .into_iter()
        .filter_map(extract_text_from_element)
        .collect();

    if slide_parts.is_empty() {
        None
    } else {
        Some(slide_parts.join("\n"))
    }
}

/// Renders a compiled deck as a Markdown outline.
/// Slides without any text are skipped; the rest are separated by `---`.
///
/// # Arguments
///
/// * `deck` - A reference to the compiled deck.
///
/// # Returns
///
/// A `String` with the deck title as `#` header and one `## Slide N` section per slide.
pub fn extract_text_from_deck(deck: &CompiledDeck) -> String {
    let mut full_text = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        full_text,
        "# {}\n",
        deck.title.as_deref().unwrap_or("Presentation")
    );

    let mut first_slide = true;
    for (index, slide) in deck.slides.iter().enumerate() {
        let Some(slide_content) = extract_text_from_slide(slide) else {
            continue;
        };
        if !first_slide {
            let _ = writeln!(full_text, "\n---\n");
        }
        first_slide = false;

        let _ = writeln!(full_text, "## Slide {}\n", index + 1);
        let _ = writeln!(full_text, "{}", slide_content);
    }

    full_text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::element::{Length, Style};
    use crate::models::theme::Background;

    fn text(id: &str, top: f64, content: &str) -> ElementRecord {
        ElementRecord::new(
            id,
            None,
            ElementKind::Text {
                content: content.into(),
            },
            Style::at(8.0, top, Length::Percent(80.0), Length::Auto),
        )
    }

    fn slide(id: &str, elements: Vec<ElementRecord>) -> CompiledSlide {
        CompiledSlide {
            id: id.into(),
            layout: "content".into(),
            background: Background::default(),
            elements,
        }
    }

    #[test]
    fn slides_are_sorted_and_separated() {
        let placeholder = ElementRecord::new(
            "ph",
            Some("image"),
            ElementKind::Text {
                content: "🖼️ Visual Element".into(),
            },
            Style::at(50.0, 20.0, Length::Percent(40.0), Length::Percent(40.0)).with("placeholderFor", "image"),
        );
        let deck = CompiledDeck {
            title: Some("Plan".into()),
            theme: "Executive Blue".into(),
            slides: vec![
                slide("slide-0", vec![text("b", 40.0, "Second"), text("a", 10.0, " First "), placeholder]),
                slide("slide-1", vec![]),
                slide("slide-2", vec![text("c", 10.0, "Third")]),
            ],
        };
        let markdown = extract_text_from_deck(&deck);
        assert_eq!(
            markdown,
            "# Plan\n\n## Slide 1\n\nFirst\nSecond\n\n---\n\n## Slide 3\n\nThird\n"
        );
    }

    #[test]
    fn tables_render_row_by_row() {
        let cell = |content: &str| TableCell {
            id: "c".into(),
            content: content.into(),
            bold: false,
        };
        let rows = vec![vec![cell("Name"), cell("Score")], vec![cell(""), cell("")], vec![cell("Ada"), cell("9")]];
        assert_eq!(extract_text_from_table(&rows).as_deref(), Some("Name | Score\nAda | 9"));
        assert_eq!(extract_text_from_table(&[]), None);
    }
}
