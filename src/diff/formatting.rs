use super::error::DiffError;
use crate::diff::structured::{Change, ChangeType};
use crate::models::deck::CompiledDeck;
use similar::TextDiff;
use std::{collections::BTreeMap, fmt::Write};

/// Reflow changes that follow content edits; hidden from simplified summaries.
const REFLOW_DESCRIPTIONS: &[&str] = &["Position", "Size", "Font Size"];

/// Generates a unified diff of the two decks' pretty-printed JSON.
pub(crate) fn generate_git_diff(
    old_deck: &CompiledDeck,
    new_deck: &CompiledDeck,
    structured_changes: &[Change],
) -> Result<String, DiffError> {
    let old_str = serde_json::to_string_pretty(old_deck)?;
    let new_str = serde_json::to_string_pretty(new_deck)?;

    if structured_changes.is_empty() && old_str == new_str {
        return Ok("--- a/deck.json\n+++ b/deck.json\n\nNo changes detected.\n".to_string());
    }

    let diff = TextDiff::from_lines(&old_str, &new_str);
    let mut output = String::new();
    write!(
        output,
        "{}",
        diff.unified_diff()
            .context_radius(3)
            .header("a/deck.json", "b/deck.json")
    )?;
    Ok(output)
}

/// Splits `slides[N].rest` into the slide index and `rest`.
fn parse_slide_path(path: &str) -> Option<(usize, &str)> {
    let after = path.strip_prefix("slides[")?;
    let end = after.find(']')?;
    let index = after[..end].parse().ok()?;
    let rest = &after[end + 1..];
    Some((index, rest.strip_prefix('.').unwrap_or(rest)))
}

/// Splits `elements[N].rest` into the element index and `rest`.
fn parse_element_path(path: &str) -> Option<(usize, &str)> {
    let after = path.strip_prefix("elements[")?;
    let end = after.find(']')?;
    let index = after[..end].parse().ok()?;
    let rest = &after[end + 1..];
    Some((index, rest.strip_prefix('.').unwrap_or(rest)))
}

/// The id of an element, looked up in the deck where it exists.
fn element_id<'d>(deck: &'d CompiledDeck, slide: usize, element: usize) -> Option<&'d str> {
    deck.slides
        .get(slide)?
        .elements
        .get(element)
        .map(|e| e.id.as_str())
}

/// Describes *what* changed from the property path below an element.
fn describe_element_target(property: &str) -> String {
    match property {
        "" => "Element".to_string(),
        "content" => "Text".to_string(),
        "style.left" | "style.top" => "Position".to_string(),
        "style.width" | "style.height" => "Size".to_string(),
        "style.color" => "Text Color".to_string(),
        "style.backgroundColor" => "Fill".to_string(),
        "style.fontSize" => "Font Size".to_string(),
        "style.fontFamily" => "Font Family".to_string(),
        "style.fontWeight" => "Font Weight".to_string(),
        "style.textAlign" => "Alignment".to_string(),
        "src" => "Image Source".to_string(),
        "prompt" => "Image Prompt".to_string(),
        "chartType" => "Chart Type".to_string(),
        "type" => "Element Type".to_string(),
        p if p.starts_with("cellData") => "Table Cell".to_string(),
        p if p.starts_with("data.") => "Chart Data".to_string(),
        p if p.starts_with("style.") => "Style".to_string(),
        p => capitalize_last_segment(p),
    }
}

/// Describes a change to a slide's own fields or to the deck itself.
fn describe_general_target(path: &str) -> String {
    match path {
        "" => "Slide".to_string(),
        "layout" => "Layout".to_string(),
        "title" => "Deck Title".to_string(),
        "theme" => "Theme".to_string(),
        p if p.starts_with("background") => "Background".to_string(),
        p => capitalize_last_segment(p),
    }
}

fn capitalize_last_segment(path: &str) -> String {
    path.split(['.', '['])
        .filter(|s| !s.is_empty() && *s != "]")
        .last()
        .map(|s| {
            let mut chars = s.chars();
            match chars.next() {
                None => "Property".to_string(),
                Some(f) => f.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .unwrap_or_else(|| "Property".to_string())
}

/// Formats the location for display within the summary line.
fn format_location(location: &str, is_simplify: bool) -> String {
    if location.is_empty() || is_simplify {
        String::new()
    } else {
        format!(" (at `{}`)", location)
    }
}

/// Generates a human-readable summary string from the structured changes, grouped by slide.
///
/// Element changes are located by element id, looked up in the new deck (or the old one
/// for removals). Simplified summaries omit locations and the position and size changes
/// that follow from reflowed content.
pub(crate) fn generate_readable_summary(
    old_deck: &CompiledDeck,
    new_deck: &CompiledDeck,
    changes: &[Change],
    is_simplify: bool,
) -> Result<String, DiffError> {
    let mut changes_by_slide: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    let mut general_changes: Vec<String> = Vec::new();
    let mut counts = (0, 0, 0); // (add, remove, modify)

    for change in changes {
        let (slide_index, desc, location) = match parse_slide_path(&change.path) {
            Some((slide, rest)) => match parse_element_path(rest) {
                Some((element, property)) => {
                    let lookup = match change.change_type {
                        ChangeType::Removed => element_id(old_deck, slide, element),
                        _ => element_id(new_deck, slide, element).or_else(|| element_id(old_deck, slide, element)),
                    };
                    let id = lookup
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("elements[{}]", element));
                    let location = if property.is_empty() {
                        id
                    } else {
                        format!("{}.{}", id, property)
                    };
                    (Some(slide), describe_element_target(property), location)
                }
                None => (Some(slide), describe_general_target(rest), rest.to_string()),
            },
            None => (None, describe_general_target(&change.path), String::new()),
        };

        if is_simplify && REFLOW_DESCRIPTIONS.contains(&desc.as_str()) {
            continue;
        }

        let location = format_location(&location, is_simplify);
        let line = match change.change_type {
            ChangeType::Added => {
                counts.0 += 1;
                format!("- Added {}{}", desc, location)
            }
            ChangeType::Removed => {
                counts.1 += 1;
                format!("- Removed {}{}", desc, location)
            }
            ChangeType::Modified => {
                counts.2 += 1;
                match (&change.old_value, &change.new_value) {
                    (Some(old), Some(new)) => format!(
                        "- Changed {} from {} to {}{}",
                        desc,
                        old.format_for_display(),
                        new.format_for_display(),
                        location
                    ),
                    _ => format!("- Modified {}{}", desc, location),
                }
            }
        };

        match slide_index {
            Some(idx) => changes_by_slide.entry(idx).or_default().push(line),
            None => general_changes.push(line),
        }
    }

    let total = counts.0 + counts.1 + counts.2;
    let mut summary = format!(
        "## Summary:\nDetected {} relevant changes: {} additions, {} removals, {} modifications.",
        total, counts.0, counts.1, counts.2
    );
    if total == 0 {
        summary.push_str("\n\nNo relevant changes detected.");
        return Ok(summary);
    }

    summary.push_str("\n\n## Details:");
    if !general_changes.is_empty() {
        summary.push_str("\n\n### General Changes:\n");
        summary.push_str(&general_changes.join("\n"));
    }
    for (slide_index, slide_lines) in &changes_by_slide {
        write!(summary, "\n\n### Slide {}:\n", slide_index + 1)?;
        summary.push_str(&slide_lines.join("\n"));
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::structured::ValueRepr;

    #[test]
    fn paths_split_into_slide_and_element() {
        assert_eq!(
            parse_slide_path("slides[12].elements[3].style.top"),
            Some((12, "elements[3].style.top"))
        );
        assert_eq!(parse_slide_path("slides[1]"), Some((1, "")));
        assert_eq!(parse_slide_path("theme"), None);
        assert_eq!(parse_element_path("elements[3].content"), Some((3, "content")));
        assert_eq!(parse_element_path("layout"), None);
    }

    #[test]
    fn targets_have_friendly_names() {
        assert_eq!(describe_element_target("content"), "Text");
        assert_eq!(describe_element_target("style.top"), "Position");
        assert_eq!(describe_element_target("cellData[1][0].content"), "Table Cell");
        assert_eq!(describe_element_target("data.datasets[0].data[2]"), "Chart Data");
        assert_eq!(describe_element_target("style.objectFit"), "Style");
        assert_eq!(describe_general_target("background.color"), "Background");
        assert_eq!(capitalize_last_segment("foo.barBaz"), "BarBaz");
    }

    #[test]
    fn empty_change_list_reports_nothing() {
        let deck = CompiledDeck {
            title: None,
            theme: "Executive Blue".into(),
            slides: vec![],
        };
        let summary = generate_readable_summary(&deck, &deck, &[], false).expect("summary");
        assert!(summary.ends_with("No relevant changes detected."));
        let git = generate_git_diff(&deck, &deck, &[]).expect("git diff");
        assert!(git.contains("No changes detected."));
    }

    #[test]
    fn general_changes_are_listed_first() {
        let deck = CompiledDeck {
            title: None,
            theme: "A".into(),
            slides: vec![],
        };
        let changes = vec![Change {
            path: "theme".into(),
            change_type: ChangeType::Modified,
            old_value: Some(ValueRepr::String("A".into())),
            new_value: Some(ValueRepr::String("B".into())),
        }];
        let summary = generate_readable_summary(&deck, &deck, &changes, false).expect("summary");
        assert!(summary.contains("### General Changes:\n- Changed Theme from 'A' to 'B'"));
        assert!(summary.contains("1 modifications"));
    }
}
