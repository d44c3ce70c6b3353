use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Generates a diff string in the unified format between two text inputs.
/// Includes a simple summary of lines added/removed.
///
/// # Arguments
/// * `base_text` - The "original" text content, e.g. the Markdown of the base deck.
/// * `changed_text` - The "new" text content.
/// * `base_filename` - The name to use for the original file in the diff header (e.g., "a/deck.md").
/// * `changed_filename` - The name to use for the new file in the diff header (e.g., "b/deck.md").
///
/// # Returns
/// A `String` containing the summary and the unified diff.
pub fn generate_markdown_diff(
    base_text: &str,
    changed_text: &str,
    base_filename: &str,
    changed_filename: &str,
) -> String {
    let diff = TextDiff::from_lines(base_text, changed_text);
    let mut output = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        output,
        "{}",
        diff.unified_diff().header(base_filename, changed_filename)
    );

    let (mut added_lines, mut removed_lines) = (0, 0);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added_lines += 1,
            ChangeTag::Delete => removed_lines += 1,
            ChangeTag::Equal => (),
        }
    }

    let summary = format!(
        "## Summary of Changes (Text Content)\n\n- Lines Added: {}\n- Lines Removed: {}\n\n---\n\n",
        added_lines, removed_lines
    );

    summary + &output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::DeckCompiler;
    use crate::config::CompilerConfig;
    use crate::converters::markdown::extract_text_from_deck;
    use crate::models::template::AssetCache;

    fn markdown_of(payload: &str) -> String {
        let deck = DeckCompiler::for_topic("Team offsite", false, CompilerConfig::default())
            .expect("compiler")
            .compile_payload(payload, &AssetCache::new());
        extract_text_from_deck(&deck)
    }

    #[test]
    fn markdown_diff_of_two_decks() {
        let base_md = markdown_of(
            r#"{"title": "Offsite", "slides": [
                {"layout": "content", "title": "Agenda", "points": ["Kickoff", "Workshops"]}]}"#,
        );
        let changed_md = markdown_of(
            r#"{"title": "Offsite", "slides": [
                {"layout": "content", "title": "Agenda", "points": ["Kickoff", "Hackathon"]}]}"#,
        );

        let diff_output = generate_markdown_diff(&base_md, &changed_md, "a/deck.md", "b/deck.md");

        assert!(diff_output.starts_with("## Summary of Changes"));
        assert!(diff_output.contains("--- a/deck.md"));
        assert!(diff_output.contains("+++ b/deck.md"));
        assert!(diff_output.contains("@@"));
        assert!(diff_output.contains("Hackathon"));
        assert!(diff_output.contains("- Lines Added: 1\n- Lines Removed: 1"));
    }

    #[test]
    fn identical_text_has_an_empty_diff() {
        let output = generate_markdown_diff("# Deck\n", "# Deck\n", "a", "b");
        assert!(output.contains("- Lines Added: 0\n- Lines Removed: 0"));
        assert!(!output.contains("@@"));
    }
}
