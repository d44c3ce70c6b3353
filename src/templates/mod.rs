//! Built-in layout catalogs and the lookup rules shared by every catalog.

pub mod helpers;
pub mod standard;
pub mod study;

use log::debug;
use std::collections::HashSet;

use crate::errors::{CompilerError, Result};
use crate::models::template::LayoutTemplate;

/// An immutable, ordered set of layout templates with a designated default.
///
/// Catalog order matters: fuzzy id matching picks the first template that matches.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<LayoutTemplate>,
    default_index: usize,
}

impl Catalog {
    /// Creates a catalog from externally supplied templates.
    ///
    /// # Arguments
    ///
    /// * `templates` - Templates in lookup order.
    /// * `default_layout` - Id of the template used when a request cannot be resolved.
    ///
    /// # Errors
    ///
    /// Fails when `templates` is empty, when two templates share an id, or when
    /// `default_layout` names none of them.
    pub fn new(templates: Vec<LayoutTemplate>, default_layout: &str) -> Result<Self> {
        if templates.is_empty() {
            return Err(CompilerError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id.as_str()) {
                return Err(CompilerError::DuplicateLayout(template.id.clone()));
            }
        }
        let default_index = templates
            .iter()
            .position(|t| t.id == default_layout)
            .ok_or_else(|| CompilerError::UnknownDefaultLayout(default_layout.to_string()))?;
        Ok(Catalog {
            templates,
            default_index,
        })
    }

    fn build(templates: Vec<LayoutTemplate>, default_layout: &str) -> Self {
        let default_index = templates
            .iter()
            .position(|t| t.id == default_layout)
            .unwrap_or(0);
        Catalog {
            templates,
            default_index,
        }
    }

    /// The catalog used for regular presentation decks.
    pub fn standard() -> Self {
        Self::build(standard::templates(), standard::DEFAULT_LAYOUT)
    }

    /// The catalog used for study-note decks.
    pub fn study() -> Self {
        Self::build(study::templates(), study::DEFAULT_LAYOUT)
    }

    /// Picks the catalog for a deck mode.
    pub fn for_mode(study_deck: bool) -> Self {
        if study_deck {
            Self::study()
        } else {
            Self::standard()
        }
    }

    pub fn get(&self, id: &str) -> Option<&LayoutTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayoutTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn default_template(&self) -> &LayoutTemplate {
        &self.templates[self.default_index]
    }

    /// Finds the template a requested layout id refers to.
    ///
    /// Tries an exact (case-insensitive) id match first, then the first template whose
    /// id contains the request or is contained in it.
    pub fn find(&self, requested: &str) -> Option<&LayoutTemplate> {
        let req = requested.trim();
        if let Some(template) = self.templates.iter().find(|t| t.id.eq_ignore_ascii_case(req)) {
            return Some(template);
        }
        if req.is_empty() {
            return None;
        }
        let req = req.to_lowercase();
        let template = self.templates.iter().find(|t| {
            let id = t.id.to_lowercase();
            id.contains(&req) || req.contains(&id)
        })?;
        debug!("Layout '{}' fuzzy-matched to '{}'", requested, template.id);
        Some(template)
    }

    /// Resolves a requested layout id to a template, falling back to the default
    /// template when [`Catalog::find`] has no match.
    pub fn resolve(&self, requested: &str) -> &LayoutTemplate {
        self.find(requested).unwrap_or_else(|| {
            let fallback = self.default_template();
            debug!("Unknown layout '{}', using default '{}'", requested, fallback.id);
            fallback
        })
    }

    /// A Markdown menu of the catalog (id, slots, guideline) for layout-picking prompts.
    pub fn layout_menu(&self) -> String {
        self.templates
            .iter()
            .map(|t| {
                format!(
                    "- `{}` ({}): slots [{}]. {}",
                    t.id,
                    t.name,
                    t.slots.join(", "),
                    t.usage_guideline
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::element::ElementRecord;
    use crate::models::template::RenderContext;

    fn blank(_: &RenderContext<'_>) -> Vec<Option<ElementRecord>> {
        Vec::new()
    }

    #[test]
    fn resolves_exact_fuzzy_and_default() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.resolve("quote").id, "quote");
        assert_eq!(catalog.resolve("  QUOTE ").id, "quote");
        assert_eq!(catalog.resolve("chart").id, "chart_focus");
        assert_eq!(catalog.resolve("two_column_image_layout").id, "two_column_image");
        assert_eq!(catalog.resolve("does-not-exist").id, "content");
        assert_eq!(catalog.resolve("").id, "content");
        assert!(catalog.find("does-not-exist").is_none());
    }

    #[test]
    fn study_catalog_defaults_to_breakdown() {
        let catalog = Catalog::study();
        assert_eq!(catalog.default_template().id, "study_breakdown");
        assert_eq!(catalog.resolve("qa").id, "study_qa");
        assert!(!catalog.contains("content"));
    }

    #[test]
    fn rejects_invalid_catalogs() {
        assert!(matches!(Catalog::new(Vec::new(), "x"), Err(CompilerError::EmptyCatalog)));

        let twice = vec![
            LayoutTemplate::new("a", "A", &["title"], "", blank),
            LayoutTemplate::new("a", "A again", &["title"], "", blank),
        ];
        assert!(matches!(Catalog::new(twice, "a"), Err(CompilerError::DuplicateLayout(id)) if id == "a"));

        let single = vec![LayoutTemplate::new("a", "A", &["title"], "", blank)];
        assert!(matches!(
            Catalog::new(single.clone(), "b"),
            Err(CompilerError::UnknownDefaultLayout(id)) if id == "b"
        ));
        let catalog = Catalog::new(single, "a").expect("valid catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resolve("zzz").id, "a");
    }

    #[test]
    fn mixed_case_ids_match_any_case() {
        let templates = vec![
            LayoutTemplate::new("Quote", "Quote", &["text"], "", blank),
            LayoutTemplate::new("Team_Showcase", "Team", &["points"], "", blank),
        ];
        let catalog = Catalog::new(templates, "Quote").expect("valid catalog");
        assert_eq!(catalog.find("quote").map(|t| t.id.as_str()), Some("Quote"));
        assert_eq!(catalog.find("  QUOTE ").map(|t| t.id.as_str()), Some("Quote"));
        assert_eq!(catalog.find("team_showcase").map(|t| t.id.as_str()), Some("Team_Showcase"));
        assert_eq!(catalog.find("showcase").map(|t| t.id.as_str()), Some("Team_Showcase"));
    }

    #[test]
    fn menu_lists_every_layout() {
        let catalog = Catalog::standard();
        let menu = catalog.layout_menu();
        assert_eq!(menu.lines().count(), catalog.len());
        assert!(menu.contains("`chart_focus` (Chart): slots [title, chart]."));
    }
}
