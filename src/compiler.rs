//! The end-to-end compile pipeline: payload text in, positioned slides out.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::classify::Classifier;
use crate::config::CompilerConfig;
use crate::converters::geometry::{resolve_with, HeightCache};
use crate::errors::Result;
use crate::ingest::normalize::{normalize, SlotKind};
use crate::ingest::{parse_deck, parse_slide};
use crate::models::content::{ContentSpec, SlotValue};
use crate::models::deck::{CompiledDeck, CompiledSlide, DeckSpec, RawSlide};
use crate::models::template::{AssetCache, RenderContext};
use crate::models::theme::{select_theme, Theme};
use crate::templates::Catalog;

/// An image the external fetcher should produce before compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub slide_index: usize,
    pub slot: String,
    pub prompt: String,
    /// The asset cache key the resulting URL belongs under.
    pub key: String,
}

/// Compiles model output into positioned slides for one deck mode.
///
/// Catalog, theme and configuration are read-only after construction, so one compiler
/// can serve many concurrent compile calls. Each call uses its own text-height cache.
#[derive(Debug, Clone)]
pub struct DeckCompiler {
    catalog: Catalog,
    theme: Theme,
    config: CompilerConfig,
    classifier: Classifier,
}

impl DeckCompiler {
    /// Creates a compiler.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The layout catalog of the deck mode.
    /// * `classifier` - Layout scoring for slides whose layout has to be inferred.
    /// * `theme` - The deck theme.
    /// * `config` - Tuning; validated here.
    pub fn new(catalog: Catalog, classifier: Classifier, theme: Theme, config: CompilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(DeckCompiler {
            catalog,
            theme,
            config,
            classifier,
        })
    }

    /// A compiler with the built-in catalog, scoring table and theme packs of a deck
    /// mode, picking the theme from the deck topic.
    pub fn for_topic(topic: &str, study_deck: bool, config: CompilerConfig) -> Result<Self> {
        let packs = if study_deck {
            Theme::study_packs()
        } else {
            Theme::standard_packs()
        };
        let theme = select_theme(topic, &packs).cloned().unwrap_or_else(|| Theme {
            name: "Default".to_string(),
            title_font: "sans-serif".to_string(),
            body_font: "sans-serif".to_string(),
            accent_color: "#3b82f6".to_string(),
            backgrounds: Vec::new(),
        });
        let classifier = Classifier::for_mode(study_deck, config.classifier.clone());
        Self::new(Catalog::for_mode(study_deck), classifier, theme, config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Repairs, parses and compiles a whole deck payload.
    pub fn compile_payload(&self, raw: &str, assets: &AssetCache) -> CompiledDeck {
        let deck = parse_deck(raw);
        self.compile_deck(&deck, assets)
    }

    /// Compiles a parsed deck. Never fails; every recovery is logged.
    pub fn compile_deck(&self, deck: &DeckSpec, assets: &AssetCache) -> CompiledDeck {
        let mut cache = HeightCache::new();
        let slides: Vec<CompiledSlide> = self
            .normalize_deck(deck)
            .iter()
            .enumerate()
            .map(|(index, content)| self.render_slide(content, index, assets, &mut cache))
            .collect();
        info!(
            "Compiled {} slides with theme '{}' ({} cached heights, {} hits)",
            slides.len(),
            self.theme.name,
            cache.len(),
            cache.hits()
        );
        CompiledDeck {
            title: deck.title.clone(),
            theme: self.theme.name.clone(),
            slides,
        }
    }

    /// Compiles one slide payload produced in the detail phase of two-phase
    /// generation. A layout tag inside the payload wins over `requested_layout`.
    pub fn compile_slide(&self, raw: &str, requested_layout: &str, index: usize, assets: &AssetCache) -> CompiledSlide {
        let content = parse_slide(raw, requested_layout, &self.catalog);
        self.render_slide(&content, index, assets, &mut HeightCache::new())
    }

    /// Lists the images a deck needs, in slide order, capped at the configured maximum.
    ///
    /// Slots are planned with the same layout decisions [`DeckCompiler::compile_deck`]
    /// makes, so every request key matches a slot the compile will look up.
    pub fn plan_image_requests(&self, deck: &DeckSpec) -> Vec<ImageRequest> {
        let requests: Vec<ImageRequest> = self
            .normalize_deck(deck)
            .iter()
            .enumerate()
            .flat_map(|(index, content)| {
                content.slots.iter().filter_map(move |(slot, value)| match value {
                    SlotValue::Image(image) if SlotKind::of(slot) == SlotKind::Image => Some(ImageRequest {
                        slide_index: index,
                        slot: slot.clone(),
                        prompt: image.prompt.clone(),
                        key: AssetCache::key(index, slot),
                    }),
                    _ => None,
                })
            })
            .take(self.config.max_image_requests)
            .collect();
        debug!("Planned {} image requests", requests.len());
        requests
    }

    /// Chooses layouts and normalizes every slide of a deck.
    fn normalize_deck(&self, deck: &DeckSpec) -> Vec<ContentSpec> {
        let total = deck.slides.len();
        let mut history: Vec<String> = Vec::with_capacity(total);
        deck.slides
            .iter()
            .enumerate()
            .map(|(index, slide)| {
                let layout = self.choose_layout(slide, index, total, &history);
                let content = normalize(&slide.fields, &layout, &self.catalog);
                history.push(content.layout_id.clone());
                content
            })
            .collect()
    }

    /// Uses the model's layout tag when it names a catalog layout, and the classifier
    /// when it is missing or unknown (or always, in auto-layout mode).
    fn choose_layout(&self, slide: &RawSlide, index: usize, total: usize, history: &[String]) -> String {
        let requested = slide
            .requested_layout
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty());
        if !self.config.auto_layout {
            if let Some(template) = requested.and_then(|l| self.catalog.find(l)) {
                return template.id.clone();
            }
        }
        let layout = self.classifier.classify(&slide.fields, index, total, history);
        debug!(
            "Slide {} layout {:?} replaced by classifier choice '{}'",
            index, requested, layout
        );
        layout
    }

    fn render_slide(
        &self,
        content: &ContentSpec,
        index: usize,
        assets: &AssetCache,
        cache: &mut HeightCache,
    ) -> CompiledSlide {
        let template = self.catalog.resolve(&content.layout_id);
        let background = self.theme.background_for(index);
        let slide_key = format!("slide-{index}");
        let ctx = RenderContext {
            content,
            theme: &self.theme,
            background: &background,
            assets,
            slide_index: index,
            slide_key: &slide_key,
        };

        let mut elements = template.render(&ctx);
        let report = resolve_with(&mut elements, &background, &self.config.geometry, cache);
        debug!(
            "Rendered {} as '{}' with {} elements ({:?})",
            slide_key,
            template.id,
            elements.len(),
            report
        );
        CompiledSlide {
            id: slide_key,
            layout: template.id.clone(),
            background,
            elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::element::ElementKind;

    fn compiler() -> DeckCompiler {
        DeckCompiler::for_topic("Quarterly review", false, CompilerConfig::default()).expect("default compiler")
    }

    #[test]
    fn compiles_a_payload_end_to_end() {
        let payload = r#"```json
        {"title": "Review", "slides": [
            {"layout": "title", "content": {"title": "Q3 Review", "subtitle": "Numbers and plans"}},
            {"layout": "chart_focus", "content": {"title": "Revenue", "chart": "BAR|Q1,Q2|Rev:100,200"}},
            {"content": {"quote": "Focus wins", "author": "Someone"}},
        ]}
        ```"#;
        let deck = compiler().compile_payload(payload, &AssetCache::new());
        assert_eq!(deck.title.as_deref(), Some("Review"));
        let layouts: Vec<&str> = deck.slides.iter().map(|s| s.layout.as_str()).collect();
        assert_eq!(layouts, vec!["title", "chart_focus", "quote"]);

        let chart = deck.slides[1]
            .elements
            .iter()
            .find_map(|e| match &e.kind {
                ElementKind::Chart { data, .. } => Some(data),
                _ => None,
            })
            .expect("chart element");
        assert_eq!(chart.labels, vec!["Q1", "Q2"]);
        assert!(deck.slides[2].elements.iter().all(|e| e.id.starts_with("slide-2-")));
    }

    #[test]
    fn unknown_layouts_are_classified() {
        let deck = DeckSpec {
            title: None,
            slides: vec![
                RawSlide {
                    requested_layout: Some("mystery".into()),
                    fields: serde_json::from_str(r#"{"title": "Opening"}"#).expect("fields"),
                },
                RawSlide {
                    requested_layout: None,
                    fields: serde_json::from_str(r#"{"title": "Plan", "points": ["a", "b"]}"#).expect("fields"),
                },
            ],
        };
        let compiled = compiler().compile_deck(&deck, &AssetCache::new());
        assert_eq!(compiled.slides[0].layout, "title");
        assert_eq!(compiled.slides[1].layout, "content");
    }

    #[test]
    fn auto_layout_ignores_tags() {
        let config = CompilerConfig {
            auto_layout: true,
            ..CompilerConfig::default()
        };
        let compiler = DeckCompiler::for_topic("x", false, config).expect("compiler");
        let deck = parse_deck(r#"[{"layout": "statement", "title": "Hi", "quote": "q", "author": "a"}]"#);
        assert_eq!(compiler.compile_deck(&deck, &AssetCache::new()).slides[0].layout, "quote");
    }

    #[test]
    fn image_requests_follow_layout_slots() {
        let deck = parse_deck(
            r#"[{"layout": "image_grid", "title": "Pair", "image": "a fox", "second_image": "a wolf"},
                {"layout": "two_column_image", "title": "T", "text": "t", "photo": "a bear"},
                {"layout": "image_focus", "image": "an owl"},
                {"layout": "title_image_background", "title": "X", "bg_image": "a lake"}]"#,
        );
        let requests = compiler().plan_image_requests(&deck);
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].key, "slide-0-image");
        assert_eq!(requests[1].slot, "second_image");
        assert_eq!(requests[2].prompt, "a bear");
        assert_eq!(requests[3].key, "slide-2-image");
    }

    #[test]
    fn compile_slide_uses_the_payload_layout() {
        let slide = compiler().compile_slide(
            r#"{"layout": "statistic", "statistic": "42%", "text": "of people"}"#,
            "content",
            3,
            &AssetCache::new(),
        );
        assert_eq!(slide.layout, "statistic");
        assert_eq!(slide.id, "slide-3");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = CompilerConfig::default();
        config.geometry.skyline_columns = 0;
        assert!(DeckCompiler::for_topic("x", false, config).is_err());
    }
}
