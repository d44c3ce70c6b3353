use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, sync::Arc};

use crate::models::{
    content::ContentSpec,
    element::ElementRecord,
    theme::{Background, Theme},
};

/// Pre-fetched image URLs keyed by `(slide index, slot name)`.
///
/// The cache is filled by an external image fetcher before compilation; the compiler
/// only reads it. Keys follow the `slide-{index}-{slot}` convention so the JSON form
/// can be produced by non-Rust callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCache {
    entries: HashMap<String, String>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache key for an image slot of a slide.
    pub fn key(slide_index: usize, slot: &str) -> String {
        format!("slide-{slide_index}-{slot}")
    }

    pub fn insert(&mut self, slide_index: usize, slot: &str, url: impl Into<String>) {
        self.entries.insert(Self::key(slide_index, slot), url.into());
    }

    pub fn get(&self, slide_index: usize, slot: &str) -> Option<&str> {
        self.entries
            .get(&Self::key(slide_index, slot))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a template needs to render one slide.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub content: &'a ContentSpec,
    pub theme: &'a Theme,
    pub background: &'a Background,
    pub assets: &'a AssetCache,
    pub slide_index: usize,
    /// Stable per-slide key; generated element ids are prefixed with it.
    pub slide_key: &'a str,
}

impl RenderContext<'_> {
    /// A slide-namespaced element id.
    pub fn element_id(&self, suffix: &str) -> String {
        format!("{}-{}", self.slide_key, suffix)
    }

    /// The pre-fetched image URL for a slot of this slide, if any.
    pub fn asset(&self, slot: &str) -> Option<&str> {
        self.assets.get(self.slide_index, slot)
    }

    /// Accent color for this slide's background.
    pub fn accent(&self) -> &str {
        self.theme.accent_on(self.background)
    }
}

/// A pure rendering function from slot content to element records.
///
/// `None` entries mark optional elements the template chose not to produce (for example
/// a caption when the caption slot is empty); the renderer drops them.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>) -> Vec<Option<ElementRecord>>;
}

impl<F> TemplateRenderer for F
where
    F: Fn(&RenderContext<'_>) -> Vec<Option<ElementRecord>> + Send + Sync,
{
    fn render(&self, ctx: &RenderContext<'_>) -> Vec<Option<ElementRecord>> {
        self(ctx)
    }
}

/// An immutable catalog entry: a layout id, its declared slots and its renderer.
#[derive(Clone)]
pub struct LayoutTemplate {
    pub id: String,
    pub name: String,
    /// Slot names in declaration order. Normalization guarantees exactly these slots.
    pub slots: Vec<String>,
    /// Advisory text shown to the LLM when it picks layouts. Not enforced.
    pub usage_guideline: String,
    renderer: Arc<dyn TemplateRenderer>,
}

impl LayoutTemplate {
    pub fn new(
        id: &str,
        name: &str,
        slots: &[&str],
        usage_guideline: &str,
        renderer: impl TemplateRenderer + 'static,
    ) -> Self {
        LayoutTemplate {
            id: id.to_string(),
            name: name.to_string(),
            slots: slots.iter().map(|s| s.to_string()).collect(),
            usage_guideline: usage_guideline.to_string(),
            renderer: Arc::new(renderer),
        }
    }

    /// Runs the renderer and drops the elements it reported as absent.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Vec<ElementRecord> {
        self.renderer.render(ctx).into_iter().flatten().collect()
    }
}

impl fmt::Debug for LayoutTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutTemplate")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}
