use log::debug;
use serde::{Deserialize, Serialize};

/// One slide background and the text colors designed to sit on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    /// A hex color or a CSS gradient.
    pub color: String,
    pub primary_text_color: String,
    pub secondary_text_color: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chart_colors: Option<Vec<String>>,
    /// Name of a decorative pattern overlay, resolved by the renderer.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pattern: Option<String>,
}

impl Default for Background {
    fn default() -> Self {
        Background {
            color: "#ffffff".to_string(),
            primary_text_color: "#000000".to_string(),
            secondary_text_color: "#333333".to_string(),
            accent_color: None,
            chart_colors: None,
            pattern: None,
        }
    }
}

/// A deck-wide visual theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub title_font: String,
    pub body_font: String,
    pub accent_color: String,
    pub backgrounds: Vec<Background>,
}

impl Theme {
    /// The background for a slide, chosen round-robin by slide index.
    /// A theme without backgrounds yields the plain white default.
    pub fn background_for(&self, slide_index: usize) -> Background {
        if self.backgrounds.is_empty() {
            return Background::default();
        }
        self.backgrounds[slide_index % self.backgrounds.len()].clone()
    }

    /// Accent color of a background, falling back to the theme accent.
    pub fn accent_on<'a>(&'a self, background: &'a Background) -> &'a str {
        background
            .accent_color
            .as_deref()
            .unwrap_or(&self.accent_color)
    }

    /// Theme packs for standard decks.
    pub fn standard_packs() -> Vec<Theme> {
        vec![
            Theme {
                name: "Executive Blue".to_string(),
                title_font: "\"Montserrat\", sans-serif".to_string(),
                body_font: "\"Inter\", sans-serif".to_string(),
                accent_color: "#3b82f6".to_string(),
                backgrounds: vec![
                    Background {
                        color: "linear-gradient(135deg, #1e3a8a, #1e40af)".to_string(),
                        primary_text_color: "#ffffff".to_string(),
                        secondary_text_color: "#bfdbfe".to_string(),
                        accent_color: Some("#60a5fa".to_string()),
                        chart_colors: Some(palette(&[
                            "#60a5fa", "#93c5fd", "#bfdbfe", "#dbeafe", "#eff6ff",
                        ])),
                        pattern: Some("dots".to_string()),
                    },
                    Background {
                        color: "#ffffff".to_string(),
                        primary_text_color: "#1e293b".to_string(),
                        secondary_text_color: "#64748b".to_string(),
                        accent_color: Some("#3b82f6".to_string()),
                        chart_colors: Some(palette(&[
                            "#1d4ed8", "#2563eb", "#3b82f6", "#60a5fa", "#93c5fd",
                        ])),
                        pattern: Some("geometric".to_string()),
                    },
                ],
            },
            Theme {
                name: "Neo Mint".to_string(),
                title_font: "\"Montserrat\", sans-serif".to_string(),
                body_font: "\"Inter\", sans-serif".to_string(),
                accent_color: "#10b981".to_string(),
                backgrounds: vec![
                    Background {
                        color: "#064e3b".to_string(),
                        primary_text_color: "#ecfdf5".to_string(),
                        secondary_text_color: "#a7f3d0".to_string(),
                        accent_color: Some("#34d399".to_string()),
                        chart_colors: Some(palette(&[
                            "#34d399", "#6ee7b7", "#a7f3d0", "#d1fae5", "#ecfdf5",
                        ])),
                        pattern: Some("lines".to_string()),
                    },
                    Background {
                        color: "#f8fafc".to_string(),
                        primary_text_color: "#064e3b".to_string(),
                        secondary_text_color: "#374151".to_string(),
                        accent_color: Some("#10b981".to_string()),
                        chart_colors: Some(palette(&[
                            "#059669", "#10b981", "#34d399", "#6ee7b7", "#a7f3d0",
                        ])),
                        pattern: None,
                    },
                ],
            },
        ]
    }

    /// Theme packs for study decks.
    pub fn study_packs() -> Vec<Theme> {
        vec![Theme {
            name: "Academic Paper".to_string(),
            title_font: "\"Playfair Display\", serif".to_string(),
            body_font: "\"Inter\", sans-serif".to_string(),
            accent_color: "#4f46e5".to_string(),
            backgrounds: vec![Background {
                color: "#fffcf2".to_string(),
                primary_text_color: "#252422".to_string(),
                secondary_text_color: "#403d39".to_string(),
                accent_color: Some("#eb5e28".to_string()),
                chart_colors: Some(palette(&[
                    "#eb5e28", "#ccc5b9", "#403d39", "#252422", "#fffcf2",
                ])),
                pattern: Some("geometric".to_string()),
            }],
        }]
    }
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

const NATURE_KEYWORDS: &[&str] = &[
    "nature", "environment", "green", "plant", "eco", "forest", "growth", "health", "organic",
];
const ACADEMIC_KEYWORDS: &[&str] = &[
    "history", "art", "culture", "classic", "paper", "book", "study", "literature",
];

/// Picks a theme pack whose mood fits the deck topic.
///
/// Uses simple keyword matching over the lowercased topic; when nothing matches (or the
/// matching pack is not in `packs`) the first pack is returned. Returns `None` only
/// for an empty pack list.
pub fn select_theme<'a>(topic: &str, packs: &'a [Theme]) -> Option<&'a Theme> {
    let first = packs.first()?;
    let lower = topic.to_lowercase();
    let wanted = if NATURE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Some("Neo Mint")
    } else if ACADEMIC_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Some("Academic Paper")
    } else {
        None
    };

    let chosen = wanted
        .and_then(|name| packs.iter().find(|t| t.name == name))
        .unwrap_or(first);
    debug!("Selected theme '{}' for topic '{}'", chosen.name, topic);
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backgrounds_rotate_by_index() {
        let packs = Theme::standard_packs();
        let theme = &packs[0];
        assert_eq!(theme.background_for(0), theme.backgrounds[0]);
        assert_eq!(theme.background_for(1), theme.backgrounds[1]);
        assert_eq!(theme.background_for(2), theme.backgrounds[0]);
    }

    #[test]
    fn theme_selection_uses_topic_keywords() {
        let mut packs = Theme::standard_packs();
        packs.extend(Theme::study_packs());
        assert_eq!(
            select_theme("Forest ecology basics", &packs).map(|t| t.name.as_str()),
            Some("Neo Mint")
        );
        assert_eq!(
            select_theme("A history of printing", &packs).map(|t| t.name.as_str()),
            Some("Academic Paper")
        );
        assert_eq!(
            select_theme("Quarterly revenue", &packs).map(|t| t.name.as_str()),
            Some("Executive Blue")
        );
        assert!(select_theme("anything", &[]).is_none());
    }
}
