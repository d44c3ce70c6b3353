//! Approximate text metrics: per-font character widths, greedy word wrapping and a
//! memoized height estimator.

use std::collections::HashMap;

use super::constants::BOLD_WEIGHT;
use crate::models::element::{CANVAS_HEIGHT_PX, CANVAS_WIDTH_PX};

/// Average glyph width of a font family as a fraction of the font size, plus the
/// widening factor applied to bold text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub char_width_ratio: f64,
    pub bold_multiplier: f64,
}

const fn metrics(char_width_ratio: f64, bold_multiplier: f64) -> FontMetrics {
    FontMetrics {
        char_width_ratio,
        bold_multiplier,
    }
}

const FONT_METRICS: &[(&str, FontMetrics)] = &[
    ("inter", metrics(0.52, 1.07)),
    ("montserrat", metrics(0.58, 1.08)),
    ("playfair", metrics(0.50, 1.06)),
    ("georgia", metrics(0.52, 1.06)),
    ("roboto", metrics(0.50, 1.06)),
    ("lato", metrics(0.50, 1.05)),
];

const DEFAULT_METRICS: FontMetrics = metrics(0.55, 1.08);

/// Looks up metrics for a CSS font-family list. The first known family name found
/// anywhere in the list wins; unknown families use a generic sans-serif estimate.
pub fn metrics_for(family: Option<&str>) -> FontMetrics {
    let Some(family) = family else {
        return DEFAULT_METRICS;
    };
    let lower = family.to_lowercase();
    FONT_METRICS
        .iter()
        .find(|(name, _)| lower.contains(name))
        .map(|(_, m)| *m)
        .unwrap_or(DEFAULT_METRICS)
}

/// Counts the lines `text` occupies when greedily wrapped at `max_chars` characters.
///
/// Every `\n`-separated paragraph takes at least one line. Words longer than a line are
/// hard-split across as many lines as they need.
pub fn count_wrapped_lines(text: &str, max_chars: usize) -> usize {
    let max_chars = max_chars.max(1);
    text.split('\n')
        .map(|paragraph| {
            let mut lines = 0;
            let mut current = 0;
            for word in paragraph.split_whitespace() {
                let mut len = word.chars().count();
                if current > 0 && current + 1 + len <= max_chars {
                    current += 1 + len;
                    continue;
                }
                if current > 0 {
                    lines += 1;
                }
                while len > max_chars {
                    lines += 1;
                    len -= max_chars;
                }
                current = len;
            }
            if current > 0 {
                lines += 1;
            }
            lines.max(1)
        })
        .sum()
}

/// The typographic inputs of one height estimate.
#[derive(Debug, Clone, Copy)]
pub struct TextBox<'a> {
    pub content: &'a str,
    /// Box width, percent of canvas width.
    pub width_pct: f64,
    pub font_px: f64,
    pub line_height: f64,
    pub font_weight: u16,
    pub font_family: Option<&'a str>,
}

impl TextBox<'_> {
    /// Estimated rendered height as a percentage of canvas height.
    pub fn estimate_height(&self) -> f64 {
        let m = metrics_for(self.font_family);
        let weight_factor = if self.font_weight >= BOLD_WEIGHT {
            m.bold_multiplier
        } else {
            1.0
        };
        let char_px = self.font_px * m.char_width_ratio * weight_factor;
        let width_px = self.width_pct / 100.0 * CANVAS_WIDTH_PX;
        let max_chars = if char_px > 0.0 {
            (width_px / char_px).floor().max(1.0) as usize
        } else {
            1
        };
        let lines = count_wrapped_lines(self.content, max_chars);
        let height_px = lines as f64 * self.font_px * self.line_height;
        height_px / CANVAS_HEIGHT_PX * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HeightKey {
    content: String,
    width: u64,
    font_px: u64,
    line_height: u64,
    weight: u16,
    family: String,
}

impl From<&TextBox<'_>> for HeightKey {
    fn from(b: &TextBox<'_>) -> Self {
        HeightKey {
            content: b.content.to_string(),
            width: b.width_pct.to_bits(),
            font_px: b.font_px.to_bits(),
            line_height: b.line_height.to_bits(),
            weight: b.font_weight,
            family: b.font_family.unwrap_or_default().to_string(),
        }
    }
}

/// Memoizes height estimates within one compile call.
///
/// The cache is owned by the caller and never shared, so concurrent compiles each
/// bring their own.
#[derive(Debug, Default)]
pub struct HeightCache {
    entries: HashMap<HeightKey, f64>,
    hits: usize,
}

impl HeightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the estimated height for `text_box`, computing it on first use.
    pub fn height(&mut self, text_box: &TextBox<'_>) -> f64 {
        let key = HeightKey::from(text_box);
        if let Some(height) = self.entries.get(&key) {
            self.hits += 1;
            return *height;
        }
        let height = text_box.estimate_height();
        self.entries.insert(key, height);
        height
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many lookups were answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_greedily() {
        assert_eq!(count_wrapped_lines("", 10), 1);
        assert_eq!(count_wrapped_lines("one two three", 20), 1);
        assert_eq!(count_wrapped_lines("one two three", 7), 2);
        assert_eq!(count_wrapped_lines("one\ntwo\n\nthree", 20), 4);
    }

    #[test]
    fn long_words_are_hard_split() {
        assert_eq!(count_wrapped_lines("abcdefghijkl", 5), 3);
        assert_eq!(count_wrapped_lines("ab abcdefghij", 5), 3);
        assert_eq!(count_wrapped_lines("abcdefghij", 5), 2);
    }

    #[test]
    fn font_lookup_matches_family_lists() {
        assert_eq!(metrics_for(Some("\"Montserrat\", sans-serif")).char_width_ratio, 0.58);
        assert_eq!(metrics_for(Some("Comic Sans")), DEFAULT_METRICS);
        assert_eq!(metrics_for(None), DEFAULT_METRICS);
    }

    #[test]
    fn height_scales_with_lines() {
        let one_line = TextBox {
            content: "Short",
            width_pct: 80.0,
            font_px: 36.0,
            line_height: 1.0,
            font_weight: 400,
            font_family: Some("Inter"),
        };
        assert!((one_line.estimate_height() - 5.0).abs() < 1e-9);

        let bold = TextBox {
            font_weight: 700,
            content: "word word word word word word word word word word word word word word",
            ..one_line
        };
        assert!(bold.estimate_height() > one_line.estimate_height());
    }

    #[test]
    fn cache_memoizes_identical_boxes() {
        let mut cache = HeightCache::new();
        let text_box = TextBox {
            content: "Repeated title",
            width_pct: 84.0,
            font_px: 44.0,
            line_height: 1.2,
            font_weight: 800,
            font_family: Some("Montserrat"),
        };
        let first = cache.height(&text_box);
        let second = cache.height(&text_box);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }
}
