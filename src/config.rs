use log::debug;
use serde::{Deserialize, Serialize};

use crate::converters::geometry::constants::*;
use crate::errors::{CompilerError, Result};

/// Tunable layout-selection constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    /// Multiplier for a candidate equal to the previous slide's layout.
    pub previous_penalty: f64,
    /// Multiplier for a candidate equal to the layout two slides back.
    pub before_previous_penalty: f64,
    /// Multiplier for the generic layout once it has run `generic_streak` slides in a row.
    pub generic_streak_penalty: f64,
    pub generic_streak: usize,
    /// Text longer than this many characters counts as "long".
    pub long_text_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            previous_penalty: 0.1,
            before_previous_penalty: 0.5,
            generic_streak_penalty: 0.05,
            generic_streak: 3,
            long_text_chars: 300,
        }
    }
}

/// Tunable geometry-resolution constants. All lengths are percentages of the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeometryConfig {
    pub skyline_columns: usize,
    /// Vertical gap left between an element and the one it was pushed below.
    pub vertical_padding: f64,
    /// Lowest allowed bottom edge before text is shrunk.
    pub overflow_limit: f64,
    pub min_font_px: f64,
    pub max_font_px: f64,
    /// Height given to text that lacks width or font size information.
    pub default_text_height: f64,
    /// Height assumed for non-text blocks declared with `auto` height.
    pub default_block_height: f64,
    pub default_line_height: f64,
    /// WCAG AA threshold for normal text.
    pub contrast_threshold: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        GeometryConfig {
            skyline_columns: SKYLINE_COLUMNS,
            vertical_padding: VERTICAL_PADDING,
            overflow_limit: OVERFLOW_LIMIT,
            min_font_px: MIN_FONT_PX,
            max_font_px: MAX_FONT_PX,
            default_text_height: DEFAULT_TEXT_HEIGHT,
            default_block_height: DEFAULT_BLOCK_HEIGHT,
            default_line_height: DEFAULT_LINE_HEIGHT,
            contrast_threshold: WCAG_AA_CONTRAST,
        }
    }
}

/// Full compiler configuration. Every field has a default, so a partial JSON document
/// overrides only the values it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// When set, the classifier picks every layout from content signals and ignores the
    /// layout tag the model supplied. Otherwise it only runs for missing or unknown tags.
    pub auto_layout: bool,
    /// Cap on image generation requests planned per deck.
    pub max_image_requests: usize,
    pub classifier: ClassifierConfig,
    pub geometry: GeometryConfig,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            auto_layout: false,
            max_image_requests: 4,
            classifier: ClassifierConfig::default(),
            geometry: GeometryConfig::default(),
        }
    }
}

impl CompilerConfig {
    /// Loads a configuration from JSON, filling unspecified values with defaults.
    ///
    /// # Arguments
    ///
    /// * `json` - A (possibly partial) JSON object, e.g. `{"geometry": {"minFontPx": 14}}`.
    ///
    /// # Returns
    ///
    /// The validated configuration, or an error if the JSON is malformed or the values
    /// are inconsistent.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CompilerConfig = serde_json::from_str(json)?;
        config.validate()?;
        debug!("Loaded compiler config: {:?}", config);
        Ok(config)
    }

    /// Checks the invariants the geometry and classifier stages rely on.
    pub fn validate(&self) -> Result<()> {
        let g = &self.geometry;
        if g.skyline_columns == 0 {
            return Err(CompilerError::InvalidConfig(
                "skylineColumns must be at least 1".to_string(),
            ));
        }
        if !(g.min_font_px > 0.0 && g.min_font_px <= g.max_font_px) {
            return Err(CompilerError::InvalidConfig(format!(
                "font range [{}, {}] is empty",
                g.min_font_px, g.max_font_px
            )));
        }
        if !(g.overflow_limit > 0.0 && g.overflow_limit <= 100.0) {
            return Err(CompilerError::InvalidConfig(format!(
                "overflowLimit {} must be within (0, 100]",
                g.overflow_limit
            )));
        }
        if g.vertical_padding < 0.0 || g.default_line_height <= 0.0 {
            return Err(CompilerError::InvalidConfig(
                "padding and line height must be positive".to_string(),
            ));
        }
        let c = &self.classifier;
        for factor in [
            c.previous_penalty,
            c.before_previous_penalty,
            c.generic_streak_penalty,
        ] {
            if !(0.0..=1.0).contains(&factor) {
                return Err(CompilerError::InvalidConfig(format!(
                    "penalty factor {factor} must be within [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            CompilerConfig::from_json(r#"{"autoLayout": true, "geometry": {"minFontPx": 14}}"#)
                .expect("config should load");
        assert!(config.auto_layout);
        assert_eq!(config.geometry.min_font_px, 14.0);
        assert_eq!(config.geometry.skyline_columns, 50);
        assert_eq!(config.classifier.previous_penalty, 0.1);
        assert_eq!(config.max_image_requests, 4);
    }

    #[test]
    fn inverted_font_range_is_rejected() {
        let err = CompilerConfig::from_json(r#"{"geometry": {"minFontPx": 200}}"#)
            .expect_err("min above max should fail");
        assert!(matches!(err, CompilerError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = CompilerConfig::from_json("{nope").expect_err("bad json should fail");
        assert!(matches!(err, CompilerError::Json(_)));
    }
}
