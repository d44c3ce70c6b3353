//! Layout classification: picks a layout id for a slide from its raw content.
//!
//! Signals detected in the content add weighted votes to candidate layouts through a
//! [`ScoringTable`]. Scores are then damped for layouts the previous slides already used,
//! and the best positive candidate wins.

pub mod signals;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::errors::Result;
use crate::models::deck::RawFields;
pub use signals::Signal;

/// One row of the scoring table: when `signal` is present, `layout` gains `weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRule {
    pub signal: Signal,
    pub layout: String,
    pub weight: f64,
}

impl ScoringRule {
    pub fn new(signal: Signal, layout: &str, weight: f64) -> Self {
        ScoringRule {
            signal,
            layout: layout.to_string(),
            weight,
        }
    }
}

/// The signal weights plus the layout ids the selection rules refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringTable {
    pub rules: Vec<ScoringRule>,
    /// Bulleted layout used when nothing scores and the slide has body copy. Also the
    /// layout whose streaks are penalized.
    pub generic_layout: String,
    /// Layout used when nothing scores and there is no body copy.
    pub minimal_layout: String,
    /// Opening layouts that are only allowed on the first slide.
    pub title_layouts: Vec<String>,
    /// Replacement for a title layout chosen anywhere but the first slide.
    pub section_layout: String,
}

impl ScoringTable {
    /// Weights for the standard catalog.
    pub fn standard() -> Self {
        use Signal::*;
        ScoringTable {
            rules: vec![
                ScoringRule::new(QuoteWithAuthor, "quote", 200.0),
                ScoringRule::new(Comparison, "content_comparison", 200.0),
                ScoringRule::new(StatisticWithText, "statistic", 180.0),
                ScoringRule::new(TwoImages, "image_grid", 160.0),
                ScoringRule::new(MultiColumn, "content_multi_column", 150.0),
                ScoringRule::new(SideBySideText, "two_column_text", 150.0),
                ScoringRule::new(Table, "content_with_table", 150.0),
                ScoringRule::new(Chart, "chart_focus", 150.0),
                ScoringRule::new(Closing, "conclusion", 120.0),
                ScoringRule::new(FirstSlideWithImage, "title_image_background", 80.0),
                ScoringRule::new(FirstSlide, "title", 60.0),
                ScoringRule::new(Sequence, "timeline", 40.0),
                ScoringRule::new(LongTextWithImage, "two_column_image", 35.0),
                ScoringRule::new(LongText, "two_column_text", 30.0),
                ScoringRule::new(ShortTextWithImage, "content_left_image", 30.0),
                ScoringRule::new(BulletList, "content", 20.0),
            ],
            generic_layout: "content".to_string(),
            minimal_layout: "statement".to_string(),
            title_layouts: vec!["title".to_string(), "title_image_background".to_string()],
            section_layout: "section_header".to_string(),
        }
    }

    /// Weights for the study catalog.
    pub fn study() -> Self {
        use Signal::*;
        ScoringTable {
            rules: vec![
                ScoringRule::new(QuestionAnswer, "study_qa", 150.0),
                ScoringRule::new(Sources, "study_sources", 150.0),
                ScoringRule::new(Closing, "study_summary", 120.0),
                ScoringRule::new(FirstSlide, "study_title", 60.0),
                ScoringRule::new(FirstSlideWithImage, "study_title", 60.0),
                ScoringRule::new(LongText, "study_concept", 30.0),
                ScoringRule::new(BulletList, "study_breakdown", 20.0),
                ScoringRule::new(Text, "study_concept", 15.0),
            ],
            generic_layout: "study_breakdown".to_string(),
            minimal_layout: "study_concept".to_string(),
            title_layouts: vec!["study_title".to_string()],
            section_layout: "study_concept".to_string(),
        }
    }

    /// Loads a table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Scores candidate layouts for slides and picks one.
///
/// Classification never fails: with no usable signal it falls back to the table's
/// generic or minimal layout.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: ScoringTable,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(table: ScoringTable, config: ClassifierConfig) -> Self {
        Classifier { table, config }
    }

    /// The classifier for a deck mode.
    pub fn for_mode(study_deck: bool, config: ClassifierConfig) -> Self {
        let table = if study_deck {
            ScoringTable::study()
        } else {
            ScoringTable::standard()
        };
        Self::new(table, config)
    }

    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Scores every candidate layout after variety penalties.
    ///
    /// Candidates appear in the order their first rule fired.
    ///
    /// # Arguments
    ///
    /// * `raw` - The slide's content fields.
    /// * `index` - Zero-based slide position.
    /// * `total` - Number of slides in the deck.
    /// * `history` - Layout ids chosen for the preceding slides, oldest first.
    pub fn scores(&self, raw: &RawFields, index: usize, total: usize, history: &[String]) -> IndexMap<String, f64> {
        let detected = signals::detect(raw, index, total, &self.config);
        let mut scores: IndexMap<String, f64> = IndexMap::new();
        for rule in self.table.rules.iter().filter(|r| detected.contains(&r.signal)) {
            *scores.entry(rule.layout.clone()).or_insert(0.0) += rule.weight;
        }

        let previous = history.last();
        let before_previous = history.len().checked_sub(2).and_then(|i| history.get(i));
        let streak = self.config.generic_streak;
        let generic_streak = streak > 0
            && history.len() >= streak
            && history[history.len() - streak..]
                .iter()
                .all(|id| *id == self.table.generic_layout);

        for (layout, score) in scores.iter_mut() {
            if previous == Some(layout) {
                *score *= self.config.previous_penalty;
            }
            if before_previous == Some(layout) {
                *score *= self.config.before_previous_penalty;
            }
            if generic_streak && *layout == self.table.generic_layout {
                *score *= self.config.generic_streak_penalty;
            }
        }
        scores
    }

    /// Picks the layout id for a slide.
    ///
    /// The highest positive score wins, earlier candidates winning ties. Without a
    /// positive score the generic layout is used when the slide has body copy and the
    /// minimal layout otherwise. Title layouts are reserved for the first slide.
    pub fn classify(&self, raw: &RawFields, index: usize, total: usize, history: &[String]) -> String {
        let scores = self.scores(raw, index, total, history);
        let mut best: Option<(&String, f64)> = None;
        for (layout, &score) in &scores {
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((layout, score));
            }
        }

        let mut chosen = match best {
            Some((layout, _)) => layout.clone(),
            None if signals::has_body(raw) => self.table.generic_layout.clone(),
            None => self.table.minimal_layout.clone(),
        };
        if index > 0 && self.table.title_layouts.contains(&chosen) {
            debug!("Slide {} cannot use '{}', using '{}'", index, chosen, self.table.section_layout);
            chosen = self.table.section_layout.clone();
        }
        debug!("Classified slide {} as '{}' from {:?}", index, chosen, scores);
        chosen
    }
}
