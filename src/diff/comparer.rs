use crate::diff::formatting::{generate_git_diff, generate_readable_summary};
use crate::diff::structured::{Change, ChangeCollector};
use crate::models::deck::CompiledDeck;
use log::debug;
use serde_json::Value as JsonValue;
use treediff::diff;

use super::error::DiffError;

/// Builder for creating a `Comparer`.
/// Sets the initial "base" deck for comparison.
#[derive(Default)]
pub struct ComparerBuilder {
    base: Option<CompiledDeck>,
    is_simplify: bool,
}

impl ComparerBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the base deck to compare against.
    pub fn set_base(mut self, base: CompiledDeck) -> Self {
        self.base = Some(base);
        self
    }

    /// Hides locations and reflow noise from readable summaries.
    pub fn set_simplify(mut self, is_simplify: bool) -> Self {
        self.is_simplify = is_simplify;
        self
    }

    /// Builds the `Comparer`.
    /// Returns an error if the base deck was not set.
    pub fn build(self) -> Result<Comparer, DiffError> {
        let base = self.base.ok_or(DiffError::MissingBase)?;
        Ok(Comparer {
            base,
            is_simplify: self.is_simplify,
        })
    }
}

/// Compares compiled decks against a stored base.
pub struct Comparer {
    base: CompiledDeck,
    is_simplify: bool,
}

impl Comparer {
    /// Compares the stored base deck against a new deck.
    ///
    /// Returns a `ComparisonResult` containing the structured diff.
    pub fn compare(&self, other: &CompiledDeck) -> Result<ComparisonResult, DiffError> {
        let base_val: JsonValue = serde_json::to_value(&self.base)?;
        let other_val: JsonValue = serde_json::to_value(other)?;

        let mut collector = ChangeCollector::new();
        diff(&base_val, &other_val, &mut collector);
        debug!("Found {} changes between decks", collector.changes.len());

        Ok(ComparisonResult {
            base: self.base.clone(),
            compared: other.clone(),
            changes: collector.changes,
            is_simplify: self.is_simplify,
        })
    }
}

/// Holds the results of a comparison between two decks.
pub struct ComparisonResult {
    base: CompiledDeck,
    compared: CompiledDeck,
    changes: Vec<Change>,
    is_simplify: bool,
}

impl ComparisonResult {
    /// Returns the structured list of changes found.
    pub fn get_structured_diff(&self) -> &[Change] {
        &self.changes
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Generates and returns a Git-style text diff.
    pub fn get_git_diff(&self) -> Result<String, DiffError> {
        generate_git_diff(&self.base, &self.compared, &self.changes)
    }

    /// Generates and returns a human-readable summary of the differences.
    pub fn get_readable_diff(&self) -> Result<String, DiffError> {
        generate_readable_summary(&self.base, &self.compared, &self.changes, self.is_simplify)
    }
}
