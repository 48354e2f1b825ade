//! Deterministic ordering of collected style records.
//!
//! Records are sorted by a composite key evaluated in strict precedence:
//! 1. Category rank, ascending
//! 2. Size rank, ascending
//! 3. Weight rank, ascending
//! 4. Numeric font size, descending (first run for mixed sizes)
//!
//! The sort is stable, so records equal on all four keys keep their
//! first-discovery order. Only `name` and `font_size` influence the result.

use std::cmp::Ordering;

use crate::classify::{Classification, NameClassifier};
use crate::record::StyleRecord;

/// Precomputed sort key of one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankKey {
    /// Semantic category rank, compared first
    pub category: u8,
    /// Size tier rank
    pub size: u8,
    /// Font weight rank
    pub weight: u8,
    /// Numeric size, larger sorts first
    pub font_size: f64,
}

impl RankKey {
    /// Build a key from a classification and a numeric font size.
    pub fn new(classification: Classification, font_size: f64) -> Self {
        Self {
            category: classification.category,
            size: classification.size,
            weight: classification.weight,
            font_size,
        }
    }

    /// Composite comparison; larger font sizes sort first.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then(self.size.cmp(&other.size))
            .then(self.weight.cmp(&other.weight))
            .then_with(|| other.font_size.total_cmp(&self.font_size))
    }
}

/// Sorts records using a [`NameClassifier`].
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    classifier: NameClassifier,
}

impl RankingEngine {
    /// Create an engine for the classifier's ruleset.
    pub fn new(classifier: NameClassifier) -> Self {
        Self { classifier }
    }

    /// Sort key for one record.
    pub fn key(&self, record: &StyleRecord) -> RankKey {
        RankKey::new(self.classifier.classify(&record.name), record.font_size_value())
    }

    /// Return `records` in rank order.
    pub fn rank(&self, records: Vec<StyleRecord>) -> Vec<StyleRecord> {
        let mut keyed: Vec<(RankKey, StyleRecord)> = records
            .into_iter()
            .map(|record| (self.key(&record), record))
            .collect();

        // sort_by is stable: ties keep discovery order
        keyed.sort_by(|(a, _), (b, _)| a.compare(b));

        keyed.into_iter().map(|(_, record)| record).collect()
    }
}
