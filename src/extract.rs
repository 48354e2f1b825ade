//! One extraction request: walk, collect, rank.
//!
//! ```text
//! Document
//!     ↓
//! [TreeWalker] (pages → resolved text styles, progress per page)
//!     ↓
//! [StyleCollector] (dedup by identity, remote-only, exclusions)
//!     ↓
//! [RankingEngine] (category, size, weight, font size)
//!     ↓
//! ExtractionReport
//! ```
//!
//! All state is request-scoped and dropped when the report is returned.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::classify::NameClassifier;
use crate::collector::{Divergence, Rejection, StyleCollector};
use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::host::Document;
use crate::ranking::RankingEngine;
use crate::record::StyleRecord;
use crate::walker::{
    FixedDelay, Immediate, NoProgress, ProgressObserver, Scheduler, TreeWalker, WalkStats,
};

/// Result of one extraction request.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Ranked style records
    pub styles: Vec<StyleRecord>,
    /// Text nodes using each retained style, keyed by identity
    pub usage: IndexMap<String, usize>,
    /// Style identities that were seen but not retained
    pub rejected: HashMap<String, Rejection>,
    /// Field disagreements, when consistency checking is on
    pub divergences: Vec<Divergence>,
    /// Traversal counters
    pub stats: WalkStats,
}

/// Runs extraction requests against a document.
pub struct StyleExtractor {
    config: ExtractionConfig,
}

impl StyleExtractor {
    /// Create an extractor.
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract and rank the document's library text styles.
    pub fn extract<D: Document>(
        &self,
        document: &D,
        observer: &mut dyn ProgressObserver,
    ) -> Result<ExtractionReport> {
        let classifier = NameClassifier::new(self.config.rules.clone());
        let mut collector = StyleCollector::new(classifier.clone())
            .with_consistency_check(self.config.check_consistency);

        let mut scheduler: Box<dyn Scheduler> = match self.config.yield_delay {
            Some(delay) => Box::new(FixedDelay(delay)),
            None => Box::new(Immediate),
        };

        let stats = TreeWalker::new(document).walk(&mut collector, observer, scheduler.as_mut())?;
        let collected = collector.finish();
        let styles = RankingEngine::new(classifier).rank(collected.records);

        log::info!(
            "Extracted {} text styles from {} pages ({} nodes, {} rejected, {} invalid references)",
            styles.len(),
            stats.pages,
            stats.nodes_visited,
            collected.rejected.len(),
            stats.invalid_references
        );

        Ok(ExtractionReport {
            styles,
            usage: collected.usage,
            rejected: collected.rejected,
            divergences: collected.divergences,
            stats,
        })
    }
}

/// Extract with the given configuration and no progress reporting.
pub fn extract_styles<D: Document>(
    document: &D,
    config: &ExtractionConfig,
) -> Result<Vec<StyleRecord>> {
    let report = StyleExtractor::new(config.clone()).extract(document, &mut NoProgress)?;
    Ok(report.styles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassifierRules;
    use crate::host::{DocumentSnapshot, SnapshotNode};
    use crate::record::{FontName, FontSize, TextProperties, TextStyle};

    fn sized(size: f64) -> TextProperties {
        TextProperties {
            font_name: Some(FontName::new("Inter", "Regular")),
            font_size: Some(FontSize::Points(size)),
            ..Default::default()
        }
    }

    fn document() -> DocumentSnapshot {
        DocumentSnapshot::from_pages(
            vec![
                SnapshotNode::page(
                    "1:0",
                    "Typography",
                    vec![
                        SnapshotNode::text("t1", "S:para", sized(16.0)),
                        SnapshotNode::text("t2", "S:display", sized(64.0)),
                        SnapshotNode::text("t3", "S:local", sized(12.0)),
                    ],
                ),
                SnapshotNode::page(
                    "2:0",
                    "Screens",
                    vec![
                        SnapshotNode::text("t4", "S:title", sized(32.0)),
                        SnapshotNode::text("t5", "S:para", sized(14.0)),
                    ],
                ),
            ],
            vec![
                TextStyle::new("S:para", "Paragraph/MD", true),
                TextStyle::new("S:display", "Display Large", true),
                TextStyle::new("S:title", "Title/LG/Bold", true),
                TextStyle::new("S:local", "Title/XL", false),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_baseline_extraction() {
        let doc = document();
        let styles = extract_styles(&doc, &ExtractionConfig::default()).unwrap();
        let names: Vec<&str> = styles.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Display Large", "Title/LG/Bold", "Paragraph/MD"]);
        assert_eq!(styles[2].font_size_value(), 16.0);
    }

    #[test]
    fn test_strict_extraction_drops_display() {
        let doc = document();
        let styles = extract_styles(&doc, &ExtractionConfig::strict()).unwrap();
        let names: Vec<&str> = styles.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Title/LG/Bold", "Paragraph/MD"]);
    }

    #[test]
    fn test_report_counts() {
        let doc = document();
        let report = StyleExtractor::new(ExtractionConfig::default())
            .extract(&doc, &mut NoProgress)
            .unwrap();
        assert_eq!(report.usage["S:para"], 2);
        assert_eq!(report.rejected.get("S:local"), Some(&Rejection::Local));
        assert_eq!(report.stats.pages, 2);
        assert_eq!(report.stats.text_nodes, 5);
    }

    #[test]
    fn test_custom_rules_drive_extraction() {
        let rules = ClassifierRules::baseline().with_excluded_prefix("display");
        let extractor = StyleExtractor::new(ExtractionConfig::default().with_rules(rules));
        assert_eq!(extractor.config().rules.excluded_prefixes, vec!["display".to_string()]);

        let report = extractor.extract(&document(), &mut NoProgress).unwrap();
        let names: Vec<&str> = report.styles.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Title/LG/Bold", "Paragraph/MD"]);
        assert_eq!(report.rejected.get("S:display"), Some(&Rejection::Excluded));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let doc = document();
        let config = ExtractionConfig::default();
        let first = extract_styles(&doc, &config).unwrap();
        let second = extract_styles(&doc, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_yield_delay_does_not_change_result() {
        let doc = document();
        let plain = extract_styles(&doc, &ExtractionConfig::default()).unwrap();
        let paused = extract_styles(
            &doc,
            &ExtractionConfig::default().with_yield_delay(std::time::Duration::from_millis(1)),
        )
        .unwrap();
        assert_eq!(plain, paused);
    }
}
