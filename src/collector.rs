//! Deduplicating style collection.
//!
//! The collector receives every resolved style in traversal order and keeps
//! one [`StyleRecord`] per style identity. The first node seen using a style
//! provides the record's font-derived fields. Local styles and styles whose
//! names match an exclusion prefix are rejected.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::classify::NameClassifier;
use crate::record::{StyleRecord, TextProperties, TextStyle};
use crate::walker::StyleSink;

/// Why a style was not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rejection {
    /// Defined in the document rather than a shared library
    Local,
    /// Name starts with a disallowed prefix
    Excluded,
}

/// A later node disagreeing with the first node on a record field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Divergence {
    /// Style whose record was checked
    pub style_id: String,
    /// Later text node carrying the differing value
    pub node_id: String,
    /// Record field name, e.g. `fontFamily`
    pub field: &'static str,
    /// Value kept in the record
    pub first: String,
    /// Value found on `node_id`
    pub other: String,
}

#[derive(Debug, Clone)]
struct Entry {
    record: StyleRecord,
    usage: usize,
}

/// Everything the collector learned during one walk.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    /// Retained records in first-discovery order
    pub records: Vec<StyleRecord>,
    /// Number of text nodes using each retained style
    pub usage: IndexMap<String, usize>,
    /// Rejected style identities
    pub rejected: HashMap<String, Rejection>,
    /// Field disagreements, when consistency checking is on
    pub divergences: Vec<Divergence>,
}

/// Builds the identity → record map during traversal.
#[derive(Debug, Clone)]
pub struct StyleCollector {
    classifier: NameClassifier,
    check_consistency: bool,
    entries: IndexMap<String, Entry>,
    rejected: HashMap<String, Rejection>,
    divergences: Vec<Divergence>,
}

impl StyleCollector {
    /// Create a collector applying the classifier's exclusion rules.
    pub fn new(classifier: NameClassifier) -> Self {
        Self {
            classifier,
            check_consistency: false,
            entries: IndexMap::new(),
            rejected: HashMap::new(),
            divergences: Vec::new(),
        }
    }

    /// Record divergences between nodes sharing a style.
    pub fn with_consistency_check(mut self, enable: bool) -> Self {
        self.check_consistency = enable;
        self
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offer one text node's resolved style.
    pub fn insert(&mut self, node_id: &str, style: &TextStyle, props: Option<&TextProperties>) {
        if let Some(entry) = self.entries.get_mut(&style.id) {
            entry.usage += 1;
            if self.check_consistency {
                let candidate = StyleRecord::from_style(style, props);
                for divergence in diverging_fields(&entry.record, &candidate, node_id) {
                    log::warn!(
                        "Style {} ({}) differs on node {}: {} is '{}' here, '{}' first",
                        style.id,
                        style.name,
                        node_id,
                        divergence.field,
                        divergence.other,
                        divergence.first
                    );
                    self.divergences.push(divergence);
                }
            }
            return;
        }

        if !style.remote {
            self.reject(style, Rejection::Local);
            return;
        }
        if self.classifier.is_excluded(&style.name) {
            self.reject(style, Rejection::Excluded);
            return;
        }

        log::debug!("Collected style {} ({}) from node {}", style.id, style.name, node_id);
        self.entries.insert(
            style.id.clone(),
            Entry {
                record: StyleRecord::from_style(style, props),
                usage: 1,
            },
        );
    }

    fn reject(&mut self, style: &TextStyle, reason: Rejection) {
        if self.rejected.insert(style.id.clone(), reason).is_none() {
            log::debug!("Rejected style {} ({}): {:?}", style.id, style.name, reason);
        }
    }

    /// Records in first-discovery order.
    pub fn records(&self) -> impl Iterator<Item = &StyleRecord> {
        self.entries.values().map(|e| &e.record)
    }

    /// Consume the collector.
    pub fn finish(self) -> Collected {
        let mut records = Vec::with_capacity(self.entries.len());
        let mut usage = IndexMap::with_capacity(self.entries.len());
        for (id, entry) in self.entries {
            usage.insert(id, entry.usage);
            records.push(entry.record);
        }
        Collected {
            records,
            usage,
            rejected: self.rejected,
            divergences: self.divergences,
        }
    }
}

impl StyleSink for StyleCollector {
    fn accept(&mut self, node_id: &str, style: TextStyle, props: Option<&TextProperties>) {
        self.insert(node_id, &style, props);
    }
}

fn diverging_fields(first: &StyleRecord, other: &StyleRecord, node_id: &str) -> Vec<Divergence> {
    let pairs = [
        ("fontFamily", first.font_family.clone(), other.font_family.clone()),
        (
            "fontWeightLabel",
            first.font_weight_label.clone(),
            other.font_weight_label.clone(),
        ),
        (
            "fontSize",
            first.font_size_value().to_string(),
            other.font_size_value().to_string(),
        ),
    ];
    pairs
        .into_iter()
        .filter(|(_, a, b)| a != b)
        .map(|(field, a, b)| Divergence {
            style_id: first.id.clone(),
            node_id: node_id.to_string(),
            field,
            first: a,
            other: b,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassifierRules;
    use crate::record::{FontName, FontSize};

    fn props(family: &str, weight: &str, size: f64) -> TextProperties {
        TextProperties {
            font_name: Some(FontName::new(family, weight)),
            font_size: Some(FontSize::Points(size)),
            ..Default::default()
        }
    }

    fn baseline() -> StyleCollector {
        StyleCollector::new(NameClassifier::new(ClassifierRules::baseline()))
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut c = baseline();
        let style = TextStyle::new("S:1", "Title/LG", true);
        c.insert("n1", &style, Some(&props("Inter", "Bold", 32.0)));
        c.insert("n2", &style, Some(&props("Roboto", "Regular", 12.0)));

        let collected = c.finish();
        assert_eq!(collected.records.len(), 1);
        assert_eq!(collected.records[0].font_family, "Inter");
        assert_eq!(collected.records[0].font_size_value(), 32.0);
        assert_eq!(collected.usage["S:1"], 2);
        assert!(collected.divergences.is_empty());
    }

    #[test]
    fn test_local_styles_rejected() {
        let mut c = baseline();
        c.insert("n1", &TextStyle::new("S:local", "Title/LG", false), None);
        c.insert("n2", &TextStyle::new("S:local", "Title/LG", false), None);
        assert!(c.is_empty());

        let collected = c.finish();
        assert_eq!(collected.rejected.get("S:local"), Some(&Rejection::Local));
    }

    #[test]
    fn test_excluded_prefix_rejected_even_if_remote() {
        let mut c = StyleCollector::new(NameClassifier::new(ClassifierRules::strict()));
        c.insert("n1", &TextStyle::new("S:d", "Display/Large", true), None);
        c.insert("n2", &TextStyle::new("S:s", "Subheading/MD", true), None);
        c.insert("n3", &TextStyle::new("S:t", "Title/MD", true), None);

        let ids: Vec<&str> = c.records().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["S:t"]);
        let collected = c.finish();
        assert_eq!(collected.rejected.get("S:d"), Some(&Rejection::Excluded));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut c = baseline();
        for (id, name) in [("S:3", "Paragraph"), ("S:1", "Display"), ("S:2", "Title")] {
            c.insert("n", &TextStyle::new(id, name, true), None);
        }
        let ids: Vec<String> = c.finish().records.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["S:3", "S:1", "S:2"]);
    }

    #[test]
    fn test_consistency_check_reports_divergence() {
        let mut c = baseline().with_consistency_check(true);
        let style = TextStyle::new("S:1", "Text/MD", true);
        c.insert("n1", &style, Some(&props("Inter", "Regular", 16.0)));
        c.insert("n2", &style, Some(&props("Inter", "Regular", 16.0)));
        c.insert("n3", &style, Some(&props("Inter", "Medium", 18.0)));

        let collected = c.finish();
        let fields: Vec<&str> = collected.divergences.iter().map(|d| d.field).collect();
        assert_eq!(fields, vec!["fontWeightLabel", "fontSize"]);
        assert!(collected.divergences.iter().all(|d| d.node_id == "n3"));
        assert_eq!(collected.records[0].font_weight_label, "Regular");
    }
}
