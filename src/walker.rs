//! Document tree traversal.
//!
//! Implements depth-first pre-order traversal of a host document, one page at a
//! time:
//! 1. Report progress for the page
//! 2. Visit every node of the page subtree exactly once
//! 3. Resolve the style of each text node carrying a string reference
//! 4. Hand resolved styles to a [`StyleSink`]
//!
//! Invalid style references are logged and skipped; they never abort the walk.
//! An optional [`Scheduler`] runs between pages so an observer can repaint.

use std::time::Duration;

use crate::error::Result;
use crate::host::{Document, DocumentNode};
use crate::record::{TextProperties, TextStyle};

/// Progress checkpoint emitted once per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress<'a> {
    /// 1-based index of the page being walked
    pub current: usize,
    /// Total number of pages
    pub total: usize,
    /// Name of the page
    pub unit_name: &'a str,
}

/// Receives progress checkpoints.
pub trait ProgressObserver {
    /// Called once before the first page with the page count.
    fn started(&mut self, _total: usize) {}

    /// Called before descending into each page.
    fn unit(&mut self, progress: &Progress<'_>);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&Progress<'_>),
{
    fn unit(&mut self, progress: &Progress<'_>) {
        self(progress)
    }
}

/// Observer that ignores all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn unit(&mut self, _progress: &Progress<'_>) {}
}

/// Hook run between pages.
pub trait Scheduler {
    /// Give an observer the chance to catch up.
    fn pause(&mut self);
}

/// Scheduler that never pauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Scheduler for Immediate {
    fn pause(&mut self) {}
}

/// Scheduler that sleeps for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Scheduler for FixedDelay {
    fn pause(&mut self) {
        std::thread::sleep(self.0);
    }
}

/// Receives every successfully resolved text style, in traversal order.
pub trait StyleSink {
    /// One text node referencing `style`.
    fn accept(&mut self, node_id: &str, style: TextStyle, props: Option<&TextProperties>);
}

/// Counters collected during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Pages walked
    pub pages: usize,
    /// Nodes visited, pages included
    pub nodes_visited: usize,
    /// Text nodes seen
    pub text_nodes: usize,
    /// Text nodes with a non-empty string style reference
    pub styled_text_nodes: usize,
    /// References the host could not resolve
    pub invalid_references: usize,
}

/// Visit `root` and all its descendants in depth-first pre-order.
///
/// Uses an explicit stack, so tree depth is bounded by memory rather than the
/// call stack.
pub fn visit_preorder<'n, N, F>(root: &'n N, mut visit: F)
where
    N: DocumentNode,
    F: FnMut(&'n N),
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node);
        stack.extend(node.children().iter().rev());
    }
}

/// Walks a host document, page by page.
pub struct TreeWalker<'d, D: Document> {
    document: &'d D,
}

impl<'d, D: Document> TreeWalker<'d, D> {
    /// Create a walker over `document`.
    pub fn new(document: &'d D) -> Self {
        Self { document }
    }

    /// Walk every page, forwarding resolved styles to `sink`.
    ///
    /// Fails only if the host cannot list its pages.
    pub fn walk(
        &self,
        sink: &mut dyn StyleSink,
        observer: &mut dyn ProgressObserver,
        scheduler: &mut dyn Scheduler,
    ) -> Result<WalkStats> {
        let pages = self.document.pages()?;
        let total = pages.len();
        let mut stats = WalkStats::default();

        observer.started(total);

        for (idx, page) in pages.iter().enumerate() {
            if idx > 0 {
                scheduler.pause();
            }
            observer.unit(&Progress {
                current: idx + 1,
                total,
                unit_name: page.name(),
            });
            log::debug!("Walking page {}/{}: {}", idx + 1, total, page.name());

            self.walk_page(page, sink, &mut stats);
            stats.pages += 1;
        }

        Ok(stats)
    }

    fn walk_page(&self, page: &D::Node, sink: &mut dyn StyleSink, stats: &mut WalkStats) {
        visit_preorder(page, |node| {
            stats.nodes_visited += 1;
            if !node.kind().is_text() {
                return;
            }
            stats.text_nodes += 1;

            let Some(style_id) = node.text_style_ref().as_id() else {
                return;
            };
            stats.styled_text_nodes += 1;

            match self.document.style_by_id(style_id) {
                Ok(Some(style)) => sink.accept(node.id(), style, node.text_properties()),
                Ok(None) => {
                    log::debug!("Node {} references unknown style {}", node.id(), style_id);
                },
                Err(e) => {
                    stats.invalid_references += 1;
                    log::warn!("Skipping invalid style {} on node {}: {}", style_id, node.id(), e);
                },
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DocumentSnapshot, NodeKind, SnapshotNode};
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, String)>,
    }

    impl StyleSink for Recorder {
        fn accept(&mut self, node_id: &str, style: TextStyle, _props: Option<&TextProperties>) {
            self.seen.push((node_id.to_string(), style.id));
        }
    }

    fn text(id: &str, style: &str) -> SnapshotNode {
        SnapshotNode::text(id, style, TextProperties::default())
    }

    fn sample() -> DocumentSnapshot {
        // Cover
        //   ├─ Hero (frame)
        //   │   ├─ t1 -> S:a
        //   │   └─ t2 -> S:missing
        //   └─ t3 -> S:b
        // Body
        //   └─ t4 -> S:a
        DocumentSnapshot::from_pages(
            vec![
                SnapshotNode::page(
                    "1:0",
                    "Cover",
                    vec![
                        SnapshotNode::frame(
                            "1:1",
                            "Hero",
                            vec![text("t1", "S:a"), text("t2", "S:missing")],
                        ),
                        text("t3", "S:b"),
                    ],
                ),
                SnapshotNode::page("2:0", "Body", vec![text("t4", "S:a")]),
            ],
            vec![TextStyle::new("S:a", "Title", true), TextStyle::new("S:b", "Text", false)],
        )
        .unwrap()
    }

    #[test]
    fn test_preorder_visit_order() {
        let page = SnapshotNode::page(
            "p",
            "Page",
            vec![
                SnapshotNode::frame("a", "A", vec![text("a1", "S"), text("a2", "S")]),
                SnapshotNode::frame("b", "B", vec![text("b1", "S")]),
            ],
        );
        let mut order = Vec::new();
        visit_preorder(&page, |n| order.push(n.id.clone()));
        assert_eq!(order, vec!["p", "a", "a1", "a2", "b", "b1"]);
    }

    #[test]
    fn test_walk_forwards_resolved_styles_in_order() {
        let doc = sample();
        let mut sink = Recorder::default();
        let stats = TreeWalker::new(&doc)
            .walk(&mut sink, &mut NoProgress, &mut Immediate)
            .unwrap();

        assert_eq!(
            sink.seen,
            vec![
                ("t1".to_string(), "S:a".to_string()),
                ("t3".to_string(), "S:b".to_string()),
                ("t4".to_string(), "S:a".to_string()),
            ]
        );
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.nodes_visited, 7);
        assert_eq!(stats.text_nodes, 4);
        assert_eq!(stats.styled_text_nodes, 4);
        assert_eq!(stats.invalid_references, 1);
    }

    #[test]
    fn test_progress_reported_once_per_page() {
        let doc = sample();
        let mut events = Vec::new();
        let mut observer =
            |p: &Progress<'_>| events.push((p.current, p.total, p.unit_name.to_string()));
        TreeWalker::new(&doc)
            .walk(&mut Recorder::default(), &mut observer, &mut Immediate)
            .unwrap();

        assert_eq!(
            events,
            vec![(1, 2, "Cover".to_string()), (2, 2, "Body".to_string())]
        );
    }

    #[test]
    fn test_scheduler_runs_between_pages_only() {
        struct Counter(usize);
        impl Scheduler for Counter {
            fn pause(&mut self) {
                self.0 += 1;
            }
        }

        let doc = sample();
        let mut counter = Counter(0);
        TreeWalker::new(&doc)
            .walk(&mut Recorder::default(), &mut NoProgress, &mut counter)
            .unwrap();
        assert_eq!(counter.0, 1);
    }

    #[test]
    fn test_non_text_and_non_string_references_ignored() {
        let mut frame_with_ref = SnapshotNode::frame("f", "Frame", vec![]);
        frame_with_ref.text_style_id = Some(json!("S:a"));
        let doc = DocumentSnapshot::from_pages(
            vec![SnapshotNode::page(
                "1:0",
                "Page",
                vec![
                    frame_with_ref,
                    SnapshotNode::new("m", "Mixed", NodeKind::Text)
                        .with_raw_style_ref(json!({ "mixed": true })),
                    text("empty", ""),
                ],
            )],
            vec![TextStyle::new("S:a", "Title", true)],
        )
        .unwrap();

        let mut sink = Recorder::default();
        let stats = TreeWalker::new(&doc)
            .walk(&mut sink, &mut NoProgress, &mut Immediate)
            .unwrap();
        assert!(sink.seen.is_empty());
        assert_eq!(stats.text_nodes, 2);
        assert_eq!(stats.styled_text_nodes, 0);
    }
}
