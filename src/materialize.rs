//! Canvas-side operations driven by extraction results.
//!
//! - [`SampleBoardBuilder`] turns a ranked style list into a frame holding one
//!   text sample per style.
//! - [`select_nodes_with_style`] selects every text node using one style.

use crate::config::BoardLayout;
use crate::error::Result;
use crate::host::{Canvas, CanvasNodeId, Document, DocumentNode, FrameSpec, TextSpec};
use crate::record::StyleRecord;
use crate::walker::visit_preorder;

/// Frame settings for a board layout.
pub fn frame_spec(layout: &BoardLayout) -> FrameSpec {
    FrameSpec {
        name: layout.frame_name.clone(),
        fill: layout.fill,
        item_spacing: layout.item_spacing,
        padding: [layout.padding; 4],
    }
}

/// How one style ended up on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Created with the style applied
    Styled,
    /// Created as plain text after the styled attempt failed
    Fallback,
    /// Neither attempt succeeded
    Dropped,
}

/// Result of building a sample board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardReport {
    /// The container frame
    pub frame: CanvasNodeId,
    /// Created text nodes, in list order
    pub samples: Vec<CanvasNodeId>,
    /// Outcome per input style, in list order
    pub outcomes: Vec<SampleOutcome>,
}

impl BoardReport {
    /// Number of text nodes placed on the board.
    pub fn created(&self) -> usize {
        self.samples.len()
    }

    /// Number of styles that needed the plain-text fallback.
    pub fn fallbacks(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == SampleOutcome::Fallback)
            .count()
    }
}

/// Builds sample boards on a canvas.
#[derive(Debug, Clone, Default)]
pub struct SampleBoardBuilder {
    layout: BoardLayout,
}

impl SampleBoardBuilder {
    /// Create a builder with the given layout.
    pub fn new(layout: BoardLayout) -> Self {
        Self { layout }
    }

    /// Create one text sample per style, in list order.
    ///
    /// A style whose sample cannot be created falls back to a plain text node
    /// with the same content; if that fails too, the style is skipped. Errors
    /// outside the per-style loop abort the whole board.
    pub fn build<C: Canvas>(&self, canvas: &mut C, styles: &[StyleRecord]) -> Result<BoardReport> {
        let frame = canvas.create_frame(&frame_spec(&self.layout))?;
        canvas.append_to_page(&frame)?;

        let (cx, cy) = canvas.viewport_center();
        let (dx, dy) = self.layout.viewport_offset;
        canvas.set_position(&frame, cx + dx, cy + dy)?;

        let mut samples = Vec::with_capacity(styles.len());
        let mut outcomes = Vec::with_capacity(styles.len());
        for style in styles {
            let (outcome, node) = place_sample(canvas, &frame, style);
            if let Some(node) = node {
                samples.push(node);
            }
            outcomes.push(outcome);
        }

        canvas.resize_width(&frame, self.layout.width)?;
        let focus = vec![frame.clone()];
        canvas.select(&focus)?;
        canvas.scroll_and_zoom_into_view(&focus)?;

        log::info!("Built sample board with {} of {} styles", samples.len(), styles.len());
        Ok(BoardReport {
            frame,
            samples,
            outcomes,
        })
    }
}

fn place_sample<C: Canvas>(
    canvas: &mut C,
    frame: &str,
    style: &StyleRecord,
) -> (SampleOutcome, Option<CanvasNodeId>) {
    let styled = TextSpec::styled(style.name.as_str(), style.id.as_str());
    match create_in(canvas, frame, &styled) {
        Ok(node) => return (SampleOutcome::Styled, Some(node)),
        Err(e) => log::warn!("Could not create sample for style {}: {}", style.name, e),
    }

    match create_in(canvas, frame, &TextSpec::plain(style.name.as_str())) {
        Ok(node) => (SampleOutcome::Fallback, Some(node)),
        Err(e) => {
            log::warn!("Could not create fallback text for style {}: {}", style.name, e);
            (SampleOutcome::Dropped, None)
        },
    }
}

fn create_in<C: Canvas>(canvas: &mut C, frame: &str, spec: &TextSpec) -> Result<CanvasNodeId> {
    let node = canvas.create_text(spec)?;
    if let Err(e) = canvas.append_child(frame, &node) {
        log::warn!("Text node {} could not be attached and stays detached", node);
        return Err(e);
    }
    Ok(node)
}

/// Outcome of a select-by-style request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// These nodes were selected and brought into view
    Selected(Vec<CanvasNodeId>),
    /// No text node references the style
    NoMatch,
}

impl SelectionOutcome {
    /// Number of selected nodes.
    pub fn count(&self) -> usize {
        match self {
            SelectionOutcome::Selected(nodes) => nodes.len(),
            SelectionOutcome::NoMatch => 0,
        }
    }
}

/// Ids of every text node in the document whose style reference is `style_id`.
pub fn find_nodes_with_style<D: Document>(
    document: &D,
    style_id: &str,
) -> Result<Vec<CanvasNodeId>> {
    let mut found = Vec::new();
    for page in document.pages()? {
        visit_preorder(page, |node| {
            if node.kind().is_text() && node.text_style_ref().as_id() == Some(style_id) {
                found.push(node.id().to_string());
            }
        });
    }
    Ok(found)
}

/// Select every text node using `style_id` and focus the viewport on them.
pub fn select_nodes_with_style<D: Document, C: Canvas>(
    document: &D,
    canvas: &mut C,
    style_id: &str,
) -> Result<SelectionOutcome> {
    let nodes = find_nodes_with_style(document, style_id)?;
    if nodes.is_empty() {
        log::debug!("No nodes reference style {}", style_id);
        return Ok(SelectionOutcome::NoMatch);
    }

    canvas.select(&nodes)?;
    canvas.scroll_and_zoom_into_view(&nodes)?;
    Ok(SelectionOutcome::Selected(nodes))
}
