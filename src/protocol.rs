//! Message contract with the UI collaborator and request dispatch.
//!
//! Requests and UI events are JSON objects tagged by `"type"`. A [`Session`]
//! owns the host document and canvas for the lifetime of the plugin and
//! answers one request at a time:
//!
//! - `extract-styles`: `progress-init`, one `progress-update` per page, then
//!   `styles-extracted` or `error`
//! - `create-styles-frame`: canvas notification with the created count
//! - `select-nodes-with-style`: canvas notification with the selected count
//! - `close-plugin`: closes the canvas; later requests are ignored

use serde::{Deserialize, Serialize};

use crate::config::{BoardLayout, ExtractionConfig};
use crate::error::Result;
use crate::extract::StyleExtractor;
use crate::host::{Canvas, Document};
use crate::materialize::{select_nodes_with_style, SampleBoardBuilder, SelectionOutcome};
use crate::record::StyleRecord;
use crate::walker::{Progress, ProgressObserver};

/// A request sent by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    ExtractStyles,
    CreateStylesFrame {
        styles: Vec<StyleRecord>,
    },
    SelectNodesWithStyle {
        #[serde(rename = "styleId")]
        style_id: String,
    },
    ClosePlugin,
}

/// An event posted back to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiEvent {
    ProgressInit {
        #[serde(rename = "totalPages")]
        total_pages: usize,
    },
    ProgressUpdate {
        #[serde(rename = "currentPage")]
        current_page: usize,
        #[serde(rename = "totalPages")]
        total_pages: usize,
        #[serde(rename = "pageName")]
        page_name: String,
    },
    StylesExtracted {
        styles: Vec<StyleRecord>,
    },
    Error {
        message: String,
    },
}

/// Whether the session accepts further requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

/// Prefix of the terminal error message for failed extractions.
pub const EXTRACTION_ERROR_PREFIX: &str = "Error while extracting styles: ";

/// Forwards walker progress as UI events.
struct EventProgress<'a> {
    emit: &'a mut dyn FnMut(UiEvent),
}

impl ProgressObserver for EventProgress<'_> {
    fn started(&mut self, total: usize) {
        (self.emit)(UiEvent::ProgressInit { total_pages: total });
    }

    fn unit(&mut self, progress: &Progress<'_>) {
        (self.emit)(UiEvent::ProgressUpdate {
            current_page: progress.current,
            total_pages: progress.total,
            page_name: progress.unit_name.to_string(),
        });
    }
}

/// Plugin session bound to one document and one canvas.
pub struct Session<D: Document, C: Canvas> {
    document: D,
    canvas: C,
    extractor: StyleExtractor,
    board: SampleBoardBuilder,
    state: SessionState,
}

impl<D: Document, C: Canvas> Session<D, C> {
    /// Open a session with default configuration.
    pub fn new(document: D, canvas: C) -> Self {
        Self::with_config(document, canvas, ExtractionConfig::default(), BoardLayout::default())
    }

    /// Open a session with explicit configuration.
    pub fn with_config(
        document: D,
        canvas: C,
        config: ExtractionConfig,
        layout: BoardLayout,
    ) -> Self {
        Self {
            document,
            canvas,
            extractor: StyleExtractor::new(config),
            board: SampleBoardBuilder::new(layout),
            state: SessionState::Open,
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The canvas, for inspection.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// The document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Handle one request, posting UI events through `emit`.
    pub fn handle(&mut self, request: Request, emit: &mut dyn FnMut(UiEvent)) -> SessionState {
        if self.state == SessionState::Closed {
            log::debug!("Ignoring {:?} on closed session", request);
            return self.state;
        }

        match request {
            Request::ExtractStyles => self.extract(emit),
            Request::CreateStylesFrame { styles } => self.create_frame(&styles),
            Request::SelectNodesWithStyle { style_id } => self.select(&style_id),
            Request::ClosePlugin => {
                self.canvas.close();
                self.state = SessionState::Closed;
            },
        }
        self.state
    }

    /// Parse one JSON request and handle it.
    pub fn handle_json(
        &mut self,
        json: &str,
        emit: &mut dyn FnMut(UiEvent),
    ) -> Result<SessionState> {
        let request: Request = serde_json::from_str(json)?;
        Ok(self.handle(request, emit))
    }

    fn extract(&mut self, emit: &mut dyn FnMut(UiEvent)) {
        log::info!("Starting text style extraction");
        let result = {
            let mut progress = EventProgress { emit: &mut *emit };
            self.extractor.extract(&self.document, &mut progress)
        };

        match result {
            Ok(report) => emit(UiEvent::StylesExtracted {
                styles: report.styles,
            }),
            Err(e) => {
                log::error!("Extraction failed: {}", e);
                emit(UiEvent::Error {
                    message: format!("{}{}", EXTRACTION_ERROR_PREFIX, e),
                });
            },
        }
    }

    fn create_frame(&mut self, styles: &[StyleRecord]) {
        match self.board.build(&mut self.canvas, styles) {
            Ok(report) => {
                let message = format!("Created frame with {} text styles", report.created());
                self.canvas.notify(&message);
            },
            Err(e) => {
                log::error!("Sample board failed: {}", e);
                self.canvas.notify(&format!("Failed to create frame: {}", e));
            },
        }
    }

    fn select(&mut self, style_id: &str) {
        match select_nodes_with_style(&self.document, &mut self.canvas, style_id) {
            Ok(SelectionOutcome::Selected(nodes)) => {
                let message = format!("Selected {} nodes using this style", nodes.len());
                self.canvas.notify(&message);
            },
            Ok(SelectionOutcome::NoMatch) => self.canvas.notify("No nodes use this style"),
            Err(e) => {
                log::error!("Selection failed: {}", e);
                self.canvas.notify(&format!("Failed to select nodes: {}", e));
            },
        }
    }
}
