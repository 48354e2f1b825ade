//! Canvas mutation surface used to build sample boards and drive selection.

use crate::config::Rgb;
use crate::error::Result;

/// Identity of a node created on, or selected through, the canvas.
pub type CanvasNodeId = String;

/// Everything needed to create a container frame.
///
/// Frames are vertical auto-layout stacks that hug their content on both
/// axes until [`Canvas::resize_width`] fixes the width.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpec {
    /// Layer name shown in the host
    pub name: String,
    /// Background colour
    pub fill: Rgb,
    /// Gap between stacked children
    pub item_spacing: f64,
    /// Top, right, bottom, left
    pub padding: [f64; 4],
}

/// Everything needed to create a text node.
///
/// Text stretches across its parent's width and is left aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    /// Text content
    pub characters: String,
    /// Text style to apply; `None` creates plain text
    pub style_id: Option<String>,
}

impl TextSpec {
    /// Text node showing `characters` in the given style.
    pub fn styled(characters: impl Into<String>, style_id: impl Into<String>) -> Self {
        Self {
            characters: characters.into(),
            style_id: Some(style_id.into()),
        }
    }

    /// Same text without a style.
    pub fn plain(characters: impl Into<String>) -> Self {
        Self {
            characters: characters.into(),
            style_id: None,
        }
    }
}

/// Write access to the host canvas.
///
/// Mutations are issued sequentially; no transaction discipline is assumed.
pub trait Canvas {
    /// Create a frame. It is not attached anywhere yet.
    fn create_frame(&mut self, spec: &FrameSpec) -> Result<CanvasNodeId>;

    /// Create a text node. It is not attached anywhere yet.
    fn create_text(&mut self, spec: &TextSpec) -> Result<CanvasNodeId>;

    /// Attach a node to the current page.
    fn append_to_page(&mut self, node: &str) -> Result<()>;

    /// Attach `child` as the last child of `parent`.
    ///
    /// There is no removal operation, so a node created before a failed
    /// attach stays on the canvas, detached.
    fn append_child(&mut self, parent: &str, child: &str) -> Result<()>;

    /// Centre of the visible viewport in canvas coordinates.
    fn viewport_center(&self) -> (f64, f64);

    /// Move a node.
    fn set_position(&mut self, node: &str, x: f64, y: f64) -> Result<()>;

    /// Fix a node's width, letting its height follow its content.
    fn resize_width(&mut self, node: &str, width: f64) -> Result<()>;

    /// Replace the current selection.
    fn select(&mut self, nodes: &[CanvasNodeId]) -> Result<()>;

    /// Pan and zoom so that all `nodes` are visible.
    fn scroll_and_zoom_into_view(&mut self, nodes: &[CanvasNodeId]) -> Result<()>;

    /// Show a transient message to the user.
    fn notify(&mut self, message: &str);

    /// End the session. Hosts without a session concept ignore it.
    fn close(&mut self) {}
}
