//! In-memory canvas that records every mutation.
//!
//! Used by the command-line front-end and by tests. Failures can be injected
//! per style identity or per text content, and for frame creation or child
//! attachment as a whole.

use std::collections::HashSet;

use indexmap::IndexMap;
use uuid::Uuid;

use super::canvas::{Canvas, CanvasNodeId, FrameSpec, TextSpec};
use crate::error::{Error, Result};

/// What a recorded node is.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasNodeKind {
    Frame(FrameSpec),
    Text(TextSpec),
}

/// A node created on a [`MemoryCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasNode {
    /// Generated identity
    pub id: CanvasNodeId,
    /// Spec the node was created from
    pub kind: CanvasNodeKind,
    /// Attached children, in append order
    pub children: Vec<CanvasNodeId>,
    /// Canvas coordinates of the top-left corner
    pub position: (f64, f64),
    /// Fixed width, once resized
    pub width: Option<f64>,
}

/// Canvas backed by plain collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryCanvas {
    nodes: IndexMap<CanvasNodeId, CanvasNode>,
    page_children: Vec<CanvasNodeId>,
    selection: Vec<CanvasNodeId>,
    focused: Vec<CanvasNodeId>,
    notifications: Vec<String>,
    viewport_center: (f64, f64),
    failing_styles: HashSet<String>,
    failing_texts: HashSet<String>,
    fail_frames: bool,
    fail_attach: bool,
    closed: bool,
}

impl MemoryCanvas {
    /// Create an empty canvas centred on the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the viewport centre.
    pub fn with_viewport_center(mut self, x: f64, y: f64) -> Self {
        self.viewport_center = (x, y);
        self
    }

    /// Make styled text creation fail for `style_id`.
    pub fn with_failing_style(mut self, style_id: impl Into<String>) -> Self {
        self.failing_styles.insert(style_id.into());
        self
    }

    /// Make any text creation with these characters fail, styled or not.
    pub fn with_failing_text(mut self, characters: impl Into<String>) -> Self {
        self.failing_texts.insert(characters.into());
        self
    }

    /// Make frame creation fail.
    pub fn with_frame_failure(mut self) -> Self {
        self.fail_frames = true;
        self
    }

    /// Make every [`Canvas::append_child`] call fail.
    pub fn with_attach_failure(mut self) -> Self {
        self.fail_attach = true;
        self
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &CanvasNode> {
        self.nodes.values()
    }

    /// Look up a node.
    pub fn node(&self, id: &str) -> Option<&CanvasNode> {
        self.nodes.get(id)
    }

    /// Nodes attached to the current page.
    pub fn page_children(&self) -> &[CanvasNodeId] {
        &self.page_children
    }

    /// Text specs of a frame's children, in child order.
    pub fn text_children(&self, frame: &str) -> Vec<&TextSpec> {
        self.node(frame)
            .map(|f| {
                f.children
                    .iter()
                    .filter_map(|id| match self.nodes.get(id).map(|n| &n.kind) {
                        Some(CanvasNodeKind::Text(spec)) => Some(spec),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Current selection.
    pub fn selection(&self) -> &[CanvasNodeId] {
        &self.selection
    }

    /// Nodes the viewport was last focused on.
    pub fn focused(&self) -> &[CanvasNodeId] {
        &self.focused
    }

    /// Notifications shown so far.
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Whether [`Canvas::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn insert(&mut self, kind: CanvasNodeKind) -> CanvasNodeId {
        let id = Uuid::new_v4().to_string();
        self.nodes.insert(
            id.clone(),
            CanvasNode {
                id: id.clone(),
                kind,
                children: Vec::new(),
                position: (0.0, 0.0),
                width: None,
            },
        );
        id
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut CanvasNode> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::Canvas(format!("unknown node {}", id)))
    }
}

impl Canvas for MemoryCanvas {
    fn create_frame(&mut self, spec: &FrameSpec) -> Result<CanvasNodeId> {
        if self.fail_frames {
            return Err(Error::Canvas("frame creation is disabled".to_string()));
        }
        Ok(self.insert(CanvasNodeKind::Frame(spec.clone())))
    }

    fn create_text(&mut self, spec: &TextSpec) -> Result<CanvasNodeId> {
        if self.failing_texts.contains(&spec.characters) {
            return Err(Error::NodeCreation {
                what: "text node".to_string(),
                reason: format!("cannot render '{}'", spec.characters),
            });
        }
        if let Some(style_id) = &spec.style_id {
            if self.failing_styles.contains(style_id) {
                return Err(Error::NodeCreation {
                    what: "text node".to_string(),
                    reason: format!("font for style {} is not available", style_id),
                });
            }
        }
        Ok(self.insert(CanvasNodeKind::Text(spec.clone())))
    }

    fn append_to_page(&mut self, node: &str) -> Result<()> {
        self.node_mut(node)?;
        self.page_children.push(node.to_string());
        Ok(())
    }

    fn append_child(&mut self, parent: &str, child: &str) -> Result<()> {
        if self.fail_attach {
            return Err(Error::Canvas(format!("cannot attach {} to {}", child, parent)));
        }
        self.node_mut(child)?;
        let parent = self.node_mut(parent)?;
        if !matches!(parent.kind, CanvasNodeKind::Frame(_)) {
            return Err(Error::Canvas(format!("node {} cannot have children", parent.id)));
        }
        parent.children.push(child.to_string());
        Ok(())
    }

    fn viewport_center(&self) -> (f64, f64) {
        self.viewport_center
    }

    fn set_position(&mut self, node: &str, x: f64, y: f64) -> Result<()> {
        self.node_mut(node)?.position = (x, y);
        Ok(())
    }

    fn resize_width(&mut self, node: &str, width: f64) -> Result<()> {
        self.node_mut(node)?.width = Some(width);
        Ok(())
    }

    fn select(&mut self, nodes: &[CanvasNodeId]) -> Result<()> {
        self.selection = nodes.to_vec();
        Ok(())
    }

    fn scroll_and_zoom_into_view(&mut self, nodes: &[CanvasNodeId]) -> Result<()> {
        self.focused = nodes.to_vec();
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
        self.notifications.push(message.to_string());
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
