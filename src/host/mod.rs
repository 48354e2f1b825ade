//! Host capability interfaces.
//!
//! The design document, its style registry and its canvas are owned by the
//! host application. The core only reads from a [`Document`] and writes to a
//! [`Canvas`]; it never holds on to host nodes beyond the current call.
//!
//! Two implementations ship with the crate:
//! - [`DocumentSnapshot`]: a JSON snapshot of a node tree plus style table
//! - [`MemoryCanvas`]: an in-memory canvas that records every mutation

mod canvas;
mod memory_canvas;
mod snapshot;

pub use canvas::{Canvas, CanvasNodeId, FrameSpec, TextSpec};
pub use memory_canvas::{CanvasNode, CanvasNodeKind, MemoryCanvas};
pub use snapshot::{DocumentSnapshot, SnapshotNode};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::{TextProperties, TextStyle};

/// Discriminator of a document node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Document,
    Page,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Text,
    /// Any node type the core does not distinguish
    Other(String),
}

impl NodeKind {
    /// Wire name of the kind, e.g. `"TEXT"`.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Document => "DOCUMENT",
            NodeKind::Page => "PAGE",
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::Section => "SECTION",
            NodeKind::Component => "COMPONENT",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Text => "TEXT",
            NodeKind::Other(name) => name,
        }
    }

    /// Whether nodes of this kind carry text content.
    pub fn is_text(&self) -> bool {
        matches!(self, NodeKind::Text)
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "DOCUMENT" => NodeKind::Document,
            "PAGE" | "CANVAS" => NodeKind::Page,
            "FRAME" => NodeKind::Frame,
            "GROUP" => NodeKind::Group,
            "SECTION" => NodeKind::Section,
            "COMPONENT" => NodeKind::Component,
            "COMPONENT_SET" => NodeKind::ComponentSet,
            "INSTANCE" => NodeKind::Instance,
            "TEXT" => NodeKind::Text,
            _ => NodeKind::Other(name),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Text style reference carried by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleReference<'a> {
    /// No style applied
    None,
    /// A single style identity
    Id(&'a str),
    /// Several styles across the node's runs, or any non-string value
    Mixed,
}

impl<'a> StyleReference<'a> {
    /// The referenced identity, if this is a non-empty string reference.
    pub fn as_id(&self) -> Option<&'a str> {
        match self {
            StyleReference::Id(id) if !id.is_empty() => Some(id),
            _ => None,
        }
    }
}

/// Read-only view of one node in the host's document tree.
pub trait DocumentNode: Sized {
    /// Stable node identity.
    fn id(&self) -> &str;

    /// Layer name shown to the user.
    fn name(&self) -> &str;

    /// Node type discriminator.
    fn kind(&self) -> &NodeKind;

    /// Ordered children. Leaf kinds return an empty slice.
    fn children(&self) -> &[Self];

    /// Text style applied to the node.
    fn text_style_ref(&self) -> StyleReference<'_>;

    /// Resolved typographic attributes; `None` for non-text nodes.
    fn text_properties(&self) -> Option<&TextProperties>;
}

/// Read access to a host document and its style registry.
pub trait Document {
    /// Node type of the tree.
    type Node: DocumentNode;

    /// Direct children of the document root, one per page.
    fn pages(&self) -> Result<&[Self::Node]>;

    /// Resolve a style identity.
    ///
    /// `Err` means the reference is invalid; `Ok(None)` means the registry has
    /// no text style under that identity.
    fn style_by_id(&self, id: &str) -> Result<Option<TextStyle>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_round_trip_names() {
        assert_eq!(NodeKind::from("TEXT".to_string()), NodeKind::Text);
        assert_eq!(NodeKind::from("CANVAS".to_string()), NodeKind::Page);
        assert_eq!(
            NodeKind::from("VECTOR".to_string()),
            NodeKind::Other("VECTOR".to_string())
        );
        assert_eq!(String::from(NodeKind::ComponentSet), "COMPONENT_SET");
    }

    #[test]
    fn test_style_reference_as_id() {
        assert_eq!(StyleReference::Id("S:1").as_id(), Some("S:1"));
        assert_eq!(StyleReference::Id("").as_id(), None);
        assert_eq!(StyleReference::Mixed.as_id(), None);
        assert_eq!(StyleReference::None.as_id(), None);
    }
}
