//! JSON document snapshots.
//!
//! A snapshot is a serialised copy of a host document: the node tree rooted at
//! a `DOCUMENT` node (whose children are pages) and the table of text styles
//! the tree can reference.
//!
//! ```json
//! {
//!   "document": { "id": "0:0", "name": "Kit", "type": "DOCUMENT", "children": [
//!     { "id": "1:0", "name": "Cover", "type": "PAGE", "children": [
//!       { "id": "1:2", "name": "Heading", "type": "TEXT",
//!         "textStyleId": "S:title-lg",
//!         "fontName": { "family": "Inter", "style": "Bold" }, "fontSize": 32 }
//!     ] }
//!   ] },
//!   "styles": [ { "id": "S:title-lg", "name": "Title/LG/Bold", "remote": true } ]
//! }
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Document, DocumentNode, NodeKind, StyleReference};
use crate::error::{Error, Result};
use crate::record::{TextProperties, TextStyle};

/// One node of a snapshot tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,
    /// Raw style reference. Only a JSON string counts as a single reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style_id: Option<Value>,
    #[serde(flatten)]
    pub text: TextProperties,
}

impl SnapshotNode {
    /// Create a node of any kind.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            children: Vec::new(),
            text_style_id: None,
            text: TextProperties::default(),
        }
    }

    /// Create a page with the given children.
    pub fn page(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<SnapshotNode>,
    ) -> Self {
        Self::new(id, name, NodeKind::Page).with_children(children)
    }

    /// Create a frame with the given children.
    pub fn frame(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<SnapshotNode>,
    ) -> Self {
        Self::new(id, name, NodeKind::Frame).with_children(children)
    }

    /// Create a text node referencing `style_id`.
    pub fn text(id: impl Into<String>, style_id: &str, props: TextProperties) -> Self {
        let id = id.into();
        let mut node = Self::new(id.clone(), id, NodeKind::Text);
        node.text_style_id = Some(Value::String(style_id.to_string()));
        node.text = props;
        node
    }

    /// Replace the children.
    pub fn with_children(mut self, children: Vec<SnapshotNode>) -> Self {
        self.children = children;
        self
    }

    /// Replace the raw style reference.
    pub fn with_raw_style_ref(mut self, value: Value) -> Self {
        self.text_style_id = Some(value);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SnapshotNode::subtree_len).sum::<usize>()
    }
}

impl DocumentNode for SnapshotNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &NodeKind {
        &self.kind
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn text_style_ref(&self) -> StyleReference<'_> {
        match &self.text_style_id {
            None | Some(Value::Null) => StyleReference::None,
            Some(Value::String(id)) => StyleReference::Id(id),
            Some(_) => StyleReference::Mixed,
        }
    }

    fn text_properties(&self) -> Option<&TextProperties> {
        self.kind.is_text().then_some(&self.text)
    }
}

/// Wire form of a snapshot before validation.
#[derive(Deserialize)]
struct RawSnapshot {
    document: SnapshotNode,
    #[serde(default)]
    styles: Vec<TextStyle>,
}

/// A document tree plus its style table.
///
/// Deserialising goes through [`DocumentSnapshot::new`], so the root kind and
/// style ids are validated and the style index is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct DocumentSnapshot {
    document: SnapshotNode,
    #[serde(default)]
    styles: Vec<TextStyle>,
    #[serde(skip)]
    style_index: HashMap<String, usize>,
}

impl DocumentSnapshot {
    /// Build a snapshot from a root node and style table.
    pub fn new(document: SnapshotNode, styles: Vec<TextStyle>) -> Result<Self> {
        if document.kind != NodeKind::Document {
            return Err(Error::Snapshot(format!(
                "root node must be DOCUMENT, found {}",
                document.kind.as_str()
            )));
        }
        let mut snapshot = Self {
            document,
            styles,
            style_index: HashMap::new(),
        };
        snapshot.reindex()?;
        Ok(snapshot)
    }

    /// Build a snapshot whose root holds `pages`.
    pub fn from_pages(pages: Vec<SnapshotNode>, styles: Vec<TextStyle>) -> Result<Self> {
        let root = SnapshotNode::new("0:0", "Document", NodeKind::Document).with_children(pages);
        Self::new(root, styles)
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Self::new(raw.document, raw.styles)
    }

    /// Parse a snapshot from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_reader(reader)?;
        Self::new(raw.document, raw.styles)
    }

    /// Load a snapshot file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// The root node.
    pub fn root(&self) -> &SnapshotNode {
        &self.document
    }

    /// Every style in the table.
    pub fn styles(&self) -> &[TextStyle] {
        &self.styles
    }

    fn reindex(&mut self) -> Result<()> {
        self.style_index.clear();
        for (idx, style) in self.styles.iter().enumerate() {
            if self.style_index.insert(style.id.clone(), idx).is_some() {
                return Err(Error::Snapshot(format!("duplicate style id '{}'", style.id)));
            }
        }
        Ok(())
    }
}

impl TryFrom<RawSnapshot> for DocumentSnapshot {
    type Error = Error;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        Self::new(raw.document, raw.styles)
    }
}

impl Document for DocumentSnapshot {
    type Node = SnapshotNode;

    fn pages(&self) -> Result<&[SnapshotNode]> {
        Ok(&self.document.children)
    }

    fn style_by_id(&self, id: &str) -> Result<Option<TextStyle>> {
        match self.style_index.get(id) {
            Some(&idx) => Ok(Some(self.styles[idx].clone())),
            None => Err(Error::InvalidStyleReference {
                style_id: id.to_string(),
                reason: "style not found in snapshot".to_string(),
            }),
        }
    }
}
