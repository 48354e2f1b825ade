//! The flat style metadata record and the typographic attributes it carries.
//!
//! [`StyleRecord`] is the unit of output of an extraction request and the unit
//! of input of the sample-board builder. Everything here is plain data that
//! serialises to the camelCase JSON shape the UI collaborator expects.

use serde::{Deserialize, Serialize};

/// Label recorded for styles that come from a shared library.
pub const EXTERNAL_LIBRARY_LABEL: &str = "External library";

/// Label a locally-defined style would carry. Local styles are filtered out
/// before a record is built, so this never appears in extraction output.
pub const LOCAL_LIBRARY_LABEL: &str = "Local";

/// Placeholder for font fields the text node could not provide.
pub const UNKNOWN_FONT: &str = "Unknown";

/// Font size of a text node.
///
/// A text node whose runs use different sizes reports [`FontSize::Mixed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSize {
    /// One size for the whole node
    Points(f64),
    /// Sizes of the individual runs, in document order
    Mixed {
        /// Run sizes
        mixed: Vec<f64>,
    },
}

impl FontSize {
    /// Scalar used for ranking: the size itself, or the first run's size.
    pub fn first_run(&self) -> f64 {
        match self {
            FontSize::Points(size) => *size,
            FontSize::Mixed { mixed } => mixed.first().copied().unwrap_or(0.0),
        }
    }
}

impl From<f64> for FontSize {
    fn from(size: f64) -> Self {
        FontSize::Points(size)
    }
}

/// Family and style name of the font applied to a text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontName {
    /// Font family, e.g. "Inter"
    pub family: String,
    /// Style within the family, e.g. "Semi Bold"
    pub style: String,
}

impl FontName {
    /// Create a font name.
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

/// Line height of a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    /// Derived from the font metrics
    Auto,
    /// Absolute height in pixels
    Pixels {
        /// Height
        value: f64,
    },
    /// Percentage of the font size
    Percent {
        /// Percentage
        value: f64,
    },
}

/// Unit of a [`LetterSpacing`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpacingUnit {
    /// Absolute pixels
    Pixels,
    /// Percentage of the font size
    Percent,
}

/// Letter spacing of a text node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LetterSpacing {
    /// Amount
    pub value: f64,
    /// Unit of `value`
    pub unit: SpacingUnit,
}

/// Case transform applied to a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    Original,
    Upper,
    Lower,
    Title,
    SmallCaps,
    SmallCapsForced,
}

/// Decoration applied to a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    None,
    Underline,
    Strikethrough,
}

/// Resolved typographic attributes of one text node.
///
/// Every field is optional: a host reports `None` both for absent values and
/// for values that vary across the node's runs (other than the font size,
/// which has an explicit mixed form).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProperties {
    /// Font applied to the node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<FontName>,
    /// Font size, possibly per run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    /// Line height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<LineHeight>,
    /// Letter spacing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<LetterSpacing>,
    /// Space after each paragraph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
    /// Case transform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_case: Option<TextCase>,
    /// Decoration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
}

/// A text style object as exposed by the host style registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Stable style identity
    pub id: String,
    /// Display name, e.g. "Title/LG/Bold"
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Whether the style is defined in a shared library rather than the document
    #[serde(default)]
    pub remote: bool,
}

impl TextStyle {
    /// Create a style definition.
    pub fn new(id: impl Into<String>, name: impl Into<String>, remote: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            remote,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Flat metadata record for one distinct text style.
///
/// Font-derived fields come from the first text node seen using the style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleRecord {
    /// Style identity
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Font family, or "Unknown"
    pub font_family: String,
    /// Font style within the family, or "Unknown"
    pub font_weight_label: String,
    /// Font size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    /// Line height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<LineHeight>,
    /// Letter spacing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<LetterSpacing>,
    /// Space after each paragraph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
    /// Case transform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_case: Option<TextCase>,
    /// Decoration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    /// Whether the style comes from a shared library
    pub is_remote: bool,
    /// "External library" or "Local"
    pub library_label: String,
}

impl StyleRecord {
    /// Build a record from a resolved style and the attributes of the text
    /// node it was found on.
    pub fn from_style(style: &TextStyle, props: Option<&TextProperties>) -> Self {
        let font_name = props.and_then(|p| p.font_name.as_ref());
        Self {
            id: style.id.clone(),
            name: style.name.clone(),
            description: style.description.clone(),
            font_family: font_name
                .map(|f| f.family.clone())
                .unwrap_or_else(|| UNKNOWN_FONT.to_string()),
            font_weight_label: font_name
                .map(|f| f.style.clone())
                .unwrap_or_else(|| UNKNOWN_FONT.to_string()),
            font_size: props.and_then(|p| p.font_size.clone()),
            line_height: props.and_then(|p| p.line_height.clone()),
            letter_spacing: props.and_then(|p| p.letter_spacing),
            paragraph_spacing: props.and_then(|p| p.paragraph_spacing),
            text_case: props.and_then(|p| p.text_case),
            text_decoration: props.and_then(|p| p.text_decoration),
            is_remote: style.remote,
            library_label: if style.remote {
                EXTERNAL_LIBRARY_LABEL.to_string()
            } else {
                LOCAL_LIBRARY_LABEL.to_string()
            },
        }
    }

    /// Numeric font size used as the last ranking key. Missing sizes count as 0.
    pub fn font_size_value(&self) -> f64 {
        self.font_size.as_ref().map(FontSize::first_run).unwrap_or(0.0)
    }
}
