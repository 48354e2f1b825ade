//! # textstyle_audit
//!
//! Audit the text styles used across a design document.
//!
//! The crate walks every page of a host document, collects the library text
//! styles referenced by text nodes, deduplicates them, and ranks them by
//! typographic importance. The ranked list can be sent to a UI, rendered as a
//! sample board on the host canvas, or used to select every node that uses a
//! given style.
//!
//! ## Pipeline
//!
//! ```text
//! Document ──► TreeWalker ──► StyleCollector ──► RankingEngine ──► Vec<StyleRecord>
//!  (pages)     (pre-order,     (dedup, remote     (category, size,
//!              progress)        only, usage)       weight, font size)
//! ```
//!
//! The host is abstracted behind the [`host::Document`] and [`host::Canvas`]
//! traits. [`host::DocumentSnapshot`] reads a JSON export of a document and
//! [`host::MemoryCanvas`] records canvas mutations in memory.
//!
//! ## Quick Start
//!
//! ```
//! use textstyle_audit::host::{DocumentSnapshot, SnapshotNode};
//! use textstyle_audit::record::{TextProperties, TextStyle};
//! use textstyle_audit::{extract_styles, ExtractionConfig};
//!
//! # fn main() -> textstyle_audit::Result<()> {
//! let page = SnapshotNode::page(
//!     "1:0",
//!     "Cover",
//!     vec![SnapshotNode::text("1:1", "S:title", TextProperties::default())],
//! );
//! let styles = vec![TextStyle::new("S:title", "Title/XL/Bold", true)];
//! let document = DocumentSnapshot::from_pages(vec![page], styles)?;
//!
//! let records = extract_styles(&document, &ExtractionConfig::default())?;
//! assert_eq!(records[0].name, "Title/XL/Bold");
//! assert_eq!(records[0].library_label, "External library");
//! # Ok(())
//! # }
//! ```

// Error handling
pub mod error;

// Configuration
pub mod config;

// Host document and canvas abstraction
pub mod host;

// Style data model and name classification
pub mod classify;
pub mod record;

// Extraction pipeline
pub mod collector;
pub mod extract;
pub mod ranking;
pub mod walker;

// Canvas output
pub mod materialize;

// UI message contract
pub mod protocol;

// Re-exports
pub use classify::{ClassifierRules, NameClassifier, SizeScale};
pub use config::{BoardLayout, ExtractionConfig};
pub use error::{Error, Result};
pub use extract::{extract_styles, ExtractionReport, StyleExtractor};
pub use materialize::{select_nodes_with_style, BoardReport, SampleBoardBuilder, SelectionOutcome};
pub use protocol::{Request, Session, SessionState, UiEvent};
pub use record::{StyleRecord, TextStyle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
