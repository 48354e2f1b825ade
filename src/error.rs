//! Error types for text style extraction.
//!
//! Errors fall into two groups. Recoverable ones ([`Error::InvalidStyleReference`],
//! [`Error::NodeCreation`]) are produced by the host, logged and swallowed inside
//! the walker or the sample-board loop. Everything else aborts the request and is
//! reported to the caller as a terminal failure.

/// Result type alias for text style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while auditing text styles.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A style lookup hit a missing or malformed style. The walker reports
    /// the node that carried the reference when it logs the skip.
    #[error("Invalid style reference '{style_id}': {reason}")]
    InvalidStyleReference {
        /// The unresolved style identity
        style_id: String,
        /// Why the host rejected it
        reason: String,
    },

    /// The host document API could not be reached
    #[error("Host document unavailable: {0}")]
    HostUnavailable(String),

    /// A single canvas node could not be created
    #[error("Failed to create {what}: {reason}")]
    NodeCreation {
        /// Kind of node being created
        what: String,
        /// Reason reported by the canvas
        reason: String,
    },

    /// Any other canvas mutation failure
    #[error("Canvas error: {0}")]
    Canvas(String),

    /// The document snapshot is structurally invalid
    #[error("Invalid document snapshot: {0}")]
    Snapshot(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error is recovered locally rather than aborting a request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::InvalidStyleReference { .. } | Error::NodeCreation { .. })
    }
}
