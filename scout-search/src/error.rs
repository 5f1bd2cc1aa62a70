//! Error types for the scout-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Query text never appears in an error
//! message; backend failures carry only the backend's own reason.

use std::fmt;

/// Which injected retrieval backend an error or result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Keyword (sparse, BM25-style) retrieval.
    Keyword,
    /// Embedding (dense) retrieval.
    Dense,
}

impl BackendKind {
    /// Returns the stable lower-case name of this backend.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Dense => "dense",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur during a research turn.
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// One of the two retrieval backends failed; the whole turn fails.
    #[error("backend error ({backend}): {reason}")]
    Backend {
        /// The backend that failed.
        backend: BackendKind,
        /// The backend's own failure description.
        reason: String,
    },

    /// A backend call timed out (returned by adapters that enforce deadlines).
    #[error("search timed out: {0}")]
    Timeout(String),

    /// A transport-level failure inside a backend adapter.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A backend adapter could not decode its upstream response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid research configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for scout-search results.
pub type Result<T> = std::result::Result<T, ResearchError>;
