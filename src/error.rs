//! Error types for the scout host.

/// Top-level error type for the host: file loading plus whatever the
/// research core returns.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration file could not be parsed or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Fixture file could not be decoded.
    #[error("fixture error: {0}")]
    Fixture(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Research turn failure.
    #[error(transparent)]
    Research(#[from] scout_search::ResearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, HostError>;
