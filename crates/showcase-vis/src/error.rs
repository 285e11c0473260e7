//! Error types for the playback server.

use thiserror::Error;

/// Result type for playback server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the playback server.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad environment or command line value
    #[error("Configuration error: {0}")]
    Config(String),

    /// No demo registered under this name
    #[error("Unknown demo: {0}")]
    UnknownDemo(String),

    /// The player task has stopped
    #[error("Player for {0} is gone")]
    PlayerGone(&'static str),

    /// Demo input failed to parse
    #[error("Parse error: {0}")]
    Parse(#[from] showcase_steps::ParseError),

    /// Site service error
    #[error(transparent)]
    Site(#[from] showcase_site::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
