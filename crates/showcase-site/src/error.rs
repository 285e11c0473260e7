//! Error types for the site services.

use thiserror::Error;

/// Result type for site operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in site operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Backing store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Outbound request failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The impossible button was pressed while disabled
    #[error("Button disabled: the switch is off")]
    ButtonDisabled,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
