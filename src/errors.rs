use schema::RecordId;
use thiserror::Error;

/// Main error type for the Pokedex browser.
///
/// None of these are retried. A view session that receives one stays in its
/// failed state until it is loaded again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    /// No usable response: DNS, connect or TLS failure, or a non-success status
    #[error("Transport error: {0}")]
    Transport(String),
    /// The response body was not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),
    /// Valid JSON, but not the shape the endpoint promises
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    /// The remote index has no entry for this id
    #[error("Pokémon #{0} not found")]
    NotFound(RecordId),
    /// Configuration could not be loaded or is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for BrowserError {
    fn from(err: reqwest::Error) -> Self {
        BrowserError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for BrowserError {
    fn from(err: serde_json::Error) -> Self {
        BrowserError::Parse(err.to_string())
    }
}

/// Type alias for Results using BrowserError
pub type BrowserResult<T> = Result<T, BrowserError>;
