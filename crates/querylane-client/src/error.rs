//! Error types for client operations.

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by query materialization and the collection verbs.
///
/// Every failure reaches the immediate caller; nothing is retried or
/// logged-and-swallowed inside the engine. `Decode` is deliberately
/// distinct from `Transport` so callers can tell "the network worked but
/// the payload was wrong" apart from connection trouble.
#[derive(Debug, Error)]
pub enum Error {
    /// Endpoint not registered or path missing at build time
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The active translator cannot lower the query chain; raised at
    /// materialization, never at builder-call time
    #[error("translation error: {0}")]
    Translation(#[from] querylane_query::TranslateError),

    /// Connection failure or timeout; `reqwest::Error::is_timeout`
    /// distinguishes expiry from other transport trouble
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response outside the recognized not-found cases
    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body did not match the expected entity or envelope shape
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Entity does not exist; raised by `get`, never by `find`
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// Local precondition failure, raised before any network attempt
    #[error("validation error: {0}")]
    Validation(String),
}
