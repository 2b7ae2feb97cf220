//! Session error types.

use thiserror::Error;

/// Session errors.
///
/// Parse and dispatch errors are reported per cycle and never end the
/// session. Console errors do.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Statement text could not be classified.
    #[error(transparent)]
    Parse(#[from] tabula_parser::ParseError),

    /// Backend rejected the statement or could not be reached.
    #[error(transparent)]
    Dispatch(#[from] tabula_client::ChainError),

    /// Statement kind has no backend operation.
    #[error("cannot dispatch {kind} statement")]
    NotDispatchable { kind: String },

    /// Result could not be rendered.
    #[error("render error: {0}")]
    Render(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("console error: {0}")]
    Console(#[from] std::io::Error),
}

impl SessionError {
    pub fn not_dispatchable(kind: impl Into<String>) -> Self {
        Self::NotDispatchable { kind: kind.into() }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
