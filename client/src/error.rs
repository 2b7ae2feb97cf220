//! Error types for chain and resolver capabilities.

use tabula_core::messages::ERR_SIGNER_REQUIRED;
use tabula_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("connection already closed")]
    Closed,

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    #[error("no such table: {0}")]
    NoSuchTable(String),

    #[error("{}", ERR_SIGNER_REQUIRED)]
    SignerRequired,

    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ChainResult<T> = std::result::Result<T, ChainError>;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("lookup failed for '{alias}': {message}")]
    LookupFailed { alias: String, message: String },

    #[error("'{key}' exists on multiple namespaces ({domains}), please fully qualify")]
    Ambiguous { key: String, domains: String },

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl ResolveError {
    pub fn lookup_failed(alias: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LookupFailed {
            alias: alias.into(),
            message: message.into(),
        }
    }
}
