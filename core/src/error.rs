//! Core error types.

use thiserror::Error;

/// Errors raised while validating core identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Text is not a canonical `{prefix}_{chainId}_{tableId}` name.
    #[error("invalid table name '{name}': expected {{prefix}}_{{chainId}}_{{tableId}}")]
    InvalidTableName { name: String },

    /// Alias key contains characters other than letters, digits or underscores.
    #[error("invalid alias key '{key}': only letters, digits or underscores are allowed")]
    InvalidAliasKey { key: String },

    /// Chain name is not in the supported set.
    #[error("unsupported chain '{name}' (see `chains` command for details)")]
    UnsupportedChain { name: String },

    /// Output format name is unknown.
    #[error("unknown output format '{name}': expected one of raw, objects, pretty")]
    UnknownFormat { name: String },
}

impl CoreError {
    pub fn invalid_table_name(name: impl Into<String>) -> Self {
        Self::InvalidTableName { name: name.into() }
    }

    pub fn invalid_alias_key(key: impl Into<String>) -> Self {
        Self::InvalidAliasKey { key: key.into() }
    }

    pub fn unsupported_chain(name: impl Into<String>) -> Self {
        Self::UnsupportedChain { name: name.into() }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
