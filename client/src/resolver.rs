//! Name resolution capability.

use std::future::Future;
use std::sync::Arc;

use tabula_core::TableName;

use crate::error::ResolveError;

/// Maps a human-readable alias to a canonical table name.
pub trait NameResolver {
    /// `Ok(None)` means the alias is not registered anywhere.
    fn resolve_alias(
        &self,
        alias: &str,
    ) -> impl Future<Output = Result<Option<TableName>, ResolveError>> + Send;
}

impl<T: NameResolver + Send + Sync> NameResolver for Arc<T> {
    fn resolve_alias(
        &self,
        alias: &str,
    ) -> impl Future<Output = Result<Option<TableName>, ResolveError>> + Send {
        (**self).resolve_alias(alias)
    }
}
