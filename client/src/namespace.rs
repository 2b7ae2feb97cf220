//! Alias tables grouped by domain.
//!
//! An alias is either `key.domain` (looked up under that domain) or a bare
//! `key` (looked up across every domain). A bare key registered under more
//! than one domain is ambiguous and must be fully qualified.

use std::collections::BTreeMap;

use tabula_core::{validate_alias_key, TableName};
use tracing::trace;

use crate::error::ResolveError;
use crate::resolver::NameResolver;

#[derive(Debug, Clone, Default)]
pub struct NamespaceResolver {
    domains: BTreeMap<String, BTreeMap<String, TableName>>,
}

impl NamespaceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entries` (key to canonical name) under `domain`.
    ///
    /// Keys must be plain identifiers and targets canonical table names.
    pub fn with_namespace<I, K, V>(
        mut self,
        domain: impl Into<String>,
        entries: I,
    ) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let table = self.domains.entry(domain.into()).or_default();
        for (key, target) in entries {
            let key = key.into();
            validate_alias_key(&key)?;
            table.insert(key, TableName::parse(target.as_ref())?);
        }
        Ok(self)
    }

    /// Build from a `domain -> key -> name` map, as read from config.
    pub fn from_namespaces(
        namespaces: &BTreeMap<String, BTreeMap<String, String>>,
    ) -> Result<Self, ResolveError> {
        namespaces
            .iter()
            .try_fold(Self::new(), |resolver, (domain, entries)| {
                resolver.with_namespace(domain.clone(), entries.iter().map(|(k, v)| (k.clone(), v)))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.domains.values().all(BTreeMap::is_empty)
    }

    fn lookup(&self, alias: &str) -> Result<Option<TableName>, ResolveError> {
        if let Some((key, domain)) = alias.split_once('.') {
            return Ok(self
                .domains
                .get(domain)
                .and_then(|table| table.get(key))
                .cloned());
        }

        let hits: Vec<(&String, &TableName)> = self
            .domains
            .iter()
            .filter_map(|(domain, table)| table.get(alias).map(|name| (domain, name)))
            .collect();
        match hits.as_slice() {
            [] => Ok(None),
            [(_, name)] => Ok(Some((*name).clone())),
            many => Err(ResolveError::Ambiguous {
                key: alias.to_string(),
                domains: many
                    .iter()
                    .map(|(d, _)| d.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

impl NameResolver for NamespaceResolver {
    async fn resolve_alias(&self, alias: &str) -> Result<Option<TableName>, ResolveError> {
        let found = self.lookup(alias);
        trace!(alias, found = ?found.as_ref().ok().and_then(Option::as_ref), "namespace lookup");
        found
    }
}
