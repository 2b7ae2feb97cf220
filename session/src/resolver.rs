//! Alias resolution.
//!
//! Every statement gets a fresh pass: aliases can be repointed between
//! statements, so nothing is cached.

use std::collections::HashMap;

use futures::future::join_all;
use tabula_client::NameResolver;
use tabula_parser::ClassifiedStatement;
use tracing::{debug, warn};

/// Aliases resolved for one statement, and the ones that were not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    resolved: HashMap<String, String>,
    failures: Vec<String>,
}

impl AliasMap {
    /// Canonical name an alias resolved to.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.resolved.get(alias).map(String::as_str)
    }

    /// Aliases left as written, in first-seen order.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// A statement after alias substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Text with every resolved alias substituted in place.
    pub text: String,
    pub aliases: AliasMap,
}

/// Rewrites statements through a `NameResolver`.
#[derive(Debug, Clone)]
pub struct AliasResolver<R> {
    resolver: R,
}

impl<R: NameResolver + Sync> AliasResolver<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn inner(&self) -> &R {
        &self.resolver
    }

    /// Look up every alias candidate of `statement` concurrently, then rewrite.
    ///
    /// Unresolved aliases stay as written; the backend rejects them later
    /// if they are not legal table names.
    pub async fn resolve(&self, statement: &ClassifiedStatement) -> Resolution {
        let candidates = statement.alias_candidates();
        if candidates.is_empty() {
            return Resolution {
                text: statement.text().to_string(),
                aliases: AliasMap::default(),
            };
        }

        let lookups = candidates.iter().map(|alias| async move {
            let outcome = self.resolver.resolve_alias(alias).await;
            (*alias, outcome)
        });

        let mut aliases = AliasMap::default();
        for (alias, outcome) in join_all(lookups).await {
            match outcome {
                Ok(Some(name)) => {
                    debug!(alias, table = %name, "alias resolved");
                    aliases.resolved.insert(alias.to_string(), name.to_string());
                }
                Ok(None) => {
                    debug!(alias, "alias not found");
                    aliases.failures.push(alias.to_string());
                }
                Err(e) => {
                    warn!(alias, error = %e, "alias lookup failed");
                    aliases.failures.push(alias.to_string());
                }
            }
        }

        Resolution {
            text: statement.rewrite(&aliases.resolved),
            aliases,
        }
    }
}
