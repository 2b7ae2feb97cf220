//! Canonical table names.
//!
//! Every table in the shared namespace is named `{prefix}_{chainId}_{tableId}`.
//! Any other token appearing where a table is expected is an alias candidate.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

const CANONICAL_PATTERN: &str = r"^([A-Za-z_][A-Za-z0-9_]*)_([0-9]+)_([0-9]+)$";
const ALIAS_KEY_PATTERN: &str = r"^[A-Za-z0-9_]+$";

fn canonical_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CANONICAL_PATTERN).expect("canonical pattern compiles"))
}

fn alias_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ALIAS_KEY_PATTERN).expect("alias key pattern compiles"))
}

/// A canonical table identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName {
    prefix: String,
    chain_id: u64,
    table_id: u64,
}

impl TableName {
    /// Build a name from its parts. The prefix is validated like any parsed name.
    pub fn new(prefix: impl Into<String>, chain_id: u64, table_id: u64) -> CoreResult<Self> {
        let prefix = prefix.into();
        let name = Self {
            prefix,
            chain_id,
            table_id,
        };
        // Round-trip through the pattern so a bad prefix is rejected here.
        Self::parse(&name.to_string())
    }

    /// Parse canonical text.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let caps = canonical_regex()
            .captures(text)
            .ok_or_else(|| CoreError::invalid_table_name(text))?;

        let chain_id = caps[2]
            .parse()
            .map_err(|_| CoreError::invalid_table_name(text))?;
        let table_id = caps[3]
            .parse()
            .map_err(|_| CoreError::invalid_table_name(text))?;

        Ok(Self {
            prefix: caps[1].to_string(),
            chain_id,
            table_id,
        })
    }

    /// Returns true if `text` has the canonical shape.
    pub fn is_canonical(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn table_id(&self) -> u64 {
        self.table_id
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.prefix, self.chain_id, self.table_id)
    }
}

impl FromStr for TableName {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TableName {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::parse(&value)
    }
}

impl From<TableName> for String {
    fn from(name: TableName) -> Self {
        name.to_string()
    }
}

/// Validate an alias key (the part of an alias registered inside a namespace).
pub fn validate_alias_key(key: &str) -> CoreResult<()> {
    if alias_key_regex().is_match(key) {
        Ok(())
    } else {
        Err(CoreError::invalid_alias_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        let name = TableName::parse("healthbot_31337_1").unwrap();
        assert_eq!(name.prefix(), "healthbot");
        assert_eq!(name.chain_id(), 31337);
        assert_eq!(name.table_id(), 1);
        assert_eq!(name.to_string(), "healthbot_31337_1");
    }

    #[test]
    fn prefix_may_contain_underscores_and_digits() {
        let name = TableName::parse("my_table_2_5_42").unwrap();
        assert_eq!(name.prefix(), "my_table_2");
        assert_eq!(name.chain_id(), 5);
        assert_eq!(name.table_id(), 42);
    }

    #[test]
    fn rejects_non_canonical_text() {
        for text in ["healthbot", "foo.bar.eth", "t_1", "1abc_1_2", "t_x_1", "_1_2", ""] {
            assert!(!TableName::is_canonical(text), "{text} should not be canonical");
        }
    }

    #[test]
    fn rejects_overflowing_ids() {
        let err = TableName::parse("t_99999999999999999999999_1").unwrap_err();
        assert!(matches!(err, CoreError::InvalidTableName { .. }));
    }

    #[test]
    fn new_validates_prefix() {
        assert!(TableName::new("t", 31337, 2).is_ok());
        assert!(TableName::new("bad-prefix", 31337, 2).is_err());
    }

    #[test]
    fn serde_uses_canonical_text() {
        let name = TableName::parse("t_31337_2").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"t_31337_2\"");
        let back: TableName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
        assert!(serde_json::from_str::<TableName>("\"nope\"").is_err());
    }

    #[test]
    fn validates_alias_keys() {
        assert!(validate_alias_key("healthbot_2").is_ok());
        assert!(validate_alias_key("bad key").is_err());
        assert!(validate_alias_key("").is_err());
    }
}
