//! Configuration: optional TOML file, overridden by flags.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tabula_client::{Backend, GatewayClient, MemoryChain, NamespaceResolver};
use tabula_core::{Chain, OutputFormat};

use crate::cli::Cli;

/// Contents of a config file.
///
/// ```toml
/// chain = "local-tableland"
/// format = "pretty"
///
/// [namespaces."bar.eth"]
/// foo = "healthbot_31337_1"
/// ```
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub chain: Option<String>,
    pub base_url: Option<String>,
    pub format: Option<OutputFormat>,
    pub namespaces: BTreeMap<String, BTreeMap<String, String>>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub chain: Chain,
    pub base_url: Option<String>,
    pub format: OutputFormat,
    pub offline: bool,
    pub namespaces: BTreeMap<String, BTreeMap<String, String>>,
}

impl Settings {
    /// Load the config file named by `cli` (if any) and apply flag overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Flags win over file values.
    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self> {
        let chain = match cli.chain.as_deref().or(file.chain.as_deref()) {
            Some(name) => Chain::by_name(name)?,
            None => Chain::default(),
        };
        Ok(Self {
            chain,
            base_url: cli.base_url.clone().or(file.base_url),
            format: cli.format.or(file.format).unwrap_or_default(),
            offline: cli.offline,
            namespaces: file.namespaces,
        })
    }

    /// The chain client these settings select.
    pub fn backend(&self) -> Result<Backend> {
        if self.offline {
            return Ok(Backend::Memory(MemoryChain::seeded(self.chain)));
        }
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| GatewayClient::default_base_url(&self.chain).to_string());
        let client = GatewayClient::new(base_url, self.chain)?;
        Ok(Backend::Gateway(client))
    }

    pub fn resolver(&self) -> Result<NamespaceResolver> {
        NamespaceResolver::from_namespaces(&self.namespaces).context("Invalid namespace table")
    }
}
