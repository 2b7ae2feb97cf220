//! Supported chains.

use crate::{CoreError, CoreResult};

/// A chain the table service is deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    /// CLI-facing chain name.
    pub name: &'static str,
    /// EVM chain id.
    pub chain_id: u64,
    /// Block explorer base URL, if any.
    pub explorer: Option<&'static str>,
}

const CHAINS: &[Chain] = &[
    Chain {
        name: "ethereum",
        chain_id: 1,
        explorer: Some("https://etherscan.io"),
    },
    Chain {
        name: "optimism",
        chain_id: 10,
        explorer: Some("https://optimistic.etherscan.io"),
    },
    Chain {
        name: "arbitrum",
        chain_id: 42161,
        explorer: Some("https://arbiscan.io"),
    },
    Chain {
        name: "arbitrum-nova",
        chain_id: 42170,
        explorer: Some("https://nova.arbiscan.io"),
    },
    Chain {
        name: "polygon",
        chain_id: 137,
        explorer: Some("https://polygonscan.com"),
    },
    Chain {
        name: "filecoin",
        chain_id: 314,
        explorer: Some("https://filfox.info/en"),
    },
    Chain {
        name: "sepolia",
        chain_id: 11155111,
        explorer: Some("https://sepolia.etherscan.io"),
    },
    Chain {
        name: "optimism-sepolia",
        chain_id: 11155420,
        explorer: Some("https://sepolia-optimism.etherscan.io"),
    },
    Chain {
        name: "arbitrum-sepolia",
        chain_id: 421614,
        explorer: Some("https://sepolia.arbiscan.io"),
    },
    Chain {
        name: "polygon-amoy",
        chain_id: 80002,
        explorer: Some("https://amoy.polygonscan.com"),
    },
    Chain {
        name: "local-tableland",
        chain_id: 31337,
        explorer: None,
    },
];

impl Chain {
    /// All supported chains, in display order.
    pub fn all() -> &'static [Chain] {
        CHAINS
    }

    /// Look up a chain by name.
    pub fn by_name(name: &str) -> CoreResult<Chain> {
        CHAINS
            .iter()
            .find(|c| c.name == name)
            .copied()
            .ok_or_else(|| CoreError::unsupported_chain(name))
    }

    /// Look up a chain by id.
    pub fn by_id(chain_id: u64) -> Option<Chain> {
        CHAINS.iter().find(|c| c.chain_id == chain_id).copied()
    }

    /// Explorer link for a transaction hash. Empty when unavailable.
    pub fn tx_link(&self, hash: &str) -> String {
        match self.explorer {
            Some(base) if !hash.is_empty() => format!("{}/tx/{}", base, hash),
            _ => String::new(),
        }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Chain { name: "local-tableland", chain_id: 31337, explorer: None }
    }
}
