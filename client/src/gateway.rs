//! Read-only HTTP gateway client.
//!
//! Reads go to the gateway's query endpoint. Writes and creates need a
//! signer, which this client does not carry.

use std::time::Duration;

use serde::Deserialize;
use tabula_core::{Chain, CreatedTable, RowSet, TxnReceipt};
use tracing::debug;

use crate::client::ChainClient;
use crate::error::{ChainError, ChainResult};

const MAINNET_GATEWAY: &str = "https://tableland.network";
const TESTNET_GATEWAY: &str = "https://testnets.tableland.network";
const LOCAL_GATEWAY: &str = "http://localhost:8080";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body returned by the gateway on non-success statuses.
#[derive(Debug, Deserialize)]
struct GatewayMessage {
    message: String,
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    chain: Chain,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, chain: Chain) -> ChainResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ChainError::ConnectionFailed(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            chain,
        })
    }

    /// Gateway serving `chain` when no base URL is configured.
    pub fn default_base_url(chain: &Chain) -> &'static str {
        match chain.name {
            "local-tableland" => LOCAL_GATEWAY,
            name if name.contains("sepolia") || name.contains("amoy") => TESTNET_GATEWAY,
            _ => MAINNET_GATEWAY,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn query_url(&self) -> String {
        format!("{}/api/v1/query", self.base_url)
    }
}

impl ChainClient for GatewayClient {
    fn chain(&self) -> Chain {
        self.chain
    }

    async fn read(&self, statement: &str) -> ChainResult<RowSet> {
        debug!(url = %self.query_url(), "querying gateway");
        let response = self
            .http
            .get(self.query_url())
            .query(&[("statement", statement), ("format", "table")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GatewayMessage>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| format!("{} {}", status, body.trim()));
            return Err(ChainError::QueryFailed(message));
        }

        response
            .json::<RowSet>()
            .await
            .map_err(|e| ChainError::DecodingError(e.to_string()))
    }

    async fn write(&self, _statement: &str) -> ChainResult<TxnReceipt> {
        Err(ChainError::SignerRequired)
    }

    async fn create(&self, _statement: &str) -> ChainResult<CreatedTable> {
        Err(ChainError::SignerRequired)
    }

    async fn close(self) {
        debug!(base_url = %self.base_url, "gateway client closed");
    }
}
