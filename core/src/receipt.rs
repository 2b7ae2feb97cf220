//! Transaction receipts for mutating statements.

use serde::{Deserialize, Serialize};

use crate::TableName;

/// Acknowledgment that a backend accepted a mutating statement.
///
/// Acceptance is local: the transaction may not be final on-chain yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxnReceipt {
    pub transaction_hash: String,
    pub chain_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

impl TxnReceipt {
    pub fn new(transaction_hash: impl Into<String>, chain_id: u64) -> Self {
        Self {
            transaction_hash: transaction_hash.into(),
            chain_id,
            block_number: None,
        }
    }

    pub fn with_block(mut self, block_number: u64) -> Self {
        self.block_number = Some(block_number);
        self
    }
}

/// Result of a create: the newly assigned name plus its receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTable {
    pub name: TableName,
    #[serde(flatten)]
    pub receipt: TxnReceipt,
}
