//! Routing statements to the chain client.

use tabula_client::ChainClient;
use tabula_core::{Chain, CreatedTable, RowSet, TxnReceipt};
use tabula_parser::StatementKind;
use tracing::{debug, info};

use crate::error::{SessionError, SessionResult};

/// What a successful dispatch produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    /// Rows from a read.
    Rows(RowSet),
    /// Acceptance receipt for a write.
    Written(TxnReceipt),
    /// Assigned name and receipt for a create.
    Created(CreatedTable),
}

/// Owns the chain client for the session's lifetime.
#[derive(Debug)]
pub struct Dispatcher<C> {
    client: C,
}

impl<C: ChainClient + Sync> Dispatcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn chain(&self) -> Chain {
        self.client.chain()
    }

    /// Send `text` to the backend operation matching `kind`.
    ///
    /// Writes return once the backend has accepted the transaction.
    pub async fn dispatch(&self, kind: StatementKind, text: &str) -> SessionResult<DispatchResult> {
        debug!(%kind, "dispatching");
        let result = match kind {
            StatementKind::Read => DispatchResult::Rows(self.client.read(text).await?),
            StatementKind::Write => DispatchResult::Written(self.client.write(text).await?),
            StatementKind::Create => DispatchResult::Created(self.client.create(text).await?),
            StatementKind::Meta(_) => return Err(SessionError::not_dispatchable(kind.name())),
        };
        match &result {
            DispatchResult::Rows(rows) => debug!(rows = rows.row_count(), "read complete"),
            DispatchResult::Written(receipt) => {
                info!(hash = %receipt.transaction_hash, "write accepted")
            }
            DispatchResult::Created(created) => {
                info!(
                    table = %created.name,
                    hash = %created.receipt.transaction_hash,
                    "table created"
                )
            }
        }
        Ok(result)
    }

    /// Release the client. Consumes the dispatcher, so this happens once.
    pub async fn close(self) {
        debug!("releasing chain client");
        self.client.close().await;
    }
}
