//! Backend selection.

use tabula_core::{Chain, CreatedTable, RowSet, TxnReceipt};

use crate::client::ChainClient;
use crate::error::ChainResult;
use crate::gateway::GatewayClient;
use crate::memory::MemoryChain;

/// The chain client picked at startup.
#[derive(Debug, Clone)]
pub enum Backend {
    Memory(MemoryChain),
    Gateway(GatewayClient),
}

impl ChainClient for Backend {
    fn chain(&self) -> Chain {
        match self {
            Backend::Memory(c) => c.chain(),
            Backend::Gateway(c) => c.chain(),
        }
    }

    async fn read(&self, statement: &str) -> ChainResult<RowSet> {
        match self {
            Backend::Memory(c) => c.read(statement).await,
            Backend::Gateway(c) => c.read(statement).await,
        }
    }

    async fn write(&self, statement: &str) -> ChainResult<TxnReceipt> {
        match self {
            Backend::Memory(c) => c.write(statement).await,
            Backend::Gateway(c) => c.write(statement).await,
        }
    }

    async fn create(&self, statement: &str) -> ChainResult<CreatedTable> {
        match self {
            Backend::Memory(c) => c.create(statement).await,
            Backend::Gateway(c) => c.create(statement).await,
        }
    }

    async fn close(self) {
        match self {
            Backend::Memory(c) => c.close().await,
            Backend::Gateway(c) => c.close().await,
        }
    }
}
