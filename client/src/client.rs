//! Chain client capability.
//!
//! The console only ever talks to the table service through this trait.
//! Transport, signing and wallet handling live behind it.

use std::future::Future;

use tabula_core::{Chain, CreatedTable, RowSet, TxnReceipt};

use crate::error::ChainResult;

/// Backend operations consumed by the console.
pub trait ChainClient {
    /// Chain this client is connected to.
    fn chain(&self) -> Chain;

    /// Run a read-only query.
    fn read(&self, statement: &str) -> impl Future<Output = ChainResult<RowSet>> + Send;

    /// Submit a mutating statement. Resolves once the backend accepted it,
    /// which is not necessarily on-chain finality.
    fn write(&self, statement: &str) -> impl Future<Output = ChainResult<TxnReceipt>> + Send;

    /// Submit a create statement. Resolves with the assigned canonical name.
    fn create(&self, statement: &str) -> impl Future<Output = ChainResult<CreatedTable>> + Send;

    /// Release the connection. Consuming `self` makes a second release impossible.
    fn close(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized;
}
