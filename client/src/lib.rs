//! Tabula Client
//!
//! Capabilities the console consumes, and their implementations:
//! - `ChainClient`: read / write / create against the table service
//! - `NameResolver`: alias to canonical table name lookups
//! - `MemoryChain`: in-process table store (offline mode and tests)
//! - `GatewayClient`: read-only HTTP gateway client
//! - `NamespaceResolver`: alias tables grouped by domain

mod backend;
mod client;
mod error;
mod gateway;
mod memory;
mod namespace;
mod resolver;

pub use backend::Backend;
pub use client::ChainClient;
pub use error::{ChainError, ChainResult, ResolveError};
pub use gateway::GatewayClient;
pub use memory::MemoryChain;
pub use namespace::NamespaceResolver;
pub use resolver::NameResolver;
