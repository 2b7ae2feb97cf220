//! Tabula Core Types
//!
//! This crate provides the foundational types shared by every Tabula component:
//! - Canonical table names (`{prefix}_{chainId}_{tableId}`)
//! - Cell values and row sets returned by reads
//! - Transaction receipts returned by writes and creates
//! - Supported chains and output formats
//! - Common error types and user-facing messages

mod chain;
mod error;
mod format;
pub mod messages;
mod name;
mod receipt;
mod rows;
mod value;

pub use chain::*;
pub use error::*;
pub use format::*;
pub use name::*;
pub use receipt::*;
pub use rows::*;
pub use value::*;
