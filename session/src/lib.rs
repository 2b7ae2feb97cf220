//! Tabula Session
//!
//! The interactive console's statement lifecycle:
//! - `accumulator`: multi-line input into complete statements
//! - `resolver`: concurrent alias resolution and statement rewriting
//! - `confirm`: the confirmation gate in front of mutating statements
//! - `dispatch`: routing to the chain client
//! - `render`: output shapes for dispatch results
//! - `session`: the loop tying them together

mod accumulator;
mod config;
mod confirm;
mod console;
mod dispatch;
mod error;
mod render;
mod resolver;
mod session;

pub use accumulator::{Accepted, InputAccumulator, PendingStatement};
pub use config::SessionConfig;
pub use confirm::{ConfirmationGate, Decision};
pub use console::{Console, ScriptedConsole};
pub use dispatch::{DispatchResult, Dispatcher};
pub use error::{SessionError, SessionResult};
pub use render::{format_value, help_text, render};
pub use resolver::{AliasMap, AliasResolver, Resolution};
pub use session::{CloseReason, Session, SessionState, SessionSummary};
