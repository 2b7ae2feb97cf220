//! Scenario test framework for the Tabula console.
//!
//! A `Scenario` describes console input, alias tables and seeded tables,
//! plus what the transcript must show. The `Runner` drives a real session
//! over a scripted console and an in-memory chain.

mod assertion;
mod error;
mod runner;
mod scenario;

pub use assertion::Assertion;
pub use error::{ScenarioError, ScenarioResult};
pub use runner::{Runner, Transcript};
pub use scenario::Scenario;

pub mod prelude {
    pub use crate::{Assertion, Runner, Scenario, ScenarioError, ScenarioResult, Transcript};
    pub use tabula_core::{Chain, OutputFormat};
    pub use tabula_session::CloseReason;
}
