//! Confirmation gate for mutating statements.

use std::io;

use tabula_core::messages::{CHOICE_CONFIRM, CHOICE_DENY};
use tabula_parser::StatementKind;
use tracing::debug;

use crate::console::Console;

const RETRY_HINT: &str = "Please answer confirm (y) or deny (n).";

/// The user's answer for one statement block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirm,
    Deny,
}

impl Decision {
    /// Parse an answer, ignoring case and surrounding whitespace.
    pub fn parse(answer: &str) -> Option<Decision> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "confirm" | "c" | "y" | "yes" => Some(Decision::Confirm),
            "deny" | "d" | "n" | "no" => Some(Decision::Deny),
            _ => None,
        }
    }
}

/// Asks once per statement block, whatever the number of segments inside it.
#[derive(Debug, Clone)]
pub struct ConfirmationGate {
    prompt: String,
}

impl ConfirmationGate {
    /// `interactive` controls whether the choices are displayed.
    pub fn new(interactive: bool) -> Self {
        let prompt = if interactive {
            format!("  y) {}\n  n) {}\n? ", CHOICE_CONFIRM, CHOICE_DENY)
        } else {
            String::new()
        };
        Self { prompt }
    }

    /// Whether `kind` has to pass the gate. Reads and meta-commands skip it.
    pub fn required(kind: StatementKind) -> bool {
        kind.is_mutating()
    }

    /// Ask until a recognizable answer arrives.
    ///
    /// Returns `Ok(None)` if input closes before an answer.
    pub async fn ask<C: Console>(&self, console: &mut C) -> io::Result<Option<Decision>> {
        loop {
            let Some(answer) = console.read_line(&self.prompt).await? else {
                debug!("input closed while awaiting confirmation");
                return Ok(None);
            };
            match Decision::parse(&answer) {
                Some(decision) => {
                    debug!(?decision, "confirmation answered");
                    return Ok(Some(decision));
                }
                None => console.error(RETRY_HINT)?,
            }
        }
    }
}
