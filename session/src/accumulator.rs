//! Multi-line input accumulation.

use tabula_parser::is_meta_command;

/// Text gathered for one statement cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingStatement {
    text: String,
    terminated: bool,
}

impl PendingStatement {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True once a `;` terminator or meta-command prefix has been seen.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }

    fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
        let trimmed = self.text.trim();
        self.terminated = trimmed.ends_with(';') || is_meta_command(trimmed);
    }
}

/// Outcome of feeding one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accepted {
    /// More input is needed.
    Continue,
    /// The buffer holds a complete statement.
    Complete(PendingStatement),
}

/// Turns input lines into complete statement buffers.
#[derive(Debug, Default)]
pub struct InputAccumulator {
    pending: PendingStatement,
}

impl InputAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while no statement text has been gathered.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Feed one line (without its line terminator).
    pub fn accept(&mut self, line: &str) -> Accepted {
        if line.trim().is_empty() {
            if !self.pending.is_empty() {
                self.pending.push_line(line);
            }
            return Accepted::Continue;
        }

        self.pending.push_line(line);
        if self.pending.is_terminated() {
            Accepted::Complete(std::mem::take(&mut self.pending))
        } else {
            Accepted::Continue
        }
    }

    /// End of input: hand back any partial statement.
    pub fn finish(&mut self) -> Option<PendingStatement> {
        let pending = std::mem::take(&mut self.pending);
        (!pending.is_empty()).then_some(pending)
    }

    /// Drop any partial statement.
    pub fn discard(&mut self) {
        self.pending = PendingStatement::default();
    }
}
