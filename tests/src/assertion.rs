//! Assertion builders for verifying scenario transcripts.

use tabula_session::CloseReason;

use crate::error::{ScenarioError, ScenarioResult};
use crate::runner::Transcript;

/// Expectations on a finished scenario.
#[derive(Debug, Default)]
pub struct Assertion {
    // Console output
    pub output: Option<Vec<String>>,
    pub contains: Vec<String>,
    pub matches: Vec<String>,

    // Errors
    pub no_errors: bool,
    pub errors: Vec<String>,

    // Session
    pub dispatched: Option<usize>,
    pub closed: Option<CloseReason>,
    pub history: Option<Vec<String>>,

    // Chain state
    pub close_count: Option<usize>,
    pub tables: Vec<String>,
    pub missing_tables: Vec<String>,
    pub table_rows: Vec<(String, usize)>,
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output lines must be exactly `lines`.
    pub fn output<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Some output line contains `text`.
    pub fn contains(mut self, text: impl Into<String>) -> Self {
        self.contains.push(text.into());
        self
    }

    /// Some output line matches the regex `pattern`.
    pub fn matches(mut self, pattern: impl Into<String>) -> Self {
        self.matches.push(pattern.into());
        self
    }

    pub fn no_errors(mut self) -> Self {
        self.no_errors = true;
        self
    }

    /// Some error line contains `text`.
    pub fn error(mut self, text: impl Into<String>) -> Self {
        self.errors.push(text.into());
        self
    }

    pub fn dispatched(mut self, count: usize) -> Self {
        self.dispatched = Some(count);
        self
    }

    pub fn closed(mut self, reason: CloseReason) -> Self {
        self.closed = Some(reason);
        self
    }

    pub fn history<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history = Some(entries.into_iter().map(Into::into).collect());
        self
    }

    /// The chain connection was released exactly once.
    pub fn released_once(mut self) -> Self {
        self.close_count = Some(1);
        self
    }

    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.tables.push(name.into());
        self
    }

    pub fn no_table(mut self, name: impl Into<String>) -> Self {
        self.missing_tables.push(name.into());
        self
    }

    pub fn table_rows(mut self, name: impl Into<String>, rows: usize) -> Self {
        self.table_rows.push((name.into(), rows));
        self
    }

    /// Check every expectation against `transcript`.
    pub fn verify(&self, scenario: &str, transcript: &Transcript) -> ScenarioResult<()> {
        let fail = |message: String| Err(ScenarioError::assertion_failed(scenario, message));

        if let Some(ref expected) = self.output {
            if &transcript.output != expected {
                return fail(format!(
                    "expected output {:?}, got {:?}",
                    expected, transcript.output
                ));
            }
        }

        for text in &self.contains {
            if !transcript.output.iter().any(|line| line.contains(text.as_str())) {
                return fail(format!(
                    "expected output containing '{}', got {:?}",
                    text, transcript.output
                ));
            }
        }

        for pattern in &self.matches {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(scenario, format!("invalid regex pattern: {}", e))
            })?;
            if !transcript.output.iter().any(|line| re.is_match(line)) {
                return fail(format!(
                    "expected output matching /{}/, got {:?}",
                    pattern, transcript.output
                ));
            }
        }

        if self.no_errors && !transcript.errors.is_empty() {
            return fail(format!("expected no errors, got {:?}", transcript.errors));
        }

        for text in &self.errors {
            if !transcript.errors.iter().any(|line| line.contains(text.as_str())) {
                return fail(format!(
                    "expected error containing '{}', got {:?}",
                    text, transcript.errors
                ));
            }
        }

        if let Some(expected) = self.dispatched {
            if transcript.summary.dispatched != expected {
                return fail(format!(
                    "expected {} dispatched statements, got {}",
                    expected, transcript.summary.dispatched
                ));
            }
        }

        if let Some(expected) = self.closed {
            if transcript.summary.reason != expected {
                return fail(format!(
                    "expected session to close with {:?}, got {:?}",
                    expected, transcript.summary.reason
                ));
            }
        }

        if let Some(ref expected) = self.history {
            if &transcript.summary.history != expected {
                return fail(format!(
                    "expected history {:?}, got {:?}",
                    expected, transcript.summary.history
                ));
            }
        }

        if let Some(expected) = self.close_count {
            let actual = transcript.chain.close_count();
            if actual != expected {
                return fail(format!(
                    "expected connection released {} time(s), got {}",
                    expected, actual
                ));
            }
        }

        let names = transcript.chain.table_names();
        for table in &self.tables {
            if !names.contains(table) {
                return fail(format!("expected table '{}', have {:?}", table, names));
            }
        }
        for table in &self.missing_tables {
            if names.contains(table) {
                return fail(format!("expected no table '{}'", table));
            }
        }

        for (table, expected) in &self.table_rows {
            let actual = transcript.chain.snapshot(table).map(|rows| rows.row_count());
            if actual != Some(*expected) {
                return fail(format!(
                    "expected {} row(s) in '{}', got {:?}",
                    expected, table, actual
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_client::MemoryChain;
    use tabula_core::Chain;
    use tabula_session::SessionSummary;

    fn transcript(output: &[&str]) -> Transcript {
        Transcript {
            summary: SessionSummary {
                reason: CloseReason::EndOfInput,
                dispatched: 1,
                history: vec!["select 1;".to_string()],
            },
            output: output.iter().map(|s| s.to_string()).collect(),
            errors: Vec::new(),
            prompts: Vec::new(),
            chain: MemoryChain::seeded(Chain::default()),
        }
    }

    #[test]
    fn passing_assertions() {
        let t = transcript(&["Created table t_31337_2"]);
        Assertion::new()
            .contains("Created table")
            .matches(r"^Created table t_31337_\d+$")
            .no_errors()
            .dispatched(1)
            .closed(CloseReason::EndOfInput)
            .table("healthbot_31337_1")
            .table_rows("healthbot_31337_1", 1)
            .verify("ok", &t)
            .unwrap();
    }

    #[test]
    fn reports_mismatch() {
        let t = transcript(&["Aborting."]);
        let err = Assertion::new()
            .output(["something else"])
            .verify("mismatch", &t)
            .unwrap_err();
        assert!(err.to_string().starts_with("scenario 'mismatch' failed: expected output"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let t = transcript(&[]);
        let err = Assertion::new().matches("(").verify("bad", &t).unwrap_err();
        assert!(err.to_string().contains("invalid regex pattern"));
    }
}
