//! Scenario definitions.

use tabula_core::{Chain, OutputFormat};

use crate::assertion::Assertion;
use crate::error::ScenarioResult;
use crate::runner::{Runner, Transcript};

/// An alias registered for a scenario: `key` under `domain`, pointing at `target`.
#[derive(Debug, Clone)]
pub(crate) struct AliasEntry {
    pub domain: String,
    pub key: String,
    pub target: String,
}

/// A console scenario: input, environment and expectations.
#[derive(Debug)]
pub struct Scenario {
    name: String,
    chain: Chain,
    format: OutputFormat,
    interactive: bool,
    initial: Option<String>,
    lines: Vec<String>,
    aliases: Vec<AliasEntry>,
    seeds: Vec<String>,
    assertion: Assertion,
}

impl Scenario {
    /// A batch-mode scenario on the local chain with objects output.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chain: Chain::default(),
            format: OutputFormat::Objects,
            interactive: false,
            initial: None,
            lines: Vec::new(),
            aliases: Vec::new(),
            seeds: Vec::new(),
            assertion: Assertion::new(),
        }
    }

    pub fn chain(mut self, chain: Chain) -> Self {
        self.chain = chain;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Run with prompts and banner, as if attached to a terminal.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Statement handed to the session before the first prompt.
    pub fn initial(mut self, statement: impl Into<String>) -> Self {
        self.initial = Some(statement.into());
        self
    }

    /// One console input line.
    pub fn input(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn inputs<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Register `key.domain` as an alias for `target`.
    pub fn alias(
        mut self,
        domain: impl Into<String>,
        key: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.aliases.push(AliasEntry {
            domain: domain.into(),
            key: key.into(),
            target: target.into(),
        });
        self
    }

    /// A create or write statement applied to the chain before the session starts.
    pub fn seed(mut self, statement: impl Into<String>) -> Self {
        self.seeds.push(statement.into());
        self
    }

    pub fn expect<F>(mut self, build: F) -> Self
    where
        F: FnOnce(Assertion) -> Assertion,
    {
        self.assertion = build(self.assertion);
        self
    }

    /// Run and check expectations, returning the transcript.
    pub async fn run(&self) -> ScenarioResult<Transcript> {
        let transcript = Runner::new(self).run().await?;
        self.assertion.verify(&self.name, &transcript)?;
        Ok(transcript)
    }

    // ==================== Accessors ====================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chain_config(&self) -> Chain {
        self.chain
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn initial_statement(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn aliases(&self) -> &[AliasEntry] {
        &self.aliases
    }

    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_setup() {
        let scenario = Scenario::new("builder")
            .interactive()
            .input("select 1;")
            .inputs(["a", "b"])
            .alias("bar.eth", "foo", "healthbot_31337_1")
            .seed("create table t (id int);");

        assert_eq!(scenario.name(), "builder");
        assert!(scenario.is_interactive());
        assert_eq!(scenario.lines(), ["select 1;", "a", "b"]);
        assert_eq!(scenario.aliases().len(), 1);
        assert_eq!(scenario.seeds().len(), 1);
    }
}
