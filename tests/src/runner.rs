//! Scenario runner.

use std::future::pending;

use tabula_client::{ChainClient, MemoryChain, NamespaceResolver};
use tabula_parser::{classify, StatementKind};
use tabula_session::{ScriptedConsole, Session, SessionConfig, SessionSummary};

use crate::error::{ScenarioError, ScenarioResult};
use crate::scenario::Scenario;

/// Everything a finished scenario session left behind.
#[derive(Debug)]
pub struct Transcript {
    pub summary: SessionSummary,
    pub output: Vec<String>,
    pub errors: Vec<String>,
    pub prompts: Vec<String>,
    /// Handle on the store the session used.
    pub chain: MemoryChain,
}

impl Transcript {
    pub fn output_text(&self) -> String {
        self.output.join("\n")
    }
}

/// Runs a scenario against a seeded in-memory chain.
pub struct Runner<'s> {
    scenario: &'s Scenario,
}

impl<'s> Runner<'s> {
    pub fn new(scenario: &'s Scenario) -> Self {
        Self { scenario }
    }

    pub async fn run(&self) -> ScenarioResult<Transcript> {
        let name = self.scenario.name();

        // 1. Chain with seeds applied
        let chain = MemoryChain::seeded(self.scenario.chain_config());
        for seed in self.scenario.seeds() {
            apply_seed(&chain, seed)
                .await
                .map_err(|message| ScenarioError::setup(name, message))?;
        }

        // 2. Alias tables
        let resolver = self
            .scenario
            .aliases()
            .iter()
            .try_fold(NamespaceResolver::new(), |resolver, entry| {
                resolver.with_namespace(
                    entry.domain.clone(),
                    [(entry.key.clone(), entry.target.as_str())],
                )
            })
            .map_err(|e| ScenarioError::setup(name, e.to_string()))?;

        // 3. Session over a scripted console
        let mut console = ScriptedConsole::new(self.scenario.lines().iter().cloned());
        let config = SessionConfig::default()
            .with_format(self.scenario.output_format())
            .with_interactive(self.scenario.is_interactive());
        let initial = self.scenario.initial_statement().map(str::to_string);

        let summary = Session::new(config, chain.clone(), resolver, &mut console)
            .run(initial, pending())
            .await
            .map_err(|e| ScenarioError::session(name, e))?;

        Ok(Transcript {
            summary,
            output: console.output().to_vec(),
            errors: console.errors().to_vec(),
            prompts: console.prompts().to_vec(),
            chain,
        })
    }
}

async fn apply_seed(chain: &MemoryChain, statement: &str) -> Result<(), String> {
    let classified = classify(statement).map_err(|e| e.to_string())?;
    let applied = match classified.kind() {
        StatementKind::Create => chain.create(statement).await.map(|_| ()),
        StatementKind::Write => chain.write(statement).await.map(|_| ()),
        kind => return Err(format!("cannot seed with a {} statement", kind)),
    };
    applied.map_err(|e| e.to_string())
}
