//! Command-line flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tabula_core::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "tabula", version)]
#[command(about = "Interactive SQL console for chain-backed tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Chain to connect to (see `tabula chains`)
    #[arg(long, global = true, env = "TABULA_CHAIN")]
    pub chain: Option<String>,

    /// Gateway base URL, overriding the chain's default
    #[arg(long, global = true, env = "TABULA_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true, env = "TABULA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: raw, objects or pretty
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Use an in-memory table store instead of the network
    #[arg(long, global = true)]
    pub offline: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start the console, optionally running one statement first
    Shell {
        /// Statement to run before the first prompt
        statement: Option<String>,
    },

    /// List supported chains
    Chains,
}

impl Cli {
    /// The subcommand to run; a bare `tabula` opens the console.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Shell { statement: None })
    }
}
