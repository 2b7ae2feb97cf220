//! Running the console.

use std::io::IsTerminal;

use anyhow::Result;
use tabula_core::Chain;
use tabula_session::{Session, SessionConfig};
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::console::StdConsole;

/// Run the command selected by `cli`.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command() {
        Command::Chains => {
            print!("{}", chains_table());
            Ok(())
        }
        Command::Shell { statement } => shell(&cli, statement).await,
    }
}

async fn shell(cli: &Cli, statement: Option<String>) -> Result<()> {
    let settings = Settings::from_cli(cli)?;
    let config = SessionConfig::default()
        .with_format(settings.format)
        .with_interactive(std::io::stdin().is_terminal());
    debug!(
        chain = settings.chain.name,
        offline = settings.offline,
        format = %settings.format,
        "starting console"
    );

    let session = Session::new(
        config,
        settings.backend()?,
        settings.resolver()?,
        StdConsole::new()?,
    );
    let summary = session.run(statement, interrupted()).await?;
    debug!(reason = ?summary.reason, dispatched = summary.dispatched, "console finished");
    Ok(())
}

/// Completes on Ctrl-C. If the handler cannot be installed, never completes.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Supported chains, one per line.
pub fn chains_table() -> String {
    let chains = Chain::all();
    let width = chains.iter().map(|c| c.name.len()).max().unwrap_or(0);

    let mut output = String::new();
    output.push_str(&format!("{:<width$} | chain id\n", "name", width = width));
    output.push_str(&format!("{}-+-{}\n", "-".repeat(width), "-".repeat(8)));
    for chain in chains {
        output.push_str(&format!(
            "{:<width$} | {}\n",
            chain.name,
            chain.chain_id,
            width = width
        ));
    }
    output
}
