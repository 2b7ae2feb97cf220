//! Tabula - interactive console for chain-backed tables.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tabula_repl::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Results go to stdout; logs stay on stderr.
    let default_filter = if cli.verbose { "tabula=debug" } else { "tabula=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tabula_repl::run(cli).await
}
