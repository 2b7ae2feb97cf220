//! Tabula console library.
//!
//! - `cli`: command-line flags
//! - `config`: config file loading and flag overrides
//! - `console`: stdin/stdout console
//! - `app`: wiring a session together and running it

mod app;
mod cli;
mod config;
mod console;

pub use app::{chains_table, run};
pub use cli::{Cli, Command};
pub use config::{FileConfig, Settings};
pub use console::StdConsole;
