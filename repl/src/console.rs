//! Terminal console over stdin/stdout.
//!
//! Lines are read on a dedicated thread and handed over a channel. A read
//! left pending by an interrupt is never awaited by the runtime, so the
//! process can exit without another line arriving.

use std::io::{self, BufRead, BufReader, Write};
use std::thread;

use tabula_session::Console;
use tokio::sync::mpsc;

/// Reads lines from stdin; results to stdout, errors to stderr.
pub struct StdConsole {
    lines: mpsc::Receiver<io::Result<String>>,
}

impl StdConsole {
    pub fn new() -> io::Result<Self> {
        Self::from_reader(BufReader::new(io::stdin()))
    }

    /// Console whose input comes from `reader`.
    pub fn from_reader<R>(reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        thread::Builder::new()
            .name("tabula-stdin".to_string())
            .spawn(move || {
                for line in reader.lines() {
                    let failed = line.is_err();
                    if tx.blocking_send(line).is_err() || failed {
                        break;
                    }
                }
            })?;
        Ok(Self { lines: rx })
    }
}

impl Console for StdConsole {
    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !prompt.is_empty() {
            let mut stdout = io::stdout();
            write!(stdout, "{}", prompt)?;
            stdout.flush()?;
        }
        self.lines.recv().await.transpose()
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(io::stdout(), "{}", text)
    }

    fn error(&mut self, text: &str) -> io::Result<()> {
        writeln!(io::stderr(), "{}", text)
    }
}
