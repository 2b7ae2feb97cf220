//! Console input and output.

use std::collections::VecDeque;
use std::future::Future;
use std::io;

/// Line-oriented terminal the session talks to.
///
/// Prompts are handed to `read_line` and never mixed into `print` output.
pub trait Console: Send {
    /// Show `prompt` (when non-empty) and wait for the next line.
    /// `Ok(None)` means the input stream is closed.
    fn read_line(
        &mut self,
        prompt: &str,
    ) -> impl Future<Output = io::Result<Option<String>>> + Send;

    /// Write a result line.
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Write an error or status line.
    fn error(&mut self, text: &str) -> io::Result<()>;
}

impl<T: Console + ?Sized> Console for &mut T {
    fn read_line(
        &mut self,
        prompt: &str,
    ) -> impl Future<Output = io::Result<Option<String>>> + Send {
        (**self).read_line(prompt)
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        (**self).print(text)
    }

    fn error(&mut self, text: &str) -> io::Result<()> {
        (**self).error(text)
    }
}

/// Console fed from a fixed list of lines, recording everything written.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
    errors: Vec<String>,
    stall: bool,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Once the script runs out, wait forever instead of reporting end of input.
    pub fn stall_when_drained(mut self) -> Self {
        self.stall = true;
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Non-empty prompts shown, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Result lines, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Error and status lines, in order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !prompt.is_empty() {
            self.prompts.push(prompt.to_string());
        }
        match self.input.pop_front() {
            Some(line) => Ok(Some(line)),
            None if self.stall => std::future::pending().await,
            None => Ok(None),
        }
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.extend(text.lines().map(str::to_string));
        Ok(())
    }

    fn error(&mut self, text: &str) -> io::Result<()> {
        self.errors.extend(text.lines().map(str::to_string));
        Ok(())
    }
}
