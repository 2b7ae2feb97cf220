//! The console session loop.
//!
//! One statement is in flight at a time. Each cycle runs
//! accumulate, classify, resolve, confirm (mutations only), dispatch and
//! render, then returns to the prompt. Every wait in that cycle also
//! watches the shutdown future; if it fires, the partial cycle is dropped
//! and nothing further is sent.

use std::future::Future;
use std::pin::{pin, Pin};

use tabula_client::{ChainClient, NameResolver};
use tabula_core::messages;
use tabula_parser::{classify, MetaCommand, StatementKind};
use tracing::{debug, info, trace, warn};

use crate::accumulator::{Accepted, InputAccumulator};
use crate::config::SessionConfig;
use crate::confirm::{ConfirmationGate, Decision};
use crate::console::Console;
use crate::dispatch::Dispatcher;
use crate::error::SessionResult;
use crate::render::{help_text, render};
use crate::resolver::AliasResolver;

/// Where the session is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Prompting,
    Accumulating,
    Classifying,
    Resolving,
    ConfirmPending,
    Dispatching,
    Rendering,
    Closed,
}

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// `.exit` or `.quit`.
    Exit,
    /// Input stream closed.
    EndOfInput,
    /// Shutdown signal.
    Interrupted,
}

/// What a finished session did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub reason: CloseReason,
    /// Statements successfully dispatched.
    pub dispatched: usize,
    /// Statements as typed, in dispatch order.
    pub history: Vec<String>,
}

/// Result of one statement cycle.
enum Flow {
    Continue,
    Close(CloseReason),
}

/// A live console session.
///
/// The chain client is owned by the session and released exactly once,
/// when `run` finishes.
pub struct Session<C, R, K> {
    config: SessionConfig,
    dispatcher: Dispatcher<C>,
    aliases: AliasResolver<R>,
    gate: ConfirmationGate,
    console: K,
    accumulator: InputAccumulator,
    history: Vec<String>,
    dispatched: usize,
    state: SessionState,
}

impl<C, R, K> Session<C, R, K>
where
    C: ChainClient + Sync,
    R: NameResolver + Sync,
    K: Console,
{
    pub fn new(config: SessionConfig, client: C, resolver: R, console: K) -> Self {
        let gate = ConfirmationGate::new(config.interactive);
        Self {
            config,
            dispatcher: Dispatcher::new(client),
            aliases: AliasResolver::new(resolver),
            gate,
            console,
            accumulator: InputAccumulator::new(),
            history: Vec::new(),
            dispatched: 0,
            state: SessionState::Prompting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Run until exit, end of input or `shutdown` completes.
    ///
    /// `initial` is processed as the first statement without going through
    /// line accumulation. The chain client is released before returning,
    /// on every path.
    pub async fn run<S>(
        mut self,
        initial: Option<String>,
        shutdown: S,
    ) -> SessionResult<SessionSummary>
    where
        S: Future<Output = ()>,
    {
        let mut shutdown = pin!(shutdown);
        let outcome = self.drive(initial, shutdown.as_mut()).await;

        self.transition(SessionState::Closed);
        let Session {
            config,
            dispatcher,
            mut console,
            history,
            dispatched,
            ..
        } = self;
        dispatcher.close().await;

        let reason = outcome?;
        match reason {
            CloseReason::Interrupted => console.error(messages::MSG_INTERRUPTED)?,
            _ if config.interactive => console.print(messages::MSG_GOODBYE)?,
            _ => {}
        }
        info!(?reason, dispatched, "session closed");

        Ok(SessionSummary {
            reason,
            dispatched,
            history,
        })
    }

    async fn drive<S>(
        &mut self,
        initial: Option<String>,
        mut shutdown: Pin<&mut S>,
    ) -> SessionResult<CloseReason>
    where
        S: Future<Output = ()>,
    {
        if self.config.interactive {
            let chain = self.dispatcher.chain();
            self.console.print(&format!(
                "{} ({}, chain id {})\nEnter .help for usage hints.",
                messages::MSG_WELCOME,
                chain.name,
                chain.chain_id
            ))?;
        }

        let mut next = initial.filter(|text| !text.trim().is_empty());
        loop {
            let text = match next.take() {
                Some(text) => text,
                None => match self.accumulate(shutdown.as_mut()).await? {
                    Some(text) => text,
                    None if self.state == SessionState::Closed => {
                        return Ok(CloseReason::Interrupted)
                    }
                    None => return Ok(CloseReason::EndOfInput),
                },
            };

            match self.cycle(&text, shutdown.as_mut()).await? {
                Flow::Continue => self.transition(SessionState::Prompting),
                Flow::Close(reason) => return Ok(reason),
            }
        }
    }

    /// Gather lines until a statement is complete.
    ///
    /// `None` means input closed with nothing pending, or an interrupt
    /// (in which case the state is already `Closed`).
    async fn accumulate<S>(&mut self, mut shutdown: Pin<&mut S>) -> SessionResult<Option<String>>
    where
        S: Future<Output = ()>,
    {
        loop {
            let prompt = match (self.config.interactive, self.accumulator.is_empty()) {
                (false, _) => "",
                (true, true) => self.config.prompt.as_str(),
                (true, false) => self.config.continuation.as_str(),
            };
            let read = self.console.read_line(prompt);
            let Some(line) = interruptible(shutdown.as_mut(), read).await else {
                self.accumulator.discard();
                self.transition(SessionState::Closed);
                return Ok(None);
            };

            match line? {
                Some(line) => {
                    self.transition(SessionState::Accumulating);
                    if let Accepted::Complete(pending) = self.accumulator.accept(&line) {
                        return Ok(Some(pending.into_text()));
                    }
                }
                None => return Ok(self.accumulator.finish().map(|p| p.into_text())),
            }
        }
    }

    /// One pass from complete statement text back to the prompt.
    async fn cycle<S>(&mut self, text: &str, mut shutdown: Pin<&mut S>) -> SessionResult<Flow>
    where
        S: Future<Output = ()>,
    {
        self.transition(SessionState::Classifying);
        let statement = match classify(text) {
            Ok(statement) => statement,
            Err(e) => {
                debug!(error = %e, "statement rejected");
                self.console.error(&e.to_string())?;
                return Ok(Flow::Continue);
            }
        };
        debug!(kind = %statement.kind(), segments = statement.segments(), "classified statement");

        if let Some(command) = statement.meta() {
            return self.meta(command);
        }

        self.transition(SessionState::Resolving);
        let resolving = self.aliases.resolve(&statement);
        let Some(resolution) = interruptible(shutdown.as_mut(), resolving).await else {
            return Ok(Flow::Close(CloseReason::Interrupted));
        };
        if !resolution.aliases.failures().is_empty() {
            debug!(unresolved = ?resolution.aliases.failures(), "leaving aliases as written");
        }

        if ConfirmationGate::required(statement.kind()) {
            self.transition(SessionState::ConfirmPending);
            let asked = self.gate.ask(&mut self.console);
            let Some(answer) = interruptible(shutdown.as_mut(), asked).await else {
                return Ok(Flow::Close(CloseReason::Interrupted));
            };
            match answer? {
                None => return Ok(Flow::Close(CloseReason::EndOfInput)),
                Some(Decision::Deny) => {
                    info!("statement aborted");
                    self.console.print(messages::MSG_ABORTING)?;
                    return Ok(Flow::Continue);
                }
                Some(Decision::Confirm) => {
                    self.console.print(messages::MSG_COMMITTING)?;
                }
            }
        }

        self.dispatch(statement.kind(), text, &resolution.text, shutdown).await
    }

    /// Send `resolved` and render the outcome. `typed` goes to history.
    async fn dispatch<S>(
        &mut self,
        kind: StatementKind,
        typed: &str,
        resolved: &str,
        shutdown: Pin<&mut S>,
    ) -> SessionResult<Flow>
    where
        S: Future<Output = ()>,
    {
        self.transition(SessionState::Dispatching);
        let sent = self.dispatcher.dispatch(kind, resolved);
        let Some(outcome) = interruptible(shutdown, sent).await else {
            return Ok(Flow::Close(CloseReason::Interrupted));
        };

        self.transition(SessionState::Rendering);
        let rendered = outcome.and_then(|result| {
            self.history.push(typed.trim().to_string());
            self.dispatched += 1;
            render(&result, self.config.format, &self.dispatcher.chain())
        });
        match rendered {
            Ok(output) => self.console.print(&output)?,
            Err(e) => {
                warn!(error = %e, "dispatch failed");
                self.console.error(&e.to_string())?;
            }
        }
        Ok(Flow::Continue)
    }

    fn meta(&mut self, command: MetaCommand) -> SessionResult<Flow> {
        match command {
            MetaCommand::Exit => return Ok(Flow::Close(CloseReason::Exit)),
            MetaCommand::Help => self.console.print(&help_text())?,
            MetaCommand::History => {
                for (i, entry) in self.history.iter().enumerate() {
                    self.console.print(&format!("{:>4}  {}", i + 1, entry))?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            trace!(from = ?self.state, to = ?next, "session state");
            self.state = next;
        }
    }
}

/// Run `work` unless `shutdown` completes first.
async fn interruptible<S, F>(shutdown: Pin<&mut S>, work: F) -> Option<F::Output>
where
    S: Future<Output = ()>,
    F: Future,
{
    tokio::select! {
        biased;
        _ = shutdown => None,
        output = work => Some(output),
    }
}
