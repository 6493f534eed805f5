//! Interactive ledger session
//!
//! A [`Session`] owns the ledger state for the lifetime of the REPL and
//! persists it when the session ends.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{MarketPaths, Settings};
use crate::error::MarketResult;
use crate::models::LedgerState;
use crate::services::LedgerService;
use crate::storage::{Catalog, StateRepository};

use super::command::Command;

/// What the REPL should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A running ledger session
pub struct Session {
    state: LedgerState,
    catalog: Catalog,
    repository: StateRepository,
    settings: Settings,
    working_dir: PathBuf,
}

impl Session {
    pub fn new(
        state: LedgerState,
        catalog: Catalog,
        repository: StateRepository,
        settings: Settings,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            state,
            catalog,
            repository,
            settings,
            working_dir,
        }
    }

    /// Load the catalog and persisted state named by `paths`
    pub fn open(paths: &MarketPaths, settings: Settings) -> MarketResult<Self> {
        let catalog = Catalog::load(&paths.items_file(), &paths.jobs_file())?;
        let repository = StateRepository::new(paths.state_file());
        let state = repository.load()?;

        Ok(Self::new(
            state,
            catalog,
            repository,
            settings,
            paths.base_dir().clone(),
        ))
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Persist the ledger state
    pub fn save(&self) -> MarketResult<()> {
        self.repository.save(&self.state)
    }

    pub fn greet<W: Write>(&self, out: &mut W) -> MarketResult<()> {
        writeln!(out, "{}", self.settings.greeting)?;
        writeln!(out, "Balance: {}", self.state.balance)?;
        Ok(())
    }

    /// Parse and run one input line; blank lines do nothing
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> MarketResult<Flow> {
        match Command::parse_line(line)? {
            Some(command) => self.execute(&command, out),
            None => Ok(Flow::Continue),
        }
    }

    /// Run a command, recording it in the history if it changed the balance
    pub fn execute<W: Write>(&mut self, command: &Command, out: &mut W) -> MarketResult<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Dir => writeln!(out, "Working dir: {}", self.working_dir.display())?,
            Command::Version => writeln!(out, "Version: {}", env!("CARGO_PKG_VERSION"))?,
            Command::Balance => writeln!(out, "Balance: {}", self.state.balance)?,
            Command::Items => {
                writeln!(out, "ITEMS")?;
                for item in self.catalog.items() {
                    writeln!(out, "\t{}: {} coins", item.key, item.price)?;
                }
            }
            Command::Jobs => {
                writeln!(out, "JOBS")?;
                for job in self.catalog.jobs() {
                    writeln!(out, "\t{}: {} coins", job.key, job.reward)?;
                }
            }
            Command::History(count) => {
                let count = count.unwrap_or(self.settings.history_limit);
                let recent = self.state.recent(count);
                if recent.is_empty() {
                    writeln!(out, "No transactions yet.")?;
                } else {
                    writeln!(out, "HISTORY")?;
                    for txn in recent {
                        writeln!(out, "\t{}  {}", txn.created.format("%Y-%m-%d %H:%M:%S"), txn.cmd)?;
                    }
                }
            }
            Command::Buy(key) => {
                let mut ledger = LedgerService::new(&mut self.state, &self.catalog);
                let change = ledger.buy(key)?;
                ledger.record(command.to_string());
                let item = self.catalog.item(key)?;
                writeln!(
                    out,
                    "Bought item {} for a price {}. Balance change: {} -> {}",
                    item.key, item.price, change.before, change.after
                )?;
            }
            Command::Job(key) => {
                let mut ledger = LedgerService::new(&mut self.state, &self.catalog);
                let change = ledger.complete_job(key)?;
                ledger.record(command.to_string());
                let job = self.catalog.job(key)?;
                writeln!(
                    out,
                    "Completed job {} with reward {}. Balance change: {} -> {}",
                    job.key, job.reward, change.before, change.after
                )?;
            }
            Command::Repeat { count, command } => {
                for _ in 0..*count {
                    if self.execute(command, out)? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
            }
        }

        Ok(Flow::Continue)
    }
}

/// Drive `session` from `input` until `q` or end of input, then save
///
/// Command errors are reported on `out` and the loop continues. The state is
/// saved on every exit path, including a failed read or write; the first
/// such failure is returned after saving.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> MarketResult<()> {
    let outcome = session.greet(out).and_then(|()| repl(session, input, out));
    let saved = session.save();

    match (outcome, saved) {
        (Err(e), Err(save_err)) => {
            tracing::error!(error = %save_err, "Failed to save ledger state");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), saved) => saved,
    }
}

fn repl<R: BufRead, W: Write>(session: &mut Session, mut input: R, out: &mut W) -> MarketResult<()> {
    let mut buf = Vec::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        // Invalid UTF-8 becomes U+FFFD and fails as an unknown command
        let line = String::from_utf8_lossy(&buf);

        match session.execute_line(&line, out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(e) => {
                tracing::debug!(error = %e, input = line.trim(), "Command failed");
                writeln!(out, "error: {}", e)?;
            }
        }
    }
}
