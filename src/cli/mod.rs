//! Interactive command line
//!
//! This module contains the REPL: command parsing and the session that
//! executes commands against the ledger.

pub mod command;
pub mod session;

pub use command::Command;
pub use session::{run, Flow, Session};
