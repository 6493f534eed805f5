//! Business logic layer for market
//!
//! Services sit between the REPL and the models, enforcing the ledger
//! rules (no negative balance, known catalog keys only).

pub mod ledger;

pub use ledger::{BalanceChange, LedgerService};
