//! Core data models for market
//!
//! Coins, the item and job catalog entries, and the persisted ledger state.

pub mod catalog;
pub mod coins;
pub mod transaction;

pub use catalog::{Item, Job};
pub use coins::Coins;
pub use transaction::{LedgerState, Transaction};
