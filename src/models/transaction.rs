//! Transaction history model
//!
//! A transaction records a successful balance-changing command and when it
//! ran. Timestamps are stored on disk as unix seconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::coins::Coins;

/// A recorded balance-changing command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// When the command completed
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created: DateTime<Utc>,

    /// The command text as executed (e.g. "buy apple")
    pub cmd: String,
}

impl Transaction {
    /// Record `cmd` as happening now
    pub fn now(cmd: impl Into<String>) -> Self {
        Self {
            created: Utc::now(),
            cmd: cmd.into(),
        }
    }
}

/// Persisted ledger state: the balance and its history
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub balance: Coins,

    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl LedgerState {
    pub fn with_balance(balance: impl Into<Coins>) -> Self {
        Self {
            balance: balance.into(),
            transactions: Vec::new(),
        }
    }

    /// The most recent `count` transactions, oldest first
    pub fn recent(&self, count: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(count);
        &self.transactions[start..]
    }
}
