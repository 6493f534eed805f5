//! Ledger state repository
//!
//! Manages loading and saving the balance and transaction history to
//! state.json

use std::path::PathBuf;

use crate::error::MarketError;
use crate::models::LedgerState;

use super::file_io::{read_json, write_json_atomic};

/// Repository for ledger state persistence
pub struct StateRepository {
    path: PathBuf,
}

impl StateRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load state from disk; a missing file is an empty ledger
    pub fn load(&self) -> Result<LedgerState, MarketError> {
        let state: LedgerState = read_json(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            balance = state.balance.amount(),
            transactions = state.transactions.len(),
            "Loaded ledger state"
        );
        Ok(state)
    }

    /// Save state to disk
    pub fn save(&self, state: &LedgerState) -> Result<(), MarketError> {
        write_json_atomic(&self.path, state)?;
        tracing::debug!(path = %self.path.display(), "Saved ledger state");
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coins, Transaction};
    use tempfile::TempDir;

    #[test]
    fn test_missing_state_is_empty_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let repo = StateRepository::new(temp_dir.path().join("var").join("state.json"));

        let state = repo.load().unwrap();
        assert_eq!(state.balance, Coins::zero());
        assert!(state.transactions.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let repo = StateRepository::new(temp_dir.path().join("var").join("state.json"));

        let mut state = LedgerState::with_balance(17);
        state.transactions.push(Transaction::now("buy apple"));
        repo.save(&state).unwrap();

        // A fresh repository sees the same data (simulating restart)
        let reloaded = StateRepository::new(repo.path().clone()).load().unwrap();
        assert_eq!(reloaded.balance, Coins::new(17));
        assert_eq!(reloaded.transactions.len(), 1);
        assert_eq!(reloaded.transactions[0].cmd, "buy apple");
    }
}
