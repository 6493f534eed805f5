//! Ledger service
//!
//! Provides the balance-changing operations: buying items and completing
//! jobs, plus recording them in the transaction history.

use crate::error::{MarketError, MarketResult};
use crate::models::{Coins, LedgerState, Transaction};
use crate::storage::Catalog;

/// A balance before and after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChange {
    pub before: Coins,
    pub after: Coins,
}

/// Service for changing the ledger balance
pub struct LedgerService<'a> {
    state: &'a mut LedgerState,
    catalog: &'a Catalog,
}

impl<'a> LedgerService<'a> {
    pub fn new(state: &'a mut LedgerState, catalog: &'a Catalog) -> Self {
        Self { state, catalog }
    }

    pub fn balance(&self) -> Coins {
        self.state.balance
    }

    /// Buy an item, paying its price from the balance
    ///
    /// The balance is left untouched when the item is unknown or too
    /// expensive.
    pub fn buy(&mut self, key: &str) -> MarketResult<BalanceChange> {
        let item = self.catalog.item(key)?;
        let before = self.state.balance;

        if item.price > before {
            return Err(MarketError::InsufficientCoins {
                item: item.key.clone(),
                price: item.price.amount(),
                balance: before.amount(),
            });
        }

        let after = before.checked_sub(item.price).ok_or_else(|| {
            MarketError::Validation(format!("Price of {} overflows the balance", item.key))
        })?;
        self.state.balance = after;

        tracing::debug!(item = %item.key, price = item.price.amount(), "Bought item");
        Ok(BalanceChange { before, after })
    }

    /// Complete a job, adding its reward to the balance
    pub fn complete_job(&mut self, key: &str) -> MarketResult<BalanceChange> {
        let job = self.catalog.job(key)?;
        let before = self.state.balance;

        let after = before.checked_add(job.reward).ok_or_else(|| {
            MarketError::Validation(format!("Reward of {} overflows the balance", job.key))
        })?;
        self.state.balance = after;

        tracing::debug!(job = %job.key, reward = job.reward.amount(), "Completed job");
        Ok(BalanceChange { before, after })
    }

    /// Append a transaction for a successful command
    pub fn record(&mut self, cmd: impl Into<String>) -> &Transaction {
        self.state.transactions.push(Transaction::now(cmd));
        // Just pushed, so the history is non-empty
        &self.state.transactions[self.state.transactions.len() - 1]
    }
}
