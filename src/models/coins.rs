//! Coin amount type
//!
//! Balances, prices and rewards are whole coins stored as i32. Arithmetic is
//! checked so a corrupted state file or a huge reward cannot wrap around.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole number of coins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Coins(i32);

impl Coins {
    pub const fn new(amount: i32) -> Self {
        Self(amount)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the raw amount
    pub const fn amount(&self) -> i32 {
        self.0
    }

    /// Add, returning `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtract, returning `None` on overflow
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Coins {
    fn from(amount: i32) -> Self {
        Self(amount)
    }
}
