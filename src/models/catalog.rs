//! Catalog entries: items to buy and jobs to complete

use serde::{Deserialize, Serialize};

use super::coins::Coins;

/// Something that can be bought
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub price: Coins,
}

impl Item {
    pub fn new(key: impl Into<String>, price: impl Into<Coins>) -> Self {
        Self {
            key: key.into(),
            price: price.into(),
        }
    }
}

/// Something that can be completed for a reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub key: String,
    pub reward: Coins,
}

impl Job {
    pub fn new(key: impl Into<String>, reward: impl Into<Coins>) -> Self {
        Self {
            key: key.into(),
            reward: reward.into(),
        }
    }
}
