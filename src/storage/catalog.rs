//! Item and job catalog
//!
//! Loaded once from `item.json` and `job.json` (JSON arrays) and keyed by
//! entry key.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{MarketError, MarketResult};
use crate::models::{Item, Job};

use super::file_io::read_json_required;

/// Read-only lookup of items and jobs by key
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
    jobs: HashMap<String, Job>,
}

impl Catalog {
    /// Build a catalog from entries; a repeated key keeps the last entry
    pub fn new(items: Vec<Item>, jobs: Vec<Job>) -> Self {
        let mut catalog = Self::default();

        for item in items {
            if let Some(old) = catalog.items.insert(item.key.clone(), item) {
                tracing::warn!(key = %old.key, "Duplicate item key, keeping the last entry");
            }
        }
        for job in jobs {
            if let Some(old) = catalog.jobs.insert(job.key.clone(), job) {
                tracing::warn!(key = %old.key, "Duplicate job key, keeping the last entry");
            }
        }

        catalog
    }

    /// Load both catalog files; either one missing is an error
    pub fn load(items_path: &Path, jobs_path: &Path) -> MarketResult<Self> {
        let items: Vec<Item> = read_json_required(items_path)?;
        let jobs: Vec<Job> = read_json_required(jobs_path)?;

        tracing::debug!(items = items.len(), jobs = jobs.len(), "Loaded catalog");
        Ok(Self::new(items, jobs))
    }

    pub fn item(&self, key: &str) -> MarketResult<&Item> {
        self.items
            .get(key)
            .ok_or_else(|| MarketError::item_not_found(key))
    }

    pub fn job(&self, key: &str) -> MarketResult<&Job> {
        self.jobs.get(key).ok_or_else(|| MarketError::job_not_found(key))
    }

    /// All items sorted by key
    pub fn items(&self) -> Vec<&Item> {
        let mut items: Vec<_> = self.items.values().collect();
        items.sort_by(|a, b| a.key.cmp(&b.key));
        items
    }

    /// All jobs sorted by key
    pub fn jobs(&self) -> Vec<&Job> {
        let mut jobs: Vec<_> = self.jobs.values().collect();
        jobs.sort_by(|a, b| a.key.cmp(&b.key));
        jobs
    }
}
