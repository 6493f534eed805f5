//! Storage layer for market
//!
//! Provides JSON file storage with atomic writes for the ledger state, and
//! read-only loading of the item and job catalog.

pub mod catalog;
pub mod file_io;
pub mod state;

pub use catalog::Catalog;
pub use file_io::{read_json, write_json_atomic};
pub use state::StateRepository;
