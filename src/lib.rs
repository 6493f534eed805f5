//! market - interactive command-line coin ledger
//!
//! Buy items, complete jobs, and keep a persisted coin balance and
//! transaction history. Startup configuration comes from an `apprc` file:
//! a `_default` section shallow-merged with a mode section, with `${...}`
//! placeholders resolved against runtime values and other configuration
//! leaves.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: apprc loading, composition and placeholder resolution; paths and settings
//! - `error`: Custom error types
//! - `models`: Coins, catalog entries and ledger state
//! - `storage`: JSON file storage layer
//! - `services`: Ledger business logic
//! - `cli`: The interactive REPL
//!
//! # Example
//!
//! ```rust,ignore
//! use market::config::{Config, MarketPaths, Settings};
//!
//! let config = Config::load("dev")?;
//! let server = config.get("server")?;
//! let paths = MarketPaths::new()?.with_config(&config)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::MarketError;
