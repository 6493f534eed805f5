//! Configuration module for market
//!
//! This module provides the apprc configuration pipeline:
//! - Loading a YAML/JSON document (`loader`)
//! - Layering `_default` with a mode section (`composer`)
//! - Resolving `${dotted.path}` placeholders (`resolver`)
//! - The immutable, queryable result (`apprc::Config`)
//!
//! plus the host-facing pieces built on top of it: data paths and settings.

pub mod apprc;
pub mod composer;
pub mod loader;
pub mod paths;
pub mod resolver;
pub mod runtime;
pub mod settings;
pub mod value;

pub use apprc::Config;
pub use paths::MarketPaths;
pub use runtime::RuntimeContext;
pub use settings::Settings;
pub use value::{Mapping, Value};
