//! The resolved application configuration
//!
//! [`Config`] is built once at startup (load, compose, resolve) and handed to
//! whatever needs it. It is never mutated afterwards.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::composer::compose;
use super::loader::{self, Document};
use super::resolver::{resolve, Variables};
use super::runtime::RuntimeContext;
use super::value::{Mapping, Value};
use crate::error::{MarketError, MarketResult};

/// Active configuration for one mode
#[derive(Debug, Clone)]
pub struct Config {
    mode: String,
    source: Option<PathBuf>,
    values: Mapping,
    variables: Variables,
}

impl Config {
    /// Load the apprc named by `MARKET_APPRC` (or `apprc.yml`) for `mode`
    pub fn load(mode: &str) -> MarketResult<Self> {
        let runtime = RuntimeContext::detect(mode)?;
        Self::load_from(loader::apprc_path(), &runtime)
    }

    /// Load an explicit apprc file with an explicit runtime context
    pub fn load_from<P: AsRef<Path>>(path: P, runtime: &RuntimeContext) -> MarketResult<Self> {
        let path = path.as_ref();
        let document = loader::load(path)?;
        let mut config = Self::from_document(&document, runtime)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Compose and resolve an already parsed document
    pub fn from_document(document: &Document, runtime: &RuntimeContext) -> MarketResult<Self> {
        let composed = compose(document, runtime.mode())?;
        let resolved = resolve(composed, runtime)?;

        tracing::info!(
            mode = runtime.mode(),
            sections = resolved.mapping.len(),
            variables = resolved.variables.len(),
            "Configuration loaded"
        );

        Ok(Self {
            mode: runtime.mode().to_string(),
            source: None,
            values: resolved.mapping,
            variables: resolved.variables,
        })
    }

    /// Fetch a top-level section
    ///
    /// # Errors
    ///
    /// [`MarketError::NotFound`] if the key is absent or its value is not a
    /// mapping.
    pub fn get(&self, key: &str) -> MarketResult<&Mapping> {
        self.values
            .get(key)
            .and_then(Value::as_mapping)
            .ok_or_else(|| MarketError::section_not_found(key))
    }

    /// Fetch a top-level section and deserialize it into `T`
    pub fn section<T: DeserializeOwned>(&self, key: &str) -> MarketResult<T> {
        let section = self.get(key)?;
        let json = serde_json::to_value(section)
            .map_err(|e| MarketError::Config(format!("Failed to encode section `{}`: {}", key, e)))?;
        serde_json::from_value(json)
            .map_err(|e| MarketError::Config(format!("Invalid section `{}`: {}", key, e)))
    }

    /// A resolved variable by dotted path (`this.server.port`, `mode`, ...)
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// The composed and resolved mapping
    pub fn values(&self) -> &Mapping {
        &self.values
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// The file this configuration was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
