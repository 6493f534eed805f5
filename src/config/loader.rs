//! apprc document loading
//!
//! Reads the apprc file into a generic [`Mapping`]. The path comes from the
//! `MARKET_APPRC` environment variable, falling back to `apprc.yml` in the
//! process working directory.

use std::path::{Path, PathBuf};

use super::value::Mapping;
use crate::error::{MarketError, MarketResult};

/// Environment variable overriding the apprc location
pub const APPRC_ENV: &str = "MARKET_APPRC";

/// Default apprc filename, relative to the working directory
pub const DEFAULT_APPRC_PATH: &str = "apprc.yml";

/// A parsed apprc document: top-level section name -> value
pub type Document = Mapping;

/// Resolve the apprc path from the environment
pub fn apprc_path() -> PathBuf {
    match std::env::var(APPRC_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_APPRC_PATH),
    }
}

/// Load and parse an apprc document
///
/// `.json` files go through serde_json, everything else through serde_yaml.
///
/// # Errors
///
/// [`MarketError::Io`] if the file cannot be read, [`MarketError::Parse`] if
/// the content is malformed or not a mapping of supported values.
pub fn load<P: AsRef<Path>>(path: P) -> MarketResult<Document> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path).map_err(|e| MarketError::io_at(path, e))?;

    let document = if is_json(path) {
        serde_json::from_str::<Document>(&contents).map_err(|e| MarketError::parse_at(path, e))?
    } else {
        serde_yaml::from_str::<Document>(&contents).map_err(|e| MarketError::parse_at(path, e))?
    };

    tracing::debug!(path = %path.display(), sections = document.len(), "Loaded apprc");
    Ok(document)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
