//! Layering of the `_default` section with a mode section

use super::loader::Document;
use super::value::{Mapping, Value};
use crate::error::{MarketError, MarketResult};

/// Name of the mandatory baseline section
pub const DEFAULT_SECTION: &str = "_default";

/// Compose the active configuration for `mode`
///
/// Top-level keys of the mode section replace the same keys of `_default`
/// wholesale. Nested mappings are not merged. A missing mode section leaves
/// `_default` as is.
pub fn compose(document: &Document, mode: &str) -> MarketResult<Mapping> {
    let mut active = section(document, DEFAULT_SECTION)?
        .ok_or(MarketError::MissingDefault)?
        .clone();

    match section(document, mode)? {
        Some(overrides) if mode != DEFAULT_SECTION => {
            tracing::debug!(mode, keys = overrides.len(), "Applying mode section");
            for (key, value) in overrides {
                active.insert(key.clone(), value.clone());
            }
        }
        Some(_) => {}
        None => tracing::debug!(mode, "No mode section, using defaults"),
    }

    Ok(active)
}

fn section<'a>(document: &'a Document, name: &str) -> MarketResult<Option<&'a Mapping>> {
    match document.get(name) {
        None => Ok(None),
        Some(Value::Mapping(m)) => Ok(Some(m)),
        Some(other) => Err(MarketError::InvalidSection {
            section: name.to_string(),
            found: other.kind(),
        }),
    }
}
