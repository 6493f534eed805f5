//! Custom error types for market
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::Path;

use thiserror::Error;

/// The main error type for market operations
#[derive(Error, Debug)]
pub enum MarketError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed or wrongly shaped serialized content
    #[error("Parse error: {0}")]
    Parse(String),

    /// The apprc document has no `_default` section
    #[error("Configuration is missing the mandatory `_default` section")]
    MissingDefault,

    /// A configuration section exists but is not a mapping
    #[error("Configuration section `{section}` must be a mapping, found a {found}")]
    InvalidSection {
        section: String,
        found: &'static str,
    },

    /// A placeholder references a variable that never resolved
    #[error("Unsatisfied dependency `{dependency}` for variable `{variable}`")]
    UnsatisfiedDependency { dependency: String, variable: String },

    /// A key makes dotted variable paths ambiguous
    #[error("Ambiguous configuration structure at `{path}`: keys must be non-empty and contain no `.`")]
    AmbiguousStructure { path: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors for user input and models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Not enough coins for a purchase
    #[error("Not enough coins (current={balance}) to buy item {item} with price {price}")]
    InsufficientCoins {
        item: String,
        price: i32,
        balance: i32,
    },

    /// Unrecognized REPL command
    #[error("Unrecognized command \"{0}\"")]
    UnknownCommand(String),
}

impl MarketError {
    /// Create a "not found" error for catalog items
    pub fn item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Item",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for catalog jobs
    pub fn job_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Job",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for configuration sections
    pub fn section_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Config section",
            identifier: identifier.into(),
        }
    }

    pub(crate) fn io_at(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io(format!("{}: {}", path.display(), err))
    }

    pub(crate) fn parse_at(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Parse(format!("{}: {}", path.display(), err))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Structural configuration failures nothing can run without
    pub fn is_fatal_config(&self) -> bool {
        matches!(
            self,
            Self::MissingDefault
                | Self::InvalidSection { .. }
                | Self::UnsatisfiedDependency { .. }
                | Self::AmbiguousStructure { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for MarketError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for MarketError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias for market operations
pub type MarketResult<T> = Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = MarketError::item_not_found("apple");
        assert_eq!(err.to_string(), "Item not found: apple");
        assert!(err.is_not_found());
        assert!(!err.is_fatal_config());
    }

    #[test]
    fn test_section_not_found_is_not_found() {
        let err = MarketError::section_not_found("server");
        assert_eq!(err.to_string(), "Config section not found: server");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_coins_error() {
        let err = MarketError::InsufficientCoins {
            item: "sword".into(),
            price: 50,
            balance: 30,
        };
        assert_eq!(
            err.to_string(),
            "Not enough coins (current=30) to buy item sword with price 50"
        );
    }

    #[test]
    fn test_unsatisfied_dependency_names_both_sides() {
        let err = MarketError::UnsatisfiedDependency {
            dependency: "nope.value".into(),
            variable: "this.url".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("nope.value"));
        assert!(msg.contains("this.url"));
        assert!(err.is_fatal_config());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let market_err: MarketError = io_err.into();
        assert!(matches!(market_err, MarketError::Io(_)));
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u32>("[not, a, number]").unwrap_err();
        let market_err: MarketError = yaml_err.into();
        assert!(matches!(market_err, MarketError::Parse(_)));
    }
}
