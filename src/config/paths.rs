//! Path management for market
//!
//! ## Working Directory Resolution
//!
//! 1. `MARKET_USE_CWD=1`: the process working directory
//! 2. Otherwise: the directory containing the running executable
//!
//! Data files live under the working directory unless the apprc `paths`
//! section overrides them individually.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::apprc::Config;
use crate::error::{MarketError, MarketResult};

/// Environment variable selecting the process cwd as working directory
pub const USE_CWD_ENV: &str = "MARKET_USE_CWD";

/// Resolve the working directory for data files
pub fn working_dir() -> MarketResult<PathBuf> {
    if std::env::var(USE_CWD_ENV).is_ok_and(|v| v == "1") {
        return std::env::current_dir()
            .map_err(|e| MarketError::Io(format!("Failed to determine working directory: {}", e)));
    }

    let exe = std::env::current_exe()
        .map_err(|e| MarketError::Io(format!("Failed to locate executable: {}", e)))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| MarketError::Io(format!("Executable has no parent: {}", exe.display())))
}

/// Optional per-file overrides from the apprc `paths` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathOverrides {
    #[serde(default)]
    pub state: Option<PathBuf>,
    #[serde(default)]
    pub items: Option<PathBuf>,
    #[serde(default)]
    pub jobs: Option<PathBuf>,
}

/// Manages all paths used by market
#[derive(Debug, Clone)]
pub struct MarketPaths {
    /// Base directory for all market data
    base_dir: PathBuf,
    overrides: PathOverrides,
}

impl MarketPaths {
    /// Create a new MarketPaths instance rooted at [`working_dir`]
    pub fn new() -> MarketResult<Self> {
        Ok(Self::with_base_dir(working_dir()?))
    }

    /// Create MarketPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            overrides: PathOverrides::default(),
        }
    }

    /// Apply the `paths` section of `config`, if there is one
    pub fn with_config(mut self, config: &Config) -> MarketResult<Self> {
        match config.section::<PathOverrides>("paths") {
            Ok(overrides) => {
                tracing::debug!(?overrides, "Using configured data paths");
                self.overrides = overrides;
                Ok(self)
            }
            Err(e) if e.is_not_found() => Ok(self),
            Err(e) => Err(e),
        }
    }

    /// Get the base (working) directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the variable data directory (<base>/var/)
    pub fn var_dir(&self) -> PathBuf {
        self.base_dir.join("var")
    }

    /// Get the catalog directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to state.json (balance and transactions)
    pub fn state_file(&self) -> PathBuf {
        self.overrides
            .state
            .clone()
            .unwrap_or_else(|| self.var_dir().join("state.json"))
    }

    /// Get the path to the item catalog
    pub fn items_file(&self) -> PathBuf {
        self.overrides
            .items
            .clone()
            .unwrap_or_else(|| self.data_dir().join("item.json"))
    }

    /// Get the path to the job catalog
    pub fn jobs_file(&self) -> PathBuf {
        self.overrides
            .jobs
            .clone()
            .unwrap_or_else(|| self.data_dir().join("job.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::Document;
    use crate::config::runtime::RuntimeContext;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MarketPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.var_dir(), temp_dir.path().join("var"));
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MarketPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.state_file(),
            temp_dir.path().join("var").join("state.json")
        );
        assert_eq!(
            paths.items_file(),
            temp_dir.path().join("data").join("item.json")
        );
        assert_eq!(
            paths.jobs_file(),
            temp_dir.path().join("data").join("job.json")
        );
    }

    #[test]
    fn test_use_cwd_env() {
        env::set_var(USE_CWD_ENV, "1");
        let dir = working_dir().unwrap();
        env::remove_var(USE_CWD_ENV);

        assert_eq!(dir, env::current_dir().unwrap());
    }

    #[test]
    fn test_config_overrides() {
        let doc: Document = serde_yaml::from_str(
            "_default:\n  paths:\n    state: \"${cwd}/custom/state.json\"\n",
        )
        .unwrap();
        let config =
            Config::from_document(&doc, &RuntimeContext::new("dev", "/work", "/bin")).unwrap();

        let paths = MarketPaths::with_base_dir(PathBuf::from("/base"))
            .with_config(&config)
            .unwrap();

        assert_eq!(paths.state_file(), PathBuf::from("/work/custom/state.json"));
        assert_eq!(paths.items_file(), PathBuf::from("/base/data/item.json"));
    }

    #[test]
    fn test_config_without_paths_section() {
        let doc: Document = serde_yaml::from_str("_default:\n  other: 1\n").unwrap();
        let config =
            Config::from_document(&doc, &RuntimeContext::new("dev", "/work", "/bin")).unwrap();

        let paths = MarketPaths::with_base_dir(PathBuf::from("/base"))
            .with_config(&config)
            .unwrap();
        assert_eq!(paths.state_file(), PathBuf::from("/base/var/state.json"));
    }
}
