//! Runtime context seeded into the variable table before resolution

use std::path::{Path, PathBuf};

use super::resolver::Variables;
use super::value::Value;
use crate::error::{MarketError, MarketResult};

/// Process context that placeholders may reference as `${mode}`, `${cwd}`
/// and `${exe_dir}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeContext {
    mode: String,
    cwd: PathBuf,
    exe_dir: PathBuf,
}

impl RuntimeContext {
    /// Build a context from explicit values (useful for testing)
    pub fn new(mode: impl Into<String>, cwd: impl Into<PathBuf>, exe_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode: mode.into(),
            cwd: cwd.into(),
            exe_dir: exe_dir.into(),
        }
    }

    /// Detect the working directory and executable directory of this process
    pub fn detect(mode: impl Into<String>) -> MarketResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| MarketError::Io(format!("Failed to determine working directory: {}", e)))?;

        let exe = std::env::current_exe()
            .map_err(|e| MarketError::Io(format!("Failed to locate executable: {}", e)))?;
        let exe_dir = exe
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| MarketError::Io(format!("Executable has no parent: {}", exe.display())))?;

        Ok(Self::new(mode, cwd, exe_dir))
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn exe_dir(&self) -> &Path {
        &self.exe_dir
    }

    /// Variables available to every placeholder
    pub fn seed(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert("mode".into(), Value::from(self.mode.as_str()));
        vars.insert("cwd".into(), Value::from(self.cwd.display().to_string()));
        vars.insert("exe_dir".into(), Value::from(self.exe_dir.display().to_string()));
        vars
    }
}
