//! Runtime configuration with defaults.

use std::path::PathBuf;

use crate::logger::LogLevel;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Minimum severity for the engine logger and the console.
    pub log_level: LogLevel,
    /// Optional log file (appended to, in addition to stderr).
    pub log_file: Option<PathBuf>,
    /// Base directory for relative paths given to the CLI.
    pub data_dir: Option<PathBuf>,
    /// Emit JSON log lines instead of human-readable ones.
    pub json_logs: bool,
}

impl Config {
    /// Resolve `path` against `data_dir` when it is relative.
    pub fn resolve(&self, path: impl Into<PathBuf>) -> PathBuf {
        let path = path.into();
        match &self.data_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}
