//! Runner configuration from the environment.

use std::path::PathBuf;

use crate::engine::EngineConfig;
use crate::types::DEFAULT_COMPLETION_TIMEOUT_MS;

pub const DEFAULT_LEVELS_PATH: &str = "levels/levels.json";
pub const DEFAULT_PROGRESS_PATH: &str = "fold-progress.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub levels_path: PathBuf,
    pub progress_path: PathBuf,
    pub completion_timeout_ms: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            levels_path: PathBuf::from(DEFAULT_LEVELS_PATH),
            progress_path: PathBuf::from(DEFAULT_PROGRESS_PATH),
            completion_timeout_ms: DEFAULT_COMPLETION_TIMEOUT_MS,
        }
    }
}

impl RunnerConfig {
    /// `FOLD_LEVELS_PATH`, `FOLD_PROGRESS_PATH` and `FOLD_COMPLETION_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            levels_path: non_empty("FOLD_LEVELS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.levels_path),
            progress_path: non_empty("FOLD_PROGRESS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.progress_path),
            completion_timeout_ms: non_empty("FOLD_COMPLETION_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.completion_timeout_ms),
        }
    }

    /// The first positional argument, if any, replaces the levels path.
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Self {
        if let Some(path) = args.next() {
            self.levels_path = PathBuf::from(path);
        }
        self
    }

    /// Headless runs have no animation collaborator, so transitions settle
    /// on the tick clock.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::clocked().with_completion_timeout_ms(self.completion_timeout_ms)
    }
}
