//! Persisted level index
//!
//! The only state that survives a restart is the index of the level the
//! player is on. [`JsonFileProgress`] stores it as `{ "level": n }`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CampaignError, Result};

pub trait ProgressStore {
    /// `None` when nothing has been saved yet.
    fn load_level_index(&self) -> Result<Option<usize>>;
    fn save_level_index(&mut self, index: usize) -> Result<()>;
}

/// In-process store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryProgress {
    index: Option<usize>,
}

impl MemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(index: usize) -> Self {
        Self { index: Some(index) }
    }
}

impl ProgressStore for MemoryProgress {
    fn load_level_index(&self) -> Result<Option<usize>> {
        Ok(self.index)
    }

    fn save_level_index(&mut self, index: usize) -> Result<()> {
        self.index = Some(index);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ProgressFile {
    level: usize,
}

#[derive(Debug, Clone)]
pub struct JsonFileProgress {
    path: PathBuf,
}

impl JsonFileProgress {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CampaignError {
        CampaignError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProgressStore for JsonFileProgress {
    fn load_level_index(&self) -> Result<Option<usize>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let file: ProgressFile = serde_json::from_str(&text)?;
        Ok(Some(file.level))
    }

    fn save_level_index(&mut self, index: usize) -> Result<()> {
        let text = serde_json::to_string(&ProgressFile { level: index })?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}
