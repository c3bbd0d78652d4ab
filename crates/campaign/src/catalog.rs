//! Ordered list of level definitions

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CampaignError, Result};
use crate::level_def::LevelDef;

/// Non-empty list of levels that all build.
///
/// JSON shape: `{ "levels": [ LevelDef, ... ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile")]
pub struct LevelCatalog {
    levels: Vec<LevelDef>,
}

#[derive(Deserialize)]
struct CatalogFile {
    levels: Vec<LevelDef>,
}

impl TryFrom<CatalogFile> for LevelCatalog {
    type Error = CampaignError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        Self::new(file.levels)
    }
}

impl LevelCatalog {
    /// Validates every level up front so a bad definition fails at startup.
    pub fn new(levels: Vec<LevelDef>) -> Result<Self> {
        if levels.is_empty() {
            return Err(CampaignError::EmptyCatalog);
        }
        for (index, def) in levels.iter().enumerate() {
            def.build()
                .map_err(|source| CampaignError::Level { index, source })?;
        }
        Ok(Self { levels })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CampaignError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelDef> {
        self.levels.get(index)
    }

    /// Level at `index`, or the first level once `index` runs past the end.
    pub fn get_wrapping(&self, index: usize) -> &LevelDef {
        self.levels.get(index).unwrap_or(&self.levels[0])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LevelDef> {
        self.levels.iter()
    }
}
