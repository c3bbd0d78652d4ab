//! Level progression

use tracing::info;

use crate::catalog::LevelCatalog;
use crate::engine::{EngineConfig, LevelController};
use crate::error::{CampaignError, Result};
use crate::level_def::LevelDef;
use crate::progress::ProgressStore;

pub struct Campaign<S: ProgressStore> {
    catalog: LevelCatalog,
    store: S,
    index: usize,
    config: EngineConfig,
}

impl<S: ProgressStore> Campaign<S> {
    /// Resume from the saved index; a fresh store starts at level 0.
    pub fn open(catalog: LevelCatalog, store: S) -> Result<Self> {
        let index = store.load_level_index()?.unwrap_or(0);
        Ok(Self {
            catalog,
            store,
            index,
            config: EngineConfig::default(),
        })
    }

    /// Engine configuration for every controller this campaign loads.
    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Instantiate the current level.
    ///
    /// A saved index past the end of the catalog wraps back to the first
    /// level.
    pub fn load_level(&mut self) -> Result<LevelController> {
        if self.index >= self.catalog.len() {
            self.index = 0;
        }
        let def = self.current_def();
        let level = def.build().map_err(|source| CampaignError::Level {
            index: self.index,
            source,
        })?;
        info!(index = self.index, name = %def.name, blocks = level.len(), "level loaded");
        Ok(LevelController::new(level, self.config))
    }

    /// Advance past a won level, persist the new index and load it.
    pub fn level_completed(&mut self) -> Result<LevelController> {
        self.index += 1;
        self.store.save_level_index(self.index)?;
        self.load_level()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_def(&self) -> &LevelDef {
        self.catalog.get_wrapping(self.index)
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
