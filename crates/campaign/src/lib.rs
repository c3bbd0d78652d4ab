//! Campaign - level catalog, saved progress and level progression
//!
//! Levels are described as JSON ([`LevelDef`]) and collected into a
//! [`LevelCatalog`]. A [`Campaign`] walks the catalog in order, remembering
//! the current level index through a [`ProgressStore`]. Finishing the last
//! level wraps back to the first.

pub mod campaign;
pub mod catalog;
pub mod error;
pub mod level_def;
pub mod progress;

pub use fold_puzzle_core as core;
pub use fold_puzzle_engine as engine;
pub use fold_puzzle_types as types;

pub use campaign::Campaign;
pub use catalog::LevelCatalog;
pub use error::CampaignError;
pub use level_def::{BlockDef, LevelDef};
pub use progress::{JsonFileProgress, MemoryProgress, ProgressStore};
