//! Fold puzzle (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and hosts the headless
//! [`Runner`] that glues the campaign, the level controller and the control
//! adapter together.

pub mod config;
pub mod runner;

pub use fold_puzzle_adapter as adapter;
pub use fold_puzzle_campaign as campaign;
pub use fold_puzzle_core as core;
pub use fold_puzzle_engine as engine;
pub use fold_puzzle_types as types;

pub use config::RunnerConfig;
pub use runner::{Reply, ReplyOutcome, Runner};
