//! Win evaluation
//!
//! Each block may carry a [`WinningParams`] constraint. An empty set leaves
//! that dimension unconstrained; a level is won when every block satisfies
//! both of its sets.

use std::collections::BTreeSet;

use crate::level::Level;
use crate::types::GridPos;

/// Per-block winning constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinningParams {
    layers: BTreeSet<u32>,
    positions: BTreeSet<GridPos>,
}

impl WinningParams {
    pub fn new(
        layers: impl IntoIterator<Item = u32>,
        positions: impl IntoIterator<Item = GridPos>,
    ) -> Self {
        Self {
            layers: layers.into_iter().collect(),
            positions: positions.into_iter().collect(),
        }
    }

    /// No constraint at all.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn with_layers(layers: impl IntoIterator<Item = u32>) -> Self {
        Self::new(layers, [])
    }

    pub fn with_positions(positions: impl IntoIterator<Item = GridPos>) -> Self {
        Self::new([], positions)
    }

    pub fn layers(&self) -> &BTreeSet<u32> {
        &self.layers
    }

    pub fn positions(&self) -> &BTreeSet<GridPos> {
        &self.positions
    }

    pub fn is_unconstrained(&self) -> bool {
        self.layers.is_empty() && self.positions.is_empty()
    }

    pub fn is_satisfied_by(&self, layer: u32, position: GridPos) -> bool {
        (self.layers.is_empty() || self.layers.contains(&layer))
            && (self.positions.is_empty() || self.positions.contains(&position))
    }
}

/// True iff every block passes its own constraints.
pub fn is_level_won(level: &Level) -> bool {
    level
        .blocks()
        .iter()
        .all(|b| level.winning_params(b.id()).is_satisfied_by(b.layer(), b.position()))
}
