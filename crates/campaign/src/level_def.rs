//! Serializable level definitions

use serde::{Deserialize, Serialize};

use crate::core::{BlockSpec, Level, LevelError, WinningParams};
use crate::types::GridPos;

/// One block of a level definition.
///
/// ```json
/// { "x": 0, "z": 1, "winning_layers": [2], "winning_positions": [[0, 0]] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDef {
    pub x: i32,
    pub z: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub winning_layers: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub winning_positions: Vec<(i32, i32)>,
}

impl BlockDef {
    pub fn at(x: i32, z: i32) -> Self {
        Self {
            x,
            z,
            winning_layers: Vec::new(),
            winning_positions: Vec::new(),
        }
    }

    fn to_spec(&self) -> BlockSpec {
        let winning = WinningParams::new(
            self.winning_layers.iter().copied(),
            self.winning_positions.iter().map(|&p| GridPos::from(p)),
        );
        BlockSpec::at(self.x, self.z).winning(winning)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    #[serde(default)]
    pub name: String,
    pub blocks: Vec<BlockDef>,
}

impl LevelDef {
    /// Instantiate a fresh, fully unfolded level.
    pub fn build(&self) -> Result<Level, LevelError> {
        Level::new(self.blocks.iter().map(BlockDef::to_spec))
    }
}
