use crate::block::Block;
use crate::level::Level;
use crate::types::{BlockId, GridPos};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockSnapshot {
    pub id: BlockId,
    pub position: GridPos,
    pub initial_position: GridPos,
    pub layer: u32,
    pub parent: Option<BlockId>,
    pub children: Vec<BlockId>,
    pub interactive: bool,
}

impl From<&Block> for BlockSnapshot {
    fn from(value: &Block) -> Self {
        Self {
            id: value.id(),
            position: value.position(),
            initial_position: value.initial_position(),
            layer: value.layer(),
            parent: value.parent(),
            children: value.children().to_vec(),
            interactive: value.collider_enabled(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LevelSnapshot {
    pub blocks: Vec<BlockSnapshot>,
    pub rewind_stack: Vec<BlockId>,
    pub won: bool,
}

impl LevelSnapshot {
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.rewind_stack.clear();
        self.won = false;
    }
}

impl Level {
    pub fn snapshot_into(&self, out: &mut LevelSnapshot) {
        out.clear();
        out.blocks.extend(self.blocks().iter().map(BlockSnapshot::from));
        out.rewind_stack.extend_from_slice(self.rewind_stack());
        out.won = self.is_won();
    }

    pub fn snapshot(&self) -> LevelSnapshot {
        let mut s = LevelSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
