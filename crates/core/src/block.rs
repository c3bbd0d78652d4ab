//! Block - a single grid cell entity
//!
//! A block is a plain state container. It does not validate anything; the
//! fold/unfold commit functions in [`crate::layers`] keep the hierarchy
//! consistent.

use crate::types::{BlockId, GridPos};

/// One block of a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    position: GridPos,
    initial_position: GridPos,
    /// Number of blocks physically above this one in its stack.
    layer: u32,
    parent: Option<BlockId>,
    /// Blocks folded onto this one, in fold order.
    children: Vec<BlockId>,
    collider_enabled: bool,
}

impl Block {
    /// Create an unfolded block resting on its own cell.
    pub fn new(id: BlockId, position: GridPos) -> Self {
        Self {
            id,
            position,
            initial_position: position,
            layer: 0,
            parent: None,
            children: Vec::new(),
            collider_enabled: true,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    pub fn set_position(&mut self, position: GridPos) {
        self.position = position;
    }

    pub fn initial_position(&self) -> GridPos {
        self.initial_position
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }

    pub fn set_layer(&mut self, layer: u32) {
        self.layer = layer;
    }

    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<BlockId>) {
        self.parent = parent;
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn children(&self) -> &[BlockId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Most recently folded-on child.
    pub fn last_child(&self) -> Option<BlockId> {
        self.children.last().copied()
    }

    pub fn add_child(&mut self, child: BlockId) {
        self.children.push(child);
    }

    /// Remove `child` from the child list, preserving the order of the rest.
    ///
    /// Returns `false` if it was not a child.
    pub fn remove_child(&mut self, child: BlockId) -> bool {
        match self.children.iter().position(|&c| c == child) {
            Some(i) => {
                self.children.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn collider_enabled(&self) -> bool {
        self.collider_enabled
    }

    pub fn set_collider_enabled(&mut self, enabled: bool) {
        self.collider_enabled = enabled;
    }
}
