//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, engine sequencing, control protocol).
//!
//! # Grid Coordinates
//!
//! Blocks live on an integer `(x, z)` grid. Swipe directions map onto the grid as:
//!
//! | Direction | Offset |
//! |-----------|--------|
//! | `Right` | `(+1, 0)` |
//! | `Left` | `(-1, 0)` |
//! | `Up` | `(0, +1)` |
//! | `Down` | `(0, -1)` |
//!
//! `Up`/`Down` are board depth (`z`), not screen-vertical.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FOLD_ROTATION_MS` | 750 | Flip of a folding stack onto its target |
//! | `UNFOLD_ROTATION_MS` | 750 | Flip of an unfolding stack back off its parent |
//! | `UNFOLD_SETTLE_MS` | 200 | Slide of an unfolded stack back to its own cell |
//! | `REWIND_ROTATION_MS` | 150 | Flip used by each full-rewind step |
//! | `DEFAULT_COMPLETION_TIMEOUT_MS` | 2000 | Grace period before a missing completion is forced |
//!
//! # Examples
//!
//! ```
//! use fold_puzzle_types::{Direction, GridPos};
//!
//! let origin = GridPos::new(1, 0);
//! assert_eq!(origin.step(Direction::Left), GridPos::new(0, 0));
//! assert_eq!(origin.step(Direction::Up), GridPos::new(1, 1));
//!
//! assert_eq!(Direction::from_str("down"), Some(Direction::Down));
//! assert_eq!(Direction::Right.opposite(), Direction::Left);
//! ```

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Duration of the fold flip.
pub const FOLD_ROTATION_MS: u32 = 750;

/// Duration of the unfold flip.
pub const UNFOLD_ROTATION_MS: u32 = 750;

/// Duration of the slide back to the initial cell after an unfold flip.
pub const UNFOLD_SETTLE_MS: u32 = 200;

/// Duration of a single full-rewind step.
pub const REWIND_ROTATION_MS: u32 = 150;

/// Time a transition may overrun its nominal duration before the engine
/// settles it without a completion signal.
pub const DEFAULT_COMPLETION_TIMEOUT_MS: u32 = 2000;

/// Height offset added per moving block when a stack is lifted for a fold.
pub const FOLD_LIFT_PER_BLOCK: f32 = 0.05;


/// Swipe directions
///
/// The declaration order is also the fixed priority used whenever more than
/// one direction could apply (see [`Direction::PRIORITY`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Search order for rewind candidates and neighbor scans.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit grid offset `(dx, dz)`.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Parse direction from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "right" | "r", "left" | "l", "up" | "u", "down" | "d"
    ///
    /// # Examples
    ///
    /// ```
    /// use fold_puzzle_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("Right"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("l"), Some(Direction::Left));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "right" | "r" => Some(Direction::Right),
            "left" | "l" => Some(Direction::Left),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Integer grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPos {
    pub x: i32,
    pub z: i32,
}

impl GridPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The cell one unit away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dz) = direction.offset();
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// The four orthogonal neighbors, in [`Direction::PRIORITY`] order.
    pub fn neighbors(self) -> [GridPos; 4] {
        Direction::PRIORITY.map(|d| self.step(d))
    }

    /// Direction of an orthogonally adjacent cell, if `other` is one.
    pub fn direction_to(self, other: GridPos) -> Option<Direction> {
        Direction::PRIORITY
            .into_iter()
            .find(|&d| self.step(d) == other)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}

/// Stable index of a block inside its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl BlockId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
