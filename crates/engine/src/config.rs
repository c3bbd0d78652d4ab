use crate::types::{
    DEFAULT_COMPLETION_TIMEOUT_MS, FOLD_ROTATION_MS, REWIND_ROTATION_MS, UNFOLD_ROTATION_MS,
    UNFOLD_SETTLE_MS,
};

/// Who signals that a transition has finished playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMode {
    /// An animation collaborator calls [`LevelController::complete`](crate::LevelController::complete).
    /// `tick` only forces completion after the timeout.
    External,
    /// No presentation layer: `tick` settles a transition as soon as its
    /// nominal duration has elapsed.
    Clock,
}

/// Engine timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub fold_rotation_ms: u32,
    pub unfold_rotation_ms: u32,
    pub unfold_settle_ms: u32,
    pub rewind_rotation_ms: u32,
    /// Overrun allowed past a transition's duration before it is settled
    /// without a completion signal.
    pub completion_timeout_ms: u32,
    pub completion: CompletionMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fold_rotation_ms: FOLD_ROTATION_MS,
            unfold_rotation_ms: UNFOLD_ROTATION_MS,
            unfold_settle_ms: UNFOLD_SETTLE_MS,
            rewind_rotation_ms: REWIND_ROTATION_MS,
            completion_timeout_ms: DEFAULT_COMPLETION_TIMEOUT_MS,
            completion: CompletionMode::External,
        }
    }
}

impl EngineConfig {
    /// Defaults with clock-driven completion.
    pub fn clocked() -> Self {
        Self {
            completion: CompletionMode::Clock,
            ..Self::default()
        }
    }

    pub fn with_completion_timeout_ms(mut self, ms: u32) -> Self {
        self.completion_timeout_ms = ms;
        self
    }
}
