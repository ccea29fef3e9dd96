//! Scene transitions requested by the collision outcome

use serde::{Deserialize, Serialize};

/// What happens to the level when the transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Load the current level again (after a crash)
    Reload,
    /// Load the next level, wrapping to the first after the last
    Advance,
}

/// A one-shot scheduled scene change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub kind: TransitionKind,
    pub delay_seconds: f32,
}

impl TransitionRequest {
    pub fn new(kind: TransitionKind, delay_seconds: f32) -> Self {
        Self {
            kind,
            delay_seconds,
        }
    }
}

impl TransitionKind {
    /// Scene index to load, given the active scene and the number of scenes
    pub fn target_index(self, current: usize, total: usize) -> usize {
        match self {
            TransitionKind::Reload => current,
            TransitionKind::Advance => next_level_index(current, total),
        }
    }
}

/// Index after `current`, wrapping to 0 past the last scene
pub fn next_level_index(current: usize, total: usize) -> usize {
    let next = current + 1;
    if next >= total { 0 } else { next }
}
