//! Initialization errors
//!
//! Everything that can go wrong happens before the first tick: reading settings
//! and wiring collaborators to the ship. Ticks and contacts never fail.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("settings define no levels")]
    NoLevels,

    #[error("scene loader reports no scenes")]
    NoScenes,

    #[error("invalid tuning for level {level}: {reason}")]
    InvalidTuning { level: usize, reason: &'static str },

    #[error("ship rig is missing required component: {0}")]
    MissingComponent(&'static str),
}
