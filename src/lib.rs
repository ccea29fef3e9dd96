//! Rocket Boost - flight control and level flow for a thrust-and-land arcade game
//!
//! Core modules:
//! - `sim`: Deterministic per-tick logic (flight control, collision outcomes, timers)
//! - `platform`: Collaborator interfaces the host engine implements, plus headless backends
//! - `rig`: The set of collaborators attached to the ship
//! - `game`: Fixed-timestep loop glue and scene transitions
//! - `settings`: Data-driven per-level tuning

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod rig;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::Game;
pub use rig::{ShipRig, ShipRigBuilder};
pub use settings::{LevelSettings, OscillatorSettings, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics tick)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas above this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default main engine force
    pub const DEFAULT_THRUST_STRENGTH: f32 = 1000.0;
    /// Default rotation speed (radians per second)
    pub const DEFAULT_ROTATION_STRENGTH: f32 = 1.75;
    /// Seconds between a crash/landing and the scene change
    pub const DEFAULT_TRANSITION_DELAY: f32 = 2.0;
}

/// Unity-style ping-pong: rises from 0 to `length`, falls back, period `2 * length`
#[inline]
pub fn ping_pong(t: f32, length: f32) -> f32 {
    if length <= 0.0 {
        return 0.0;
    }
    let cycle = t.rem_euclid(length * 2.0);
    length - (cycle - length).abs()
}
