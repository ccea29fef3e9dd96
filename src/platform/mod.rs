//! Platform abstraction layer
//!
//! The host engine owns physics, audio, particles, scenes and input devices.
//! The simulation only talks to them through these traits:
//! - `PhysicsBody`: the ship's rigid body
//! - `AudioChannel`: the ship's single audio source
//! - `ParticleEmitter`: one particle system (engine, thrusters, crash, success)
//! - `SceneLoader`: level indices in build order
//! - `InputSource`: flight controls and hotkeys
//! - `Scheduler`: one-shot delayed callbacks on the simulation thread
//!
//! `headless` implements all of them in memory for tests and the native binary.

pub mod headless;

use glam::Vec3;

use crate::audio::SoundEffect;
use crate::sim::TransitionKind;

/// Ship's local "up" (main engine direction)
pub const LOCAL_UP: Vec3 = Vec3::Y;
/// Ship's local "forward" (rotation axis for a side-scrolling ship)
pub const LOCAL_FORWARD: Vec3 = Vec3::Z;

pub trait PhysicsBody {
    /// Push the body along `direction` in its own frame
    fn apply_local_force(&mut self, direction: Vec3, magnitude: f32);
    /// Rotate the body by `angle_delta` radians around `axis` in its own frame
    fn apply_incremental_rotation(&mut self, axis: Vec3, angle_delta: f32);
    /// Stop the physics solver from integrating angular velocity
    fn set_angular_integration_frozen(&mut self, frozen: bool);
}

pub trait AudioChannel {
    fn play_looping(&mut self, clip: SoundEffect);
    fn play_one_shot(&mut self, clip: SoundEffect);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

pub trait ParticleEmitter {
    fn play(&mut self);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

pub trait SceneLoader {
    fn current_index(&self) -> usize;
    fn total_count(&self) -> usize;
    fn load(&mut self, index: usize);
}

/// Keys polled once per frame outside of flight control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotKey {
    /// Debug: jump to the next level
    SkipLevel,
    /// Debug: fly through obstacles
    ToggleCollision,
    /// Close the game
    Quit,
}

pub trait InputSource {
    fn thrust_held(&self) -> bool;
    /// Rotation in [-1, 1], positive turns right
    fn rotation_axis(&self) -> f32;
    fn key_held(&self, key: HotKey) -> bool;
    /// True only on the frame the key went down
    fn key_pressed(&self, key: HotKey) -> bool;
    /// Forget per-frame edges. Called once the frame's input has been consumed.
    fn end_frame(&mut self) {}
}

/// Single-threaded one-shot scheduler for level transitions
pub trait Scheduler {
    fn after(&mut self, seconds: f32, kind: TransitionKind);
}
