//! In-memory collaborators
//!
//! Each type is a cheap handle around shared state: keep a clone, hand the
//! other to the rig, and inspect what the simulation did through the clone.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use glam::{Quat, Vec3};

use super::{HotKey, InputSource, ParticleEmitter, PhysicsBody, SceneLoader};

#[derive(Debug)]
struct BodyState {
    orientation: Quat,
    /// Sum of all forces applied, in world space
    total_force: Vec3,
    force_calls: u32,
    angular_frozen: bool,
    /// Rotations that arrived while the solver was still integrating
    unfrozen_rotations: u32,
}

/// Rigid body that integrates nothing; it only accumulates what was applied
#[derive(Debug, Clone)]
pub struct HeadlessBody {
    inner: Rc<RefCell<BodyState>>,
}

impl Default for HeadlessBody {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBody {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(BodyState {
                orientation: Quat::IDENTITY,
                total_force: Vec3::ZERO,
                force_calls: 0,
                angular_frozen: false,
                unfrozen_rotations: 0,
            })),
        }
    }

    pub fn orientation(&self) -> Quat {
        self.inner.borrow().orientation
    }

    pub fn total_force(&self) -> Vec3 {
        self.inner.borrow().total_force
    }

    pub fn force_calls(&self) -> u32 {
        self.inner.borrow().force_calls
    }

    pub fn angular_frozen(&self) -> bool {
        self.inner.borrow().angular_frozen
    }

    pub fn unfrozen_rotations(&self) -> u32 {
        self.inner.borrow().unfrozen_rotations
    }

    /// Signed roll around the forward axis, radians
    pub fn roll(&self) -> f32 {
        let (axis, angle) = self.orientation().to_axis_angle();
        if axis.dot(Vec3::Z) < 0.0 { -angle } else { angle }
    }
}

impl PhysicsBody for HeadlessBody {
    fn apply_local_force(&mut self, direction: Vec3, magnitude: f32) {
        let mut inner = self.inner.borrow_mut();
        let world = inner.orientation * (direction * magnitude);
        inner.total_force += world;
        inner.force_calls += 1;
    }

    fn apply_incremental_rotation(&mut self, axis: Vec3, angle_delta: f32) {
        let mut inner = self.inner.borrow_mut();
        if !inner.angular_frozen {
            inner.unfrozen_rotations += 1;
        }
        let delta = Quat::from_axis_angle(axis.normalize_or_zero(), angle_delta);
        inner.orientation = (inner.orientation * delta).normalize();
    }

    fn set_angular_integration_frozen(&mut self, frozen: bool) {
        self.inner.borrow_mut().angular_frozen = frozen;
    }
}

#[derive(Debug, Default)]
struct EmitterState {
    playing: bool,
    play_calls: u32,
    stop_calls: u32,
}

/// Particle system that only remembers whether it is emitting
#[derive(Debug, Clone, Default)]
pub struct HeadlessEmitter {
    inner: Rc<RefCell<EmitterState>>,
}

impl HeadlessEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play_calls(&self) -> u32 {
        self.inner.borrow().play_calls
    }

    pub fn stop_calls(&self) -> u32 {
        self.inner.borrow().stop_calls
    }
}

impl ParticleEmitter for HeadlessEmitter {
    fn play(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.playing = true;
        inner.play_calls += 1;
    }

    fn stop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.playing = false;
        inner.stop_calls += 1;
    }

    fn is_playing(&self) -> bool {
        self.inner.borrow().playing
    }
}

#[derive(Debug)]
struct SceneState {
    current: usize,
    total: usize,
    loads: Vec<usize>,
}

/// Level list that records every load request
#[derive(Debug, Clone)]
pub struct HeadlessScenes {
    inner: Rc<RefCell<SceneState>>,
}

impl HeadlessScenes {
    pub fn new(total: usize) -> Self {
        Self::starting_at(0, total)
    }

    pub fn starting_at(current: usize, total: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SceneState {
                current,
                total,
                loads: Vec::new(),
            })),
        }
    }

    /// Every index passed to `load`, oldest first
    pub fn loads(&self) -> Vec<usize> {
        self.inner.borrow().loads.clone()
    }
}

impl SceneLoader for HeadlessScenes {
    fn current_index(&self) -> usize {
        self.inner.borrow().current
    }

    fn total_count(&self) -> usize {
        self.inner.borrow().total
    }

    fn load(&mut self, index: usize) {
        let mut inner = self.inner.borrow_mut();
        inner.current = index;
        inner.loads.push(index);
    }
}

#[derive(Debug, Default)]
struct InputStateInner {
    thrust: bool,
    rotation: f32,
    held: HashSet<HotKey>,
    pressed: HashSet<HotKey>,
}

/// Input driven by code instead of devices
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inner: Rc<RefCell<InputStateInner>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_thrust(&self, held: bool) {
        self.inner.borrow_mut().thrust = held;
    }

    pub fn set_rotation(&self, axis: f32) {
        self.inner.borrow_mut().rotation = axis.clamp(-1.0, 1.0);
    }

    /// Key goes down this frame and stays held until `release`
    pub fn press(&self, key: HotKey) {
        let mut inner = self.inner.borrow_mut();
        if inner.held.insert(key) {
            inner.pressed.insert(key);
        }
    }

    pub fn release(&self, key: HotKey) {
        self.inner.borrow_mut().held.remove(&key);
    }
}

impl InputSource for ScriptedInput {
    fn thrust_held(&self) -> bool {
        self.inner.borrow().thrust
    }

    fn rotation_axis(&self) -> f32 {
        self.inner.borrow().rotation
    }

    fn key_held(&self, key: HotKey) -> bool {
        self.inner.borrow().held.contains(&key)
    }

    fn key_pressed(&self, key: HotKey) -> bool {
        self.inner.borrow().pressed.contains(&key)
    }

    fn end_frame(&mut self) {
        self.inner.borrow_mut().pressed.clear();
    }
}
