//! Moving obstacles that sweep back and forth along a fixed vector

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::ping_pong;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub start: Vec3,
    /// Offset from `start` to the far end of the sweep
    pub movement: Vec3,
    /// Sweeps per second in one direction
    pub speed: f32,
    /// Last computed position
    pub position: Vec3,
}

impl Oscillator {
    pub fn new(start: Vec3, movement: Vec3, speed: f32) -> Self {
        Self {
            start,
            movement,
            speed,
            position: start,
        }
    }

    pub fn end(&self) -> Vec3 {
        self.start + self.movement
    }

    /// Position at `elapsed` seconds into the level
    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        let factor = ping_pong(elapsed * self.speed, 1.0);
        self.start.lerp(self.end(), factor)
    }

    pub fn update(&mut self, elapsed: f32) {
        self.position = self.position_at(elapsed);
    }
}
