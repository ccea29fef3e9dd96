//! Ship state and tuning
//!
//! `ShipState` belongs to one level instance. It is rebuilt from scratch every
//! time a level is loaded, so nothing here survives a reload.

use serde::{Deserialize, Serialize};

use super::transition::{TransitionKind, TransitionRequest};
use crate::consts::*;

/// Which side thruster is firing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationDirection {
    #[default]
    None,
    Left,
    Right,
}

impl RotationDirection {
    /// Map a signed rotation axis to a direction (positive = right)
    pub fn from_axis(axis: f32) -> Self {
        if axis > 0.0 {
            RotationDirection::Right
        } else if axis < 0.0 {
            RotationDirection::Left
        } else {
            RotationDirection::None
        }
    }
}

/// Where the level instance is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    /// Player has control
    Flying,
    /// Landed on the finish pad, waiting to advance
    Succeeding,
    /// Hit an obstacle, waiting to reload
    Crashing,
}

/// Per-level tuning, read-only to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningParameters {
    /// Main engine force, scaled by the tick length
    pub thrust_strength: f32,
    /// Rotation speed in radians per second
    pub rotation_strength: f32,
    /// Seconds between a crash/landing and the scene change
    pub transition_delay_seconds: f32,
}

impl Default for TuningParameters {
    fn default() -> Self {
        Self {
            thrust_strength: DEFAULT_THRUST_STRENGTH,
            rotation_strength: DEFAULT_ROTATION_STRENGTH,
            transition_delay_seconds: DEFAULT_TRANSITION_DELAY,
        }
    }
}

impl TuningParameters {
    /// Reason the tuning is unusable, if any
    pub fn problem(&self) -> Option<&'static str> {
        if !self.thrust_strength.is_finite() || self.thrust_strength < 0.0 {
            return Some("thrust_strength must be a finite, non-negative number");
        }
        if !self.rotation_strength.is_finite() || self.rotation_strength < 0.0 {
            return Some("rotation_strength must be a finite, non-negative number");
        }
        if !self.transition_delay_seconds.is_finite() || self.transition_delay_seconds < 0.0 {
            return Some("transition_delay_seconds must be a finite, non-negative number");
        }
        None
    }
}

/// Mutable ship state for one level instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipState {
    /// Cleared by the first goal/obstacle contact; gates every later contact
    pub is_controllable: bool,
    /// Debug toggle: when false the ship passes through everything
    pub is_collidable: bool,
    /// Whether the flight controller is still being ticked
    pub flight_enabled: bool,
    /// Main engine currently firing
    pub thrust_active: bool,
    /// Side thruster currently firing
    pub rotation_direction: RotationDirection,
    /// The one transition this level instance will ever schedule
    pub pending_transition: Option<TransitionRequest>,
}

impl Default for ShipState {
    fn default() -> Self {
        Self {
            is_controllable: true,
            is_collidable: true,
            flight_enabled: true,
            thrust_active: false,
            rotation_direction: RotationDirection::None,
            pending_transition: None,
        }
    }
}

impl ShipState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FlightPhase {
        match self.pending_transition {
            None => FlightPhase::Flying,
            Some(TransitionRequest {
                kind: TransitionKind::Advance,
                ..
            }) => FlightPhase::Succeeding,
            Some(TransitionRequest {
                kind: TransitionKind::Reload,
                ..
            }) => FlightPhase::Crashing,
        }
    }

    /// Contacts are only resolved while both guards hold
    pub fn accepts_contacts(&self) -> bool {
        self.is_controllable && self.is_collidable
    }

    /// Flip the debug collidability toggle, returning the new value
    pub fn toggle_collidable(&mut self) -> bool {
        self.is_collidable = !self.is_collidable;
        self.is_collidable
    }
}
