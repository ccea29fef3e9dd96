//! Flight control: thrust and rotation, once per fixed tick
//!
//! Visual and audio effects are edge-triggered. Starting the engine while it
//! is already running, or a thruster that is already firing, does nothing.

use super::state::{RotationDirection, ShipState, TuningParameters};
use crate::audio::SoundEffect;
use crate::platform::{InputSource, LOCAL_FORWARD, LOCAL_UP};
use crate::rig::ShipRig;

/// Flight controls sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightInput {
    /// Main engine button held
    pub thrust: bool,
    /// Signed rotation, positive turns right
    pub rotation: f32,
}

impl FlightInput {
    pub fn sample(source: &dyn InputSource) -> Self {
        Self {
            thrust: source.thrust_held(),
            rotation: source.rotation_axis(),
        }
    }
}

/// Advance flight control by one fixed timestep
pub fn tick(
    state: &mut ShipState,
    rig: &mut ShipRig,
    input: &FlightInput,
    tuning: &TuningParameters,
    dt: f32,
) {
    if !state.flight_enabled {
        return;
    }
    process_thrust(state, rig, input.thrust, tuning, dt);
    process_rotation(state, rig, input.rotation, tuning, dt);
}

/// Stop flight control and the emitters it was driving.
///
/// The audio channel is left alone: it is shared with the crash and success
/// sounds, which the caller owns.
pub fn disable(state: &mut ShipState, rig: &mut ShipRig) {
    if !state.flight_enabled {
        return;
    }
    state.flight_enabled = false;
    if state.thrust_active {
        state.thrust_active = false;
        if rig.main_engine.is_playing() {
            rig.main_engine.stop();
        }
    }
    set_rotation_effects(state, rig, RotationDirection::None);
    log::debug!("Flight control disabled");
}

fn process_thrust(
    state: &mut ShipState,
    rig: &mut ShipRig,
    held: bool,
    tuning: &TuningParameters,
    dt: f32,
) {
    if held {
        rig.body.apply_local_force(LOCAL_UP, tuning.thrust_strength * dt);
        start_thrusting(state, rig);
    } else {
        stop_thrusting(state, rig);
    }
}

fn start_thrusting(state: &mut ShipState, rig: &mut ShipRig) {
    if state.thrust_active {
        return;
    }
    state.thrust_active = true;
    if !rig.audio.is_playing() {
        rig.audio.play_looping(SoundEffect::MainEngine);
    }
    if !rig.main_engine.is_playing() {
        rig.main_engine.play();
    }
}

fn stop_thrusting(state: &mut ShipState, rig: &mut ShipRig) {
    if !state.thrust_active {
        return;
    }
    state.thrust_active = false;
    rig.audio.stop();
    rig.main_engine.stop();
}

fn process_rotation(
    state: &mut ShipState,
    rig: &mut ShipRig,
    axis: f32,
    tuning: &TuningParameters,
    dt: f32,
) {
    let direction = RotationDirection::from_axis(axis);
    let step = tuning.rotation_strength * dt;
    match direction {
        // Right is clockwise when looking down the forward axis
        RotationDirection::Right => apply_rotation(rig, -step),
        RotationDirection::Left => apply_rotation(rig, step),
        RotationDirection::None => {}
    }
    set_rotation_effects(state, rig, direction);
}

/// Rotate with the solver's angular integration frozen so the manual turn wins
fn apply_rotation(rig: &mut ShipRig, angle_delta: f32) {
    rig.body.set_angular_integration_frozen(true);
    rig.body.apply_incremental_rotation(LOCAL_FORWARD, angle_delta);
    rig.body.set_angular_integration_frozen(false);
}

fn set_rotation_effects(state: &mut ShipState, rig: &mut ShipRig, direction: RotationDirection) {
    if state.rotation_direction == direction {
        return;
    }
    state.rotation_direction = direction;

    let (active, opposite) = match direction {
        RotationDirection::Right => (&mut rig.right_thruster, &mut rig.left_thruster),
        RotationDirection::Left => (&mut rig.left_thruster, &mut rig.right_thruster),
        RotationDirection::None => {
            for thruster in [&mut rig.left_thruster, &mut rig.right_thruster] {
                if thruster.is_playing() {
                    thruster.stop();
                }
            }
            return;
        }
    };

    if opposite.is_playing() {
        opposite.stop();
    }
    if !active.is_playing() {
        active.play();
    }
}
