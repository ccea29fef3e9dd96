//! Contact resolution: what touching something does to the level
//!
//! Contact tags are strings at the engine boundary. They are classified once
//! into `CollisionOutcome` and matched exhaustively from then on. Anything the
//! classifier does not recognize is an obstacle.

use serde::{Deserialize, Serialize};

use super::flight;
use super::state::{ShipState, TuningParameters};
use super::transition::{TransitionKind, TransitionRequest};
use crate::audio::SoundEffect;
use crate::platform::Scheduler;
use crate::rig::ShipRig;

/// Tag on launch pads and other safe surfaces
pub const TAG_FRIENDLY: &str = "Friendly";
/// Tag on fuel pickups
pub const TAG_FUEL: &str = "Fuel";
/// Tag on the landing pad that completes the level
pub const TAG_FINISH: &str = "Finish";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    Harmless,
    Fuel,
    Goal,
    Obstacle,
}

impl CollisionOutcome {
    /// Classify a contact tag. Unknown tags crash the ship.
    pub fn classify(tag: &str) -> Self {
        match tag {
            TAG_FRIENDLY => CollisionOutcome::Harmless,
            TAG_FUEL => CollisionOutcome::Fuel,
            TAG_FINISH => CollisionOutcome::Goal,
            _ => CollisionOutcome::Obstacle,
        }
    }
}

/// Resolve one contact event.
///
/// Returns the transition this contact scheduled, if any. Only the first goal
/// or obstacle contact of a level instance schedules anything; it clears
/// `is_controllable`, which gates every contact after it.
pub fn on_collision(
    state: &mut ShipState,
    rig: &mut ShipRig,
    outcome: CollisionOutcome,
    tuning: &TuningParameters,
    scheduler: &mut dyn Scheduler,
) -> Option<TransitionRequest> {
    if !state.accepts_contacts() {
        return None;
    }

    match outcome {
        CollisionOutcome::Harmless => {
            log::debug!("Hit friendly");
            None
        }
        CollisionOutcome::Fuel => {
            // Fuel is not tracked yet
            log::debug!("Hit fuel");
            None
        }
        CollisionOutcome::Goal => Some(start_success_sequence(state, rig, tuning, scheduler)),
        CollisionOutcome::Obstacle => Some(start_crash_sequence(state, rig, tuning, scheduler)),
    }
}

fn start_success_sequence(
    state: &mut ShipState,
    rig: &mut ShipRig,
    tuning: &TuningParameters,
    scheduler: &mut dyn Scheduler,
) -> TransitionRequest {
    log::info!("Landed on finish pad");
    end_flight(
        state,
        rig,
        SoundEffect::Success,
        TransitionKind::Advance,
        tuning,
        scheduler,
    )
}

fn start_crash_sequence(
    state: &mut ShipState,
    rig: &mut ShipRig,
    tuning: &TuningParameters,
    scheduler: &mut dyn Scheduler,
) -> TransitionRequest {
    log::info!("Ship crashed");
    end_flight(
        state,
        rig,
        SoundEffect::Crash,
        TransitionKind::Reload,
        tuning,
        scheduler,
    )
}

fn end_flight(
    state: &mut ShipState,
    rig: &mut ShipRig,
    sound: SoundEffect,
    kind: TransitionKind,
    tuning: &TuningParameters,
    scheduler: &mut dyn Scheduler,
) -> TransitionRequest {
    state.is_controllable = false;

    rig.audio.stop();
    rig.audio.play_one_shot(sound);
    match kind {
        TransitionKind::Advance => rig.success_particles.play(),
        TransitionKind::Reload => rig.crash_particles.play(),
    }
    flight::disable(state, rig);

    let request = TransitionRequest::new(kind, tuning.transition_delay_seconds);
    scheduler.after(request.delay_seconds, request.kind);
    state.pending_transition = Some(request);
    log::info!(
        "{:?} scheduled in {:.2}s",
        request.kind,
        request.delay_seconds
    );
    request
}
