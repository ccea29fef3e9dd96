//! Deterministic simulation module
//!
//! All flight and level-outcome logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Side effects only through the `platform` traits
//! - No engine types or globals

pub mod collision;
pub mod flight;
pub mod oscillator;
pub mod state;
pub mod timer;
pub mod transition;

pub use collision::{CollisionOutcome, TAG_FINISH, TAG_FRIENDLY, TAG_FUEL, on_collision};
pub use flight::FlightInput;
pub use oscillator::Oscillator;
pub use state::{FlightPhase, RotationDirection, ShipState, TuningParameters};
pub use timer::TimerQueue;
pub use transition::{TransitionKind, TransitionRequest, next_level_index};
