//! Rocket Boost entry point
//!
//! The real game runs inside a host engine that implements the platform
//! traits. This binary wires the headless backends together and flies a short
//! scripted run, which is handy for checking settings files and log output.

use rocket_boost::audio::AudioMixer;
use rocket_boost::consts::SIM_DT;
use rocket_boost::platform::headless::{
    HeadlessBody, HeadlessEmitter, HeadlessScenes, ScriptedInput,
};
use rocket_boost::sim::{TAG_FINISH, TAG_FRIENDLY};
use rocket_boost::{ConfigError, Game, Settings, ShipRig};

/// Longest the demo waits for the level transition
const MAX_DEMO_SECONDS: f32 = 30.0;

fn main() {
    env_logger::init();
    log::info!("Rocket Boost (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ConfigError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut mixer = AudioMixer::new();
    mixer.apply_settings(&settings);

    let body = HeadlessBody::new();
    let rig = ShipRig::builder()
        .body(body.clone())
        .audio(mixer.clone())
        .main_engine(HeadlessEmitter::new())
        .left_thruster(HeadlessEmitter::new())
        .right_thruster(HeadlessEmitter::new())
        .success_particles(HeadlessEmitter::new())
        .crash_particles(HeadlessEmitter::new())
        .build()?;

    let scenes = HeadlessScenes::new(settings.levels.len());
    let input = ScriptedInput::new();
    let mut game = Game::new(settings, rig, scenes.clone(), input.clone())?;
    let start_level = game.level_index();

    // Lift off, lean right, then level out
    input.set_thrust(true);
    fly(&mut game, 1.0);
    input.set_rotation(1.0);
    fly(&mut game, 0.5);
    input.set_rotation(0.0);
    input.set_thrust(false);
    fly(&mut game, 0.5);
    log::info!(
        "Flight done: force {:?}, roll {:.2} rad",
        body.total_force(),
        body.roll()
    );

    game.on_collision(TAG_FRIENDLY);
    game.on_collision(TAG_FINISH);

    let mut waited = 0.0;
    while scenes.loads().is_empty() && waited < MAX_DEMO_SECONDS {
        game.update(SIM_DT);
        waited += SIM_DT;
    }

    log::info!(
        "Level {} -> {} after {:.2}s ({} ticks, {} sounds)",
        start_level,
        game.level_index(),
        waited,
        game.ticks(),
        mixer.history().len()
    );
    Ok(())
}

fn fly(game: &mut Game, seconds: f32) {
    let frames = (seconds / SIM_DT).round() as u32;
    for _ in 0..frames {
        game.update(SIM_DT);
    }
}
