//! Game loop glue
//!
//! `Game` owns one level instance at a time and sits between the host engine
//! and the pure simulation: the host calls `update` every rendered frame and
//! `on_collision` for every contact, and `Game` turns those into fixed ticks,
//! timer callbacks and scene loads.

use crate::consts::*;
use crate::error::ConfigError;
use crate::platform::{HotKey, InputSource, SceneLoader};
use crate::rig::ShipRig;
use crate::settings::Settings;
use crate::sim::{
    CollisionOutcome, FlightInput, Oscillator, ShipState, TimerQueue, TransitionKind,
    TransitionRequest, TuningParameters, collision, flight, next_level_index,
};

pub struct Game {
    settings: Settings,
    rig: ShipRig,
    scenes: Box<dyn SceneLoader>,
    input: Box<dyn InputSource>,
    ship: ShipState,
    tuning: TuningParameters,
    timers: TimerQueue<TransitionKind>,
    oscillators: Vec<Oscillator>,
    accumulator: f32,
    /// Seconds since the current level was loaded
    level_time: f32,
    ticks: u64,
    quit_requested: bool,
}

impl Game {
    /// Wire a game to its collaborators. The scene loader's current level is
    /// taken as already loaded.
    pub fn new(
        settings: Settings,
        rig: ShipRig,
        scenes: impl SceneLoader + 'static,
        input: impl InputSource + 'static,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        if scenes.total_count() == 0 {
            return Err(ConfigError::NoScenes);
        }
        if scenes.total_count() != settings.levels.len() {
            log::warn!(
                "Scene count ({}) differs from configured levels ({}); missing levels use default tuning",
                scenes.total_count(),
                settings.levels.len()
            );
        }

        let level = scenes.current_index();
        let mut game = Self {
            settings,
            rig,
            scenes: Box::new(scenes),
            input: Box::new(input),
            ship: ShipState::new(),
            tuning: TuningParameters::default(),
            timers: TimerQueue::new(),
            oscillators: Vec::new(),
            accumulator: 0.0,
            level_time: 0.0,
            ticks: 0,
            quit_requested: false,
        };
        game.reset_level(level);
        Ok(game)
    }

    /// Run one rendered frame: hotkeys first, then as many fixed ticks as fit.
    /// Returns the number of ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        // A NaN frame would poison the accumulator for the rest of the run
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.handle_hotkeys();

        self.accumulator += frame_dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.fixed_update(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.level_time += frame_dt;
        for oscillator in &mut self.oscillators {
            oscillator.update(self.level_time);
        }

        self.input.end_frame();
        substeps
    }

    /// One fixed simulation tick
    pub fn fixed_update(&mut self, dt: f32) {
        self.ticks += 1;

        if self.ship.flight_enabled {
            let input = FlightInput::sample(self.input.as_ref());
            flight::tick(&mut self.ship, &mut self.rig, &input, &self.tuning, dt);
        }

        // At most one transition exists per level, and firing it replaces the level
        if let Some(&kind) = self.timers.tick().first() {
            self.resolve_transition(kind);
        }
    }

    /// Contact reported by the physics engine, tagged with the other entity's label
    pub fn on_collision(&mut self, tag: &str) -> Option<TransitionRequest> {
        let outcome = CollisionOutcome::classify(tag);
        log::debug!("Contact with {tag:?} classified as {outcome:?}");
        collision::on_collision(
            &mut self.ship,
            &mut self.rig,
            outcome,
            &self.tuning,
            &mut self.timers,
        )
    }

    /// Debug: load the next level right away
    pub fn skip_level(&mut self) {
        let target = next_level_index(self.scenes.current_index(), self.scenes.total_count());
        log::info!("Skipping to level {target}");
        self.load_level(target);
    }

    fn handle_hotkeys(&mut self) {
        if self.input.key_held(HotKey::Quit) && !self.quit_requested {
            self.quit_requested = true;
            log::info!("Exited application");
        }

        if !self.settings.debug_keys {
            return;
        }
        if self.input.key_pressed(HotKey::SkipLevel) {
            self.skip_level();
        } else if self.input.key_pressed(HotKey::ToggleCollision) {
            let collidable = self.ship.toggle_collidable();
            log::info!("Collisions {}", if collidable { "enabled" } else { "disabled" });
        }
    }

    fn resolve_transition(&mut self, kind: TransitionKind) {
        let current = self.scenes.current_index();
        let target = kind.target_index(current, self.scenes.total_count());
        log::info!("{kind:?}: level {current} -> {target}");
        self.load_level(target);
    }

    fn load_level(&mut self, index: usize) {
        self.scenes.load(index);
        self.reset_level(index);
    }

    /// Start a fresh level instance; nothing from the previous one survives
    fn reset_level(&mut self, index: usize) {
        self.ship = ShipState::new();
        self.timers.clear();
        self.rig.reset();
        self.tuning = self.settings.tuning_for(index);
        self.oscillators = self.settings.oscillators_for(index);
        self.level_time = 0.0;
        for oscillator in &mut self.oscillators {
            oscillator.update(0.0);
        }

        let name = self
            .settings
            .levels
            .get(index)
            .map(|l| l.name.as_str())
            .unwrap_or("unnamed");
        log::info!("Level {index} ({name}) loaded");
    }

    pub fn ship(&self) -> &ShipState {
        &self.ship
    }

    pub fn tuning(&self) -> &TuningParameters {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn level_index(&self) -> usize {
        self.scenes.current_index()
    }

    pub fn level_time(&self) -> f32 {
        self.level_time
    }

    pub fn oscillators(&self) -> &[Oscillator] {
        &self.oscillators
    }

    pub fn pending_transitions(&self) -> usize {
        self.timers.len()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::platform::headless::{HeadlessScenes, ScriptedInput};
    use crate::platform::{AudioChannel, ParticleEmitter};
    use crate::rig::test_support::{RigProbe, headless_rig};
    use crate::settings::{LevelSettings, OscillatorSettings};
    use crate::sim::FlightPhase;
    use glam::Vec3;

    fn three_levels(delay: f32) -> Settings {
        let level = |name: &str| LevelSettings {
            name: name.to_string(),
            tuning: TuningParameters {
                transition_delay_seconds: delay,
                ..Default::default()
            },
            oscillators: Vec::new(),
        };
        Settings {
            levels: vec![level("one"), level("two"), level("three")],
            debug_keys: true,
            ..Default::default()
        }
    }

    fn game_at(level: usize, settings: Settings) -> (Game, RigProbe, HeadlessScenes, ScriptedInput) {
        let (rig, probe) = headless_rig();
        let scenes = HeadlessScenes::starting_at(level, settings.levels.len());
        let input = ScriptedInput::new();
        let game = Game::new(settings, rig, scenes.clone(), input.clone()).unwrap();
        (game, probe, scenes, input)
    }

    fn run_ticks(game: &mut Game, n: usize) {
        for _ in 0..n {
            game.fixed_update(SIM_DT);
        }
    }

    #[test]
    fn test_finish_advances_after_delay() {
        let (mut game, _probe, scenes, _input) = game_at(0, three_levels(0.1));

        assert!(game.on_collision("Finish").is_some());
        assert_eq!(game.ship().phase(), FlightPhase::Succeeding);

        run_ticks(&mut game, 3);
        assert!(scenes.loads().is_empty());

        run_ticks(&mut game, 4);
        assert_eq!(scenes.loads(), vec![1]);
        assert_eq!(game.level_index(), 1);
        assert_eq!(*game.ship(), ShipState::new());
        assert_eq!(game.pending_transitions(), 0);
    }

    #[test]
    fn test_crash_reloads_same_level() {
        let (mut game, probe, scenes, _input) = game_at(2, three_levels(0.1));

        assert!(game.on_collision("Terrain").is_some());
        assert!(probe.crash_particles.is_playing());
        run_ticks(&mut game, 10);

        assert_eq!(scenes.loads(), vec![2]);
        assert_eq!(game.ship().phase(), FlightPhase::Flying);
        // Fresh scene: the crash effect is gone
        assert!(!probe.crash_particles.is_playing());
    }

    #[test]
    fn test_finish_on_last_level_wraps_to_first() {
        let (mut game, _probe, scenes, _input) = game_at(2, three_levels(0.0));
        game.on_collision("Finish");
        run_ticks(&mut game, 1);
        assert_eq!(scenes.loads(), vec![0]);
    }

    #[test]
    fn test_later_contacts_schedule_nothing() {
        let (mut game, probe, scenes, _input) = game_at(0, three_levels(0.1));

        assert!(game.on_collision("Finish").is_some());
        run_ticks(&mut game, 1);
        assert!(game.on_collision("Finish").is_none());
        assert!(game.on_collision("Rock").is_none());
        assert_eq!(game.pending_transitions(), 1);

        run_ticks(&mut game, 20);
        assert_eq!(scenes.loads(), vec![1]);
        assert_eq!(probe.audio.play_count(SoundEffect::Success), 1);
        assert_eq!(probe.audio.play_count(SoundEffect::Crash), 0);
    }

    #[test]
    fn test_update_flies_from_input() {
        let (mut game, probe, _scenes, input) = game_at(0, three_levels(2.0));
        input.set_thrust(true);

        let substeps = game.update(SIM_DT);
        assert_eq!(substeps, 1);
        assert_eq!(probe.body.force_calls(), 1);
        assert!(game.ship().thrust_active);
        assert!(probe.audio.is_playing());

        input.set_thrust(false);
        game.update(SIM_DT);
        assert!(!game.ship().thrust_active);
        assert!(!probe.main_engine.is_playing());
    }

    #[test]
    fn test_no_flight_after_crash() {
        let (mut game, probe, _scenes, input) = game_at(0, three_levels(2.0));
        game.on_collision("Rock");
        input.set_thrust(true);
        input.set_rotation(1.0);
        run_ticks(&mut game, 5);
        assert_eq!(probe.body.force_calls(), 0);
        assert_eq!(probe.right_thruster.play_calls(), 0);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let (mut game, _probe, _scenes, _input) = game_at(0, three_levels(2.0));
        let substeps = game.update(1.0);
        assert!(substeps >= 4 && substeps <= 5);
        assert!((game.level_time() - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_skip_key_loads_next_level_even_while_pending() {
        let (mut game, _probe, scenes, input) = game_at(1, three_levels(0.1));
        game.on_collision("Rock");

        input.press(HotKey::SkipLevel);
        game.update(0.0);
        assert_eq!(scenes.loads(), vec![2]);
        assert_eq!(game.pending_transitions(), 0);

        // Held key is not a new press
        game.update(0.0);
        assert_eq!(scenes.loads(), vec![2]);

        run_ticks(&mut game, 20);
        assert_eq!(scenes.loads(), vec![2]);
    }

    #[test]
    fn test_skip_key_ignored_without_debug_keys() {
        let mut settings = three_levels(0.1);
        settings.debug_keys = false;
        let (mut game, _probe, scenes, input) = game_at(0, settings);

        input.press(HotKey::SkipLevel);
        input.press(HotKey::ToggleCollision);
        game.update(0.0);
        assert!(scenes.loads().is_empty());
        assert!(game.ship().is_collidable);
    }

    #[test]
    fn test_toggle_collision_key() {
        let (mut game, _probe, _scenes, input) = game_at(0, three_levels(0.1));

        input.press(HotKey::ToggleCollision);
        game.update(0.0);
        assert!(!game.ship().is_collidable);
        assert!(game.on_collision("Rock").is_none());

        input.release(HotKey::ToggleCollision);
        input.press(HotKey::ToggleCollision);
        game.update(0.0);
        assert!(game.ship().is_collidable);
        assert!(game.on_collision("Rock").is_some());
    }

    #[test]
    fn test_toggle_resets_on_level_load() {
        let (mut game, _probe, _scenes, input) = game_at(0, three_levels(0.1));
        input.press(HotKey::ToggleCollision);
        game.update(0.0);
        assert!(!game.ship().is_collidable);

        game.skip_level();
        assert!(game.ship().is_collidable);
    }

    #[test]
    fn test_quit_key_works_without_debug_keys() {
        let mut settings = three_levels(0.1);
        settings.debug_keys = false;
        let (mut game, _probe, _scenes, input) = game_at(0, settings);

        assert!(!game.is_quit_requested());
        input.press(HotKey::Quit);
        game.update(0.0);
        assert!(game.is_quit_requested());
    }

    #[test]
    fn test_level_tuning_and_oscillators_follow_level() {
        let mut settings = three_levels(0.0);
        settings.levels[1].tuning.thrust_strength = 5.0;
        settings.levels[1].oscillators.push(OscillatorSettings {
            start: Vec3::ZERO,
            movement: Vec3::new(0.0, 2.0, 0.0),
            speed: 1.0,
        });
        let (mut game, _probe, _scenes, _input) = game_at(0, settings);
        assert!(game.oscillators().is_empty());

        game.skip_level();
        assert_eq!(game.tuning().thrust_strength, 5.0);
        assert_eq!(game.oscillators().len(), 1);
        assert_eq!(game.oscillators()[0].position, Vec3::ZERO);

        for _ in 0..25 {
            game.update(SIM_DT);
        }
        // Half a sweep in
        assert!((game.oscillators()[0].position.y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let (rig, _probe) = headless_rig();
        let settings = Settings {
            levels: Vec::new(),
            ..Default::default()
        };
        let result = Game::new(settings, rig, HeadlessScenes::new(1), ScriptedInput::new());
        assert!(matches!(result, Err(ConfigError::NoLevels)));
    }

    #[test]
    fn test_empty_scene_loader_rejected() {
        let (rig, _probe) = headless_rig();
        let result = Game::new(
            three_levels(0.1),
            rig,
            HeadlessScenes::new(0),
            ScriptedInput::new(),
        );
        assert!(matches!(result, Err(ConfigError::NoScenes)));
    }

    #[test]
    fn test_default_delay_reloads_on_tick_100() {
        let (mut game, _probe, scenes, _input) = game_at(0, three_levels(2.0));
        game.on_collision("Rock");

        run_ticks(&mut game, 99);
        assert!(scenes.loads().is_empty());
        assert_eq!(game.pending_transitions(), 1);

        run_ticks(&mut game, 1);
        assert_eq!(scenes.loads(), vec![0]);
        assert_eq!(game.pending_transitions(), 0);
    }

    #[test]
    fn test_non_finite_frame_is_skipped() {
        let (mut game, probe, _scenes, input) = game_at(0, three_levels(2.0));
        input.set_thrust(true);

        assert_eq!(game.update(f32::NAN), 0);
        assert_eq!(game.update(f32::INFINITY), 0);
        assert_eq!(game.level_time(), 0.0);

        assert_eq!(game.update(SIM_DT), 1);
        assert_eq!(probe.body.force_calls(), 1);
        assert!(game.level_time().is_finite());
        assert!((game.level_time() - SIM_DT).abs() < 1e-6);
    }
}
