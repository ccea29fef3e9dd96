//! Collaborators attached to the ship
//!
//! A ship without its body, audio source or any of its particle systems is a
//! broken scene. `ShipRigBuilder::build` refuses to produce a partial rig so
//! the problem shows up at startup rather than mid-flight.

use crate::error::ConfigError;
use crate::platform::{AudioChannel, ParticleEmitter, PhysicsBody};

pub struct ShipRig {
    pub body: Box<dyn PhysicsBody>,
    pub audio: Box<dyn AudioChannel>,
    pub main_engine: Box<dyn ParticleEmitter>,
    pub left_thruster: Box<dyn ParticleEmitter>,
    pub right_thruster: Box<dyn ParticleEmitter>,
    pub success_particles: Box<dyn ParticleEmitter>,
    pub crash_particles: Box<dyn ParticleEmitter>,
}

impl std::fmt::Debug for ShipRig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShipRig")
            .field("audio_playing", &self.audio.is_playing())
            .field("main_engine", &self.main_engine.is_playing())
            .field("left_thruster", &self.left_thruster.is_playing())
            .field("right_thruster", &self.right_thruster.is_playing())
            .finish_non_exhaustive()
    }
}

impl ShipRig {
    pub fn builder() -> ShipRigBuilder {
        ShipRigBuilder::default()
    }

    /// Silence everything, as a freshly loaded scene would be
    pub fn reset(&mut self) {
        if self.audio.is_playing() {
            self.audio.stop();
        }
        for emitter in [
            &mut self.main_engine,
            &mut self.left_thruster,
            &mut self.right_thruster,
            &mut self.success_particles,
            &mut self.crash_particles,
        ] {
            if emitter.is_playing() {
                emitter.stop();
            }
        }
        self.body.set_angular_integration_frozen(false);
    }
}

#[derive(Default)]
pub struct ShipRigBuilder {
    body: Option<Box<dyn PhysicsBody>>,
    audio: Option<Box<dyn AudioChannel>>,
    main_engine: Option<Box<dyn ParticleEmitter>>,
    left_thruster: Option<Box<dyn ParticleEmitter>>,
    right_thruster: Option<Box<dyn ParticleEmitter>>,
    success_particles: Option<Box<dyn ParticleEmitter>>,
    crash_particles: Option<Box<dyn ParticleEmitter>>,
}

impl ShipRigBuilder {
    pub fn body(mut self, body: impl PhysicsBody + 'static) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    pub fn audio(mut self, audio: impl AudioChannel + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn main_engine(mut self, emitter: impl ParticleEmitter + 'static) -> Self {
        self.main_engine = Some(Box::new(emitter));
        self
    }

    pub fn left_thruster(mut self, emitter: impl ParticleEmitter + 'static) -> Self {
        self.left_thruster = Some(Box::new(emitter));
        self
    }

    pub fn right_thruster(mut self, emitter: impl ParticleEmitter + 'static) -> Self {
        self.right_thruster = Some(Box::new(emitter));
        self
    }

    pub fn success_particles(mut self, emitter: impl ParticleEmitter + 'static) -> Self {
        self.success_particles = Some(Box::new(emitter));
        self
    }

    pub fn crash_particles(mut self, emitter: impl ParticleEmitter + 'static) -> Self {
        self.crash_particles = Some(Box::new(emitter));
        self
    }

    pub fn build(self) -> Result<ShipRig, ConfigError> {
        Ok(ShipRig {
            body: self.body.ok_or(ConfigError::MissingComponent("body"))?,
            audio: self.audio.ok_or(ConfigError::MissingComponent("audio"))?,
            main_engine: self
                .main_engine
                .ok_or(ConfigError::MissingComponent("main_engine"))?,
            left_thruster: self
                .left_thruster
                .ok_or(ConfigError::MissingComponent("left_thruster"))?,
            right_thruster: self
                .right_thruster
                .ok_or(ConfigError::MissingComponent("right_thruster"))?,
            success_particles: self
                .success_particles
                .ok_or(ConfigError::MissingComponent("success_particles"))?,
            crash_particles: self
                .crash_particles
                .ok_or(ConfigError::MissingComponent("crash_particles"))?,
        })
    }
}
