//! Ship audio
//!
//! Clip identifiers plus `AudioMixer`, an in-memory audio source that records
//! what the simulation asked it to play. The host engine supplies the real
//! mixer; this one backs the headless binary and tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::AudioChannel;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Main engine loop while thrusting
    MainEngine,
    /// Ship hit an obstacle
    Crash,
    /// Ship landed on the finish pad
    Success,
}

/// One thing the mixer was asked to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Playback {
    Looping { clip: SoundEffect, volume: f32 },
    OneShot { clip: SoundEffect, volume: f32 },
    Stopped,
}

#[derive(Debug, Default)]
struct MixerState {
    looping: Option<SoundEffect>,
    history: Vec<Playback>,
}

/// Audio manager for the ship. Clones share the same channel.
#[derive(Debug, Clone)]
pub struct AudioMixer {
    inner: Rc<RefCell<MixerState>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioMixer {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(MixerState::default())),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Apply the volume and mute fields from saved settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Everything played or stopped so far, oldest first
    pub fn history(&self) -> Vec<Playback> {
        self.inner.borrow().history.clone()
    }

    /// Number of times `clip` was started, looping or one-shot
    pub fn play_count(&self, clip: SoundEffect) -> usize {
        self.inner
            .borrow()
            .history
            .iter()
            .filter(|p| match p {
                Playback::Looping { clip: c, .. } | Playback::OneShot { clip: c, .. } => *c == clip,
                Playback::Stopped => false,
            })
            .count()
    }

    pub fn stop_count(&self) -> usize {
        self.inner
            .borrow()
            .history
            .iter()
            .filter(|p| matches!(p, Playback::Stopped))
            .count()
    }

    pub fn looping_clip(&self) -> Option<SoundEffect> {
        self.inner.borrow().looping
    }
}

impl AudioChannel for AudioMixer {
    fn play_looping(&mut self, clip: SoundEffect) {
        let volume = self.effective_volume();
        let mut inner = self.inner.borrow_mut();
        inner.looping = Some(clip);
        inner.history.push(Playback::Looping { clip, volume });
    }

    fn play_one_shot(&mut self, clip: SoundEffect) {
        let volume = self.effective_volume();
        // Muted one-shots are dropped entirely
        if volume <= 0.0 {
            return;
        }
        self.inner
            .borrow_mut()
            .history
            .push(Playback::OneShot { clip, volume });
    }

    fn stop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.looping = None;
        inner.history.push(Playback::Stopped);
    }

    /// One-shots are fire-and-forget; only the loop counts as playing
    fn is_playing(&self) -> bool {
        self.inner.borrow().looping.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looping_sets_playing_until_stop() {
        let mut mixer = AudioMixer::new();
        assert!(!mixer.is_playing());
        mixer.play_looping(SoundEffect::MainEngine);
        assert!(mixer.is_playing());
        assert_eq!(mixer.looping_clip(), Some(SoundEffect::MainEngine));
        mixer.stop();
        assert!(!mixer.is_playing());
        assert_eq!(mixer.stop_count(), 1);
    }

    #[test]
    fn test_one_shot_uses_effective_volume() {
        let mut mixer = AudioMixer::new();
        mixer.set_master_volume(0.5);
        mixer.set_sfx_volume(2.0); // clamped to 1.0
        mixer.play_one_shot(SoundEffect::Crash);
        assert_eq!(
            mixer.history(),
            vec![Playback::OneShot {
                clip: SoundEffect::Crash,
                volume: 0.5
            }]
        );
        assert!(!mixer.is_playing());
    }

    #[test]
    fn test_apply_settings() {
        let mut mixer = AudioMixer::new();
        let mut settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        mixer.apply_settings(&settings);
        assert_eq!(mixer.effective_volume(), 0.25);

        settings.muted = true;
        mixer.apply_settings(&settings);
        assert_eq!(mixer.effective_volume(), 0.0);
        mixer.play_one_shot(SoundEffect::Success);
        assert!(mixer.history().is_empty());
    }

    #[test]
    fn test_muted_one_shot_is_dropped() {
        let mut mixer = AudioMixer::new();
        mixer.set_muted(true);
        mixer.play_one_shot(SoundEffect::Success);
        assert_eq!(mixer.play_count(SoundEffect::Success), 0);
    }

    #[test]
    fn test_clones_share_channel() {
        let mixer = AudioMixer::new();
        let mut handle = mixer.clone();
        handle.play_looping(SoundEffect::MainEngine);
        assert!(mixer.is_playing());
        assert_eq!(mixer.play_count(SoundEffect::MainEngine), 1);
    }
}
