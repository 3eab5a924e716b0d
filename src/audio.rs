//! Audio cues and music control
//!
//! The device layer is behind `AudioBackend`; `AudioDirector` turns
//! simulation events into play/stop calls.

use std::collections::{HashMap, HashSet};

use crate::settings::Settings;
use crate::sim::{GameEvent, Outcome};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Ambient music for levels 1-2 (looped)
    Background,
    /// Boss fight music (looped)
    Boss,
    /// Player fires
    Shoot,
    /// Enemy destroyed or boss hit
    Explosion,
    /// Boss defeated
    Win,
    /// Player destroyed
    Lose,
    /// Level 1 complete
    LevelUp,
    /// Level 2 complete, boss incoming
    LevelComplete,
    /// Health power-up collected
    PowerUp,
}

impl SoundCue {
    pub const ALL: [SoundCue; 9] = [
        SoundCue::Background,
        SoundCue::Boss,
        SoundCue::Shoot,
        SoundCue::Explosion,
        SoundCue::Win,
        SoundCue::Lose,
        SoundCue::LevelUp,
        SoundCue::LevelComplete,
        SoundCue::PowerUp,
    ];

    pub fn is_music(self) -> bool {
        matches!(self, SoundCue::Background | SoundCue::Boss)
    }

    /// Asset file for this cue
    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::Background => "background_music.wav",
            SoundCue::Boss => "boss.wav",
            SoundCue::Shoot => "shoot.wav",
            SoundCue::Explosion => "explosion.wav",
            SoundCue::Win => "win.wav",
            SoundCue::Lose => "lost.wav",
            SoundCue::LevelUp => "levelup.wav",
            SoundCue::LevelComplete => "levelcom.wav",
            SoundCue::PowerUp => "explosion.wav",
        }
    }

    /// Mix level before settings are applied (0.0 - 1.0)
    fn base_volume(self) -> f32 {
        match self {
            SoundCue::Background => 0.4,
            SoundCue::Boss => 0.6,
            _ => 1.0,
        }
    }
}

/// Sound playback device
pub trait AudioBackend {
    fn play(&mut self, cue: SoundCue);
    fn stop(&mut self, cue: SoundCue);
    fn set_looping(&mut self, cue: SoundCue, looping: bool);
    /// Volume 0.0 - 1.0
    fn set_volume(&mut self, cue: SoundCue, volume: f32);
    fn is_playing(&self, cue: SoundCue) -> bool;
}

/// Backend without a device: tracks what would be playing
///
/// One-shot cues count as playing until `finish` is called.
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    playing: HashSet<SoundCue>,
    looping: HashSet<SoundCue>,
    volumes: HashMap<SoundCue, f32>,
    /// Every `play` call, in order
    pub history: Vec<SoundCue>,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let a one-shot cue run out
    pub fn finish(&mut self, cue: SoundCue) {
        if !self.looping.contains(&cue) {
            self.playing.remove(&cue);
        }
    }

    /// Let every one-shot cue run out
    pub fn finish_effects(&mut self) {
        let looping = &self.looping;
        self.playing.retain(|cue| looping.contains(cue));
    }

    pub fn volume(&self, cue: SoundCue) -> Option<f32> {
        self.volumes.get(&cue).copied()
    }

    pub fn is_looping(&self, cue: SoundCue) -> bool {
        self.looping.contains(&cue)
    }
}

impl AudioBackend for SilentAudio {
    fn play(&mut self, cue: SoundCue) {
        self.playing.insert(cue);
        self.history.push(cue);
    }

    fn stop(&mut self, cue: SoundCue) {
        self.playing.remove(&cue);
    }

    fn set_looping(&mut self, cue: SoundCue, looping: bool) {
        if looping {
            self.looping.insert(cue);
        } else {
            self.looping.remove(&cue);
        }
    }

    fn set_volume(&mut self, cue: SoundCue, volume: f32) {
        self.volumes.insert(cue, volume.clamp(0.0, 1.0));
    }

    fn is_playing(&self, cue: SoundCue) -> bool {
        self.playing.contains(&cue)
    }
}

/// Drives music and effects from game events
pub struct AudioDirector<B: AudioBackend> {
    backend: B,
    muted: bool,
}

impl<B: AudioBackend> AudioDirector<B> {
    /// Configure loops and volumes, then start the ambient track
    pub fn new(mut backend: B, settings: &Settings) -> Self {
        for cue in SoundCue::ALL {
            let gain = if cue.is_music() {
                settings.music_gain()
            } else {
                settings.sfx_gain()
            };
            backend.set_volume(cue, cue.base_volume() * gain);
            backend.set_looping(cue, cue.is_music());
        }
        let mut director = Self {
            backend,
            muted: false,
        };
        director.trigger(SoundCue::Background);
        director
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            for cue in SoundCue::ALL {
                self.backend.stop(cue);
            }
        }
    }

    /// Play unless already playing
    fn trigger(&mut self, cue: SoundCue) {
        if !self.muted && !self.backend.is_playing(cue) {
            self.backend.play(cue);
        }
    }

    fn silence(&mut self, cue: SoundCue) {
        if self.backend.is_playing(cue) {
            self.backend.stop(cue);
        }
    }

    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ShotFired => self.trigger(SoundCue::Shoot),
            GameEvent::EnemyDestroyed { .. }
            | GameEvent::EnemyBreached { .. }
            | GameEvent::BossHit { .. } => self.trigger(SoundCue::Explosion),
            GameEvent::PowerUpCollected { .. } => self.trigger(SoundCue::PowerUp),
            GameEvent::LevelStarted { level } => {
                if *level >= crate::consts::FINAL_LEVEL {
                    self.trigger(SoundCue::LevelComplete);
                } else {
                    self.trigger(SoundCue::LevelUp);
                }
            }
            GameEvent::BossSpawned => {
                self.silence(SoundCue::Background);
                self.trigger(SoundCue::Boss);
            }
            GameEvent::SessionOver(summary) => {
                self.silence(SoundCue::Background);
                self.silence(SoundCue::Boss);
                match summary.outcome {
                    Outcome::Won => self.trigger(SoundCue::Win),
                    Outcome::Lost => self.trigger(SoundCue::Lose),
                }
            }
            GameEvent::Restarted => self.trigger(SoundCue::Background),
            GameEvent::GameStarted
            | GameEvent::PlayerHit { .. }
            | GameEvent::BossDefeated
            | GameEvent::QuitRequested => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SessionSummary;

    fn director() -> AudioDirector<SilentAudio> {
        AudioDirector::new(SilentAudio::new(), &Settings::default())
    }

    fn over(outcome: Outcome) -> GameEvent {
        GameEvent::SessionOver(SessionSummary {
            outcome,
            score: 0,
            level: 1,
            kills: 0,
            time_survived: 0.0,
        })
    }

    #[test]
    fn test_background_starts_looped() {
        let d = director();
        assert!(d.backend().is_playing(SoundCue::Background));
        assert!(d.backend().is_looping(SoundCue::Background));
        assert!(d.backend().is_looping(SoundCue::Boss));
        assert!(!d.backend().is_looping(SoundCue::Shoot));
        let bg = d.backend().volume(SoundCue::Background).unwrap();
        assert!((bg - 0.4 * 0.8 * 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_effects_do_not_overlap() {
        let mut d = director();
        d.handle(&GameEvent::ShotFired);
        d.handle(&GameEvent::ShotFired);
        let shots = d
            .backend()
            .history
            .iter()
            .filter(|c| **c == SoundCue::Shoot)
            .count();
        assert_eq!(shots, 1);

        d.backend_mut().finish(SoundCue::Shoot);
        d.handle(&GameEvent::ShotFired);
        assert_eq!(d.backend().history.last(), Some(&SoundCue::Shoot));
    }

    #[test]
    fn test_boss_music_replaces_background() {
        let mut d = director();
        d.handle(&GameEvent::BossSpawned);
        assert!(!d.backend().is_playing(SoundCue::Background));
        assert!(d.backend().is_playing(SoundCue::Boss));
    }

    #[test]
    fn test_session_over_stops_music_and_plays_cue() {
        let mut d = director();
        d.handle(&GameEvent::BossSpawned);
        d.handle(&over(Outcome::Won));
        assert!(!d.backend().is_playing(SoundCue::Boss));
        assert!(d.backend().is_playing(SoundCue::Win));

        let mut d = director();
        d.handle(&over(Outcome::Lost));
        assert!(!d.backend().is_playing(SoundCue::Background));
        assert!(d.backend().is_playing(SoundCue::Lose));
    }

    #[test]
    fn test_restart_resumes_background() {
        let mut d = director();
        d.handle(&over(Outcome::Lost));
        d.handle(&GameEvent::Restarted);
        assert!(d.backend().is_playing(SoundCue::Background));
    }

    #[test]
    fn test_level_cues() {
        let mut d = director();
        d.handle(&GameEvent::LevelStarted { level: 2 });
        d.handle(&GameEvent::LevelStarted { level: 3 });
        let history = &d.backend().history;
        assert!(history.contains(&SoundCue::LevelUp));
        assert!(history.contains(&SoundCue::LevelComplete));
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut d = director();
        d.set_muted(true);
        d.handle(&GameEvent::ShotFired);
        assert!(!d.backend().is_playing(SoundCue::Shoot));
        assert!(!d.backend().is_playing(SoundCue::Background));
    }
}
