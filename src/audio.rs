//! Audio cues and background music playlist
//!
//! Playback itself belongs to a backend behind `AudioSink`. This module decides
//! *what* to play: a sound effect per game event, and which music track is
//! next. Backends that fail to load a sound degrade to silence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food eaten
    Eat,
    /// Score milestone reached
    Milestone,
    /// Snake ran into itself
    GameOver,
    /// Snake hit the hazard
    Explosion,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        use crate::sim::TerminationCause;
        match event {
            GameEvent::FoodEaten { .. } => Some(SoundEffect::Eat),
            GameEvent::Milestone { .. } => Some(SoundEffect::Milestone),
            GameEvent::Terminated {
                cause: TerminationCause::SelfCollision,
            } => Some(SoundEffect::GameOver),
            GameEvent::Terminated {
                cause: TerminationCause::Hazard,
            } => Some(SoundEffect::Explosion),
            GameEvent::FoodSpawned { .. }
            | GameEvent::FoodExpired { .. }
            | GameEvent::HazardSpawned { .. } => None,
        }
    }

    /// Fallback beep (frequency Hz, duration ms) for backends without samples
    pub fn beep(&self) -> (u32, u32) {
        match self {
            SoundEffect::Eat => (880, 60),
            SoundEffect::Milestone => (1320, 120),
            SoundEffect::GameOver => (220, 400),
            SoundEffect::Explosion => (1200, 40),
            SoundEffect::HighScore => (1760, 200),
        }
    }
}

/// Playback backend
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    fn play_track(&mut self, track: &Path, volume: f32);
    fn stop_music(&mut self);
}

/// Backend that only logs what a real one would play
#[derive(Debug, Default)]
pub struct LogSink {
    /// Effects played so far, oldest first
    pub played: Vec<SoundEffect>,
}

impl AudioSink for LogSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        if volume <= 0.0 {
            return;
        }
        let (freq, ms) = effect.beep();
        log::debug!("sfx {:?} ({} Hz, {} ms) at {:.2}", effect, freq, ms, volume);
        self.played.push(effect);
    }

    fn play_track(&mut self, track: &Path, volume: f32) {
        log::info!("music: {} at {:.2}", track.display(), volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }
}

/// Background music playlist position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    tracks: Vec<PathBuf>,
    current: usize,
    playing: bool,
}

impl PlaybackState {
    pub fn new(tracks: Vec<PathBuf>) -> Self {
        Self {
            tracks,
            current: 0,
            playing: false,
        }
    }

    /// Collect `*.mp3` files from `dir`, sorted by path.
    /// An unreadable directory yields an empty playlist.
    pub fn from_dir(dir: &Path) -> Self {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("No music from {}: {e}", dir.display());
                return Self::default();
            }
        };
        let mut tracks: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
            })
            .collect();
        tracks.sort();
        log::info!("Loaded {} music tracks", tracks.len());
        Self::new(tracks)
    }

    pub fn is_available(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_track(&self) -> Option<&Path> {
        self.tracks.get(self.current).map(PathBuf::as_path)
    }

    /// Start from the first track
    pub fn start(&mut self, sink: &mut dyn AudioSink, settings: &Settings) {
        if !self.is_available() {
            return;
        }
        self.current = 0;
        self.playing = true;
        if let Some(track) = self.current_track() {
            sink.play_track(track, settings.effective_music_volume());
        }
    }

    /// Handle the backend's "track ended" notification by moving to the next
    /// track, wrapping at the end of the list
    pub fn on_track_ended(&mut self, sink: &mut dyn AudioSink, settings: &Settings) {
        if !self.playing || !self.is_available() {
            return;
        }
        self.current = (self.current + 1) % self.tracks.len();
        if let Some(track) = self.current_track() {
            sink.play_track(track, settings.effective_music_volume());
        }
    }

    pub fn stop(&mut self, sink: &mut dyn AudioSink) {
        if self.playing {
            self.playing = false;
            sink.stop_music();
        }
    }
}

/// Play the cue for every event raised by the last tick
pub fn play_events(sink: &mut dyn AudioSink, events: &[GameEvent], settings: &Settings) {
    let volume = settings.effective_sfx_volume();
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        sink.play_effect(effect, volume);
    }
}
