//! Game settings and preferences
//!
//! One `Settings` value is owned by the process and handed by reference to the
//! simulation, renderer and audio collaborators. Persisted as JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::{self, PersistError};
use crate::sim::{Direction, RuleSet};

/// Color theme for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    NeonRetro,
    DarkModern,
    SolarizedLight,
    SolarizedDark,
    Monokai,
    Abyss,
}

/// RGB palette a renderer draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: [u8; 3],
    pub snake: [u8; 3],
    pub food: [u8; 3],
    pub text: [u8; 3],
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::NeonRetro,
        Theme::DarkModern,
        Theme::SolarizedLight,
        Theme::SolarizedDark,
        Theme::Monokai,
        Theme::Abyss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::NeonRetro => "Neon-Retro",
            Theme::DarkModern => "Dark Modern",
            Theme::SolarizedLight => "Solarized Light",
            Theme::SolarizedDark => "Solarized Dark",
            Theme::Monokai => "Monokai",
            Theme::Abyss => "Abyss",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Self::ALL.into_iter().find(|t| {
            t.as_str()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
                == wanted
        })
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::NeonRetro => Palette {
                background: [10, 10, 30],
                snake: [57, 255, 20],
                food: [255, 0, 255],
                text: [255, 255, 0],
            },
            Theme::DarkModern => Palette {
                background: [30, 30, 30],
                snake: [200, 200, 200],
                food: [255, 80, 80],
                text: [255, 255, 255],
            },
            Theme::SolarizedLight => Palette {
                background: [253, 246, 227],
                snake: [38, 139, 210],
                food: [220, 50, 47],
                text: [101, 123, 131],
            },
            Theme::SolarizedDark => Palette {
                background: [0, 43, 54],
                snake: [38, 139, 210],
                food: [220, 50, 47],
                text: [133, 153, 0],
            },
            Theme::Monokai => Palette {
                background: [39, 40, 34],
                snake: [249, 38, 114],
                food: [166, 226, 46],
                text: [248, 248, 242],
            },
            Theme::Abyss => Palette {
                background: [20, 22, 34],
                snake: [0, 122, 204],
                food: [255, 85, 0],
                text: [204, 204, 204],
            },
        }
    }
}

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
    /// Directory scanned for background music tracks
    pub music_dir: Option<PathBuf>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_dir: None,
        }
    }
}

/// Invalid settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 3x3, got {width}x{height}")]
    GridTooSmall { width: i32, height: i32 },
    #[error("initial length {length} does not fit a {span}-cell row or column with room for food")]
    SnakeTooLong { length: usize, span: i32 },
    #[error("tick rate must be positive and at most the max tick rate ({rate} > {max})")]
    TickRate { rate: f32, max: f32 },
    #[error("hazard lifetime range {min}..={max} is empty or zero")]
    HazardLifetime { min: u32, max: u32 },
    #[error("food lifespan must be at least one tick")]
    FoodLifespan,
    #[error("volume {0} is outside 0.0 - 1.0")]
    Volume(f32),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation rules (mode, grid, speed, food, hazards)
    pub rules: RuleSet,
    pub theme: Theme,
    pub audio: AudioSettings,
    /// Directory holding the high score and leaderboard files
    pub data_dir: PathBuf,
    /// Countdown and end-of-session pauses
    pub session_pauses: bool,
}

/// Per-process session configuration handed to the collaborators
pub type SessionConfig = Settings;

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            theme: Theme::default(),
            audio: AudioSettings::default(),
            data_dir: PathBuf::from("."),
            session_pauses: true,
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "settings.json";
    pub const HIGH_SCORE_FILE: &'static str = "high_score.txt";
    pub const LEADERBOARD_FILE: &'static str = "survival_leaderboard.json";

    pub fn high_score_path(&self) -> PathBuf {
        self.data_dir.join(Self::HIGH_SCORE_FILE)
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.data_dir.join(Self::LEADERBOARD_FILE)
    }

    /// Check that a session can be built from these settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.rules;
        if r.grid_width < 3 || r.grid_height < 3 {
            return Err(ConfigError::GridTooSmall {
                width: r.grid_width,
                height: r.grid_height,
            });
        }
        // Straight initial body must not wrap onto itself and must leave a cell for food
        let span = match r.initial_direction {
            Direction::Left | Direction::Right => r.grid_width,
            Direction::Up | Direction::Down => r.grid_height,
        };
        if r.initial_length == 0 || r.initial_length >= span as usize {
            return Err(ConfigError::SnakeTooLong {
                length: r.initial_length,
                span,
            });
        }
        if !(r.tick_rate > 0.0 && r.tick_rate <= r.max_tick_rate) || r.speed_increase < 0.0 {
            return Err(ConfigError::TickRate {
                rate: r.tick_rate,
                max: r.max_tick_rate,
            });
        }
        if r.hazard_lifetime_min == 0 || r.hazard_lifetime_min > r.hazard_lifetime_max {
            return Err(ConfigError::HazardLifetime {
                min: r.hazard_lifetime_min,
                max: r.hazard_lifetime_max,
            });
        }
        if r.food_lifespan_ticks == Some(0) {
            return Err(ConfigError::FoodLifespan);
        }
        let a = &self.audio;
        for volume in [a.master_volume, a.sfx_volume, a.music_volume] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::Volume(volume));
            }
        }
        Ok(())
    }

    /// Effective sound effect volume (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.audio.muted {
            0.0
        } else {
            self.audio.master_volume * self.audio.sfx_volume
        }
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.audio.muted {
            0.0
        } else {
            self.audio.master_volume * self.audio.music_volume
        }
    }

    /// Load settings, falling back to defaults on a missing, corrupt or invalid file
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<Settings>(path) {
            Ok(Some(settings)) => match settings.validate() {
                Ok(()) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameMode;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        std::fs::write(
            &path,
            r#"{"rules":{"mode":"Survival","grid_width":12},"theme":"Monokai"}"#,
        )
        .unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.rules.mode, GameMode::Survival);
        assert_eq!(settings.rules.grid_width, 12);
        assert_eq!(settings.rules.grid_height, crate::consts::GRID_HEIGHT);
        assert_eq!(settings.theme, Theme::Monokai);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        let mut settings = Settings::default();
        settings.theme = Theme::Abyss;
        settings.rules.food_lifespan_ticks = Some(150);
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        std::fs::write(&path, r#"{"rules":{"grid_width":2}}"#).unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_validate_rejects_bad_rules() {
        let mut s = Settings::default();
        s.rules.initial_length = s.rules.grid_width as usize;
        assert!(matches!(s.validate(), Err(ConfigError::SnakeTooLong { .. })));

        let mut s = Settings::default();
        s.rules.hazard_lifetime_min = 200;
        assert!(matches!(s.validate(), Err(ConfigError::HazardLifetime { .. })));

        let mut s = Settings::default();
        s.audio.music_volume = 1.5;
        assert_eq!(s.validate(), Err(ConfigError::Volume(1.5)));
    }

    #[test]
    fn test_vertical_start_checked_against_height() {
        let mut s = Settings::default();
        s.rules.grid_width = 10;
        s.rules.grid_height = 3;
        s.rules.initial_length = 5;
        s.rules.initial_direction = Direction::Up;
        assert_eq!(
            s.validate(),
            Err(ConfigError::SnakeTooLong { length: 5, span: 3 })
        );

        // Same length fits when laid along the 10-wide rows
        s.rules.initial_direction = Direction::Right;
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn test_validated_start_has_distinct_cells() {
        let mut s = Settings::default();
        s.rules.grid_width = 10;
        s.rules.grid_height = 6;
        s.rules.initial_length = 5;
        s.rules.initial_direction = Direction::Down;
        assert_eq!(s.validate(), Ok(()));

        let state = crate::sim::GameState::new(s.rules.clone(), 1).unwrap();
        let cells: std::collections::HashSet<_> = state.snake.body().iter().collect();
        assert_eq!(cells.len(), 5);
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!(Theme::from_str("neon-retro"), Some(Theme::NeonRetro));
        assert_eq!(Theme::from_str("Solarized Dark"), Some(Theme::SolarizedDark));
        assert_eq!(Theme::from_str("sepia"), None);
    }

    #[test]
    fn test_mute_zeroes_volume() {
        let mut s = Settings::default();
        assert!(s.effective_sfx_volume() > 0.0);
        s.audio.muted = true;
        assert_eq!(s.effective_sfx_volume(), 0.0);
        assert_eq!(s.effective_music_volume(), 0.0);
    }
}
