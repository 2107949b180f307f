//! Grid Snake - a toroidal-grid snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, growth, collisions, hazards)
//! - `highscores`: High score and survival leaderboard ledger
//! - `persistence`: File storage with typed recoverable errors
//! - `settings`: Session configuration (rules, theme, audio, data paths)
//! - `audio`: Sound cue mapping and music playlist state
//! - `platform`: Input command queue and fixed-rate scheduling
//! - `game`: Session driver tying the above together

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::{HighScoreStore, Leaderboard, LeaderboardEntry, LeaderboardStore};
pub use settings::{SessionConfig, Settings, Theme};

/// Game configuration constants
pub mod consts {
    /// Default simulation rate (ticks per second)
    pub const TICK_RATE_HZ: f32 = 10.0;
    /// Fastest tick rate the speed ramp may reach
    pub const MAX_TICK_RATE_HZ: f32 = 20.0;
    /// Tick rate gained per food eaten when the speed ramp is on
    pub const SPEED_INCREASE_HZ: f32 = 0.5;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default grid dimensions (800x600 window at 20px per cell)
    pub const GRID_WIDTH: i32 = 40;
    pub const GRID_HEIGHT: i32 = 30;

    /// Snake length at session start
    pub const INITIAL_LENGTH: usize = 3;

    /// Points per food
    pub const FOOD_VALUE: u32 = 10;
    /// Score interval that triggers a milestone event
    pub const MILESTONE_INTERVAL: u64 = 100;

    /// Hazard lifetime range in ticks (inclusive)
    pub const HAZARD_LIFETIME_MIN: u32 = 80;
    pub const HAZARD_LIFETIME_MAX: u32 = 160;

    /// Random draws before the spawner falls back to enumerating free cells
    pub const MAX_SPAWN_ATTEMPTS: u32 = 1024;

    /// Leaderboard size
    pub const MAX_LEADERBOARD_ENTRIES: usize = 10;
    /// Maximum player name length on the leaderboard
    pub const MAX_NAME_LEN: usize = 10;

    /// Countdown before a session starts (3 steps of 800 ms)
    pub const COUNTDOWN_MS: u64 = 3 * 800;
    /// Pause after a self-collision before the session is finalized
    pub const CRASH_PAUSE_MS: u64 = 500;
    /// Pause after a hazard explosion (20 frames of 30 ms)
    pub const EXPLOSION_PAUSE_MS: u64 = 20 * 30;
}
