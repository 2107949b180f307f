//! Game state and core simulation types
//!
//! Everything one session needs lives in `GameState`; nothing is global.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use super::lifecycle::{self, Food, Hazard};
use super::snake::{Direction, Snake};
use super::spawn::SpawnCapacityError;
use crate::consts::*;

/// Game mode chosen at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Wrap-around, no hazards, ends on self-collision
    #[default]
    Classic,
    /// Wrap-around with a timed hazard, ends on self-collision or hazard contact
    Survival,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Survival => "Survival",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "survival" => Some(GameMode::Survival),
            _ => None,
        }
    }

    pub fn has_hazards(&self) -> bool {
        matches!(self, GameMode::Survival)
    }

    /// Whether finished sessions go on the leaderboard
    pub fn records_leaderboard(&self) -> bool {
        matches!(self, GameMode::Survival)
    }
}

/// Tunable rules for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub mode: GameMode,
    pub grid_width: i32,
    pub grid_height: i32,
    pub initial_length: usize,
    pub initial_direction: Direction,
    /// Base simulation rate (ticks per second)
    pub tick_rate: f32,
    /// Tick rate gained per food (0 disables the ramp)
    pub speed_increase: f32,
    pub max_tick_rate: f32,
    pub food_value: u32,
    /// Ticks before uneaten food respawns elsewhere (None = never)
    pub food_lifespan_ticks: Option<u32>,
    pub hazard_lifetime_min: u32,
    pub hazard_lifetime_max: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            mode: GameMode::Classic,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            initial_length: INITIAL_LENGTH,
            initial_direction: Direction::Right,
            tick_rate: TICK_RATE_HZ,
            speed_increase: 0.0,
            max_tick_rate: MAX_TICK_RATE_HZ,
            food_value: FOOD_VALUE,
            food_lifespan_ticks: None,
            hazard_lifetime_min: HAZARD_LIFETIME_MIN,
            hazard_lifetime_max: HAZARD_LIFETIME_MAX,
        }
    }
}

impl RuleSet {
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn hazard_lifetime(&self) -> RangeInclusive<u32> {
        self.hazard_lifetime_min..=self.hazard_lifetime_max
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Session ended; see `GameState::outcome`
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationCause {
    Hazard,
    SelfCollision,
}

impl TerminationCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationCause::Hazard => "hazard",
            TerminationCause::SelfCollision => "self-collision",
        }
    }
}

/// Things that happened during a tick, for audio/effects collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { cell: Cell, value: u32 },
    FoodSpawned { cell: Cell },
    FoodExpired { cell: Cell },
    HazardSpawned { cell: Cell, lifetime: u32 },
    Milestone { score: u64 },
    Terminated { cause: TerminationCause },
}

/// Hazard as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HazardView {
    pub cell: Cell,
    /// Remaining lifetime as a fraction in [0, 1]
    pub remaining: f32,
}

/// Per-tick snapshot for an external renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub hazard: Option<HazardView>,
    pub score: u64,
    pub elapsed_secs: u64,
    pub phase: GamePhase,
    pub outcome: Option<TerminationCause>,
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub rules: RuleSet,
    pub grid: Grid,
    pub snake: Snake,
    pub food: Option<Food>,
    pub hazard: Option<Hazard>,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated time in seconds
    pub elapsed: f64,
    /// Current rate, raised by the speed ramp
    pub tick_rate: f32,
    pub phase: GamePhase,
    pub outcome: Option<TerminationCause>,
    /// Events raised by the last tick
    pub events: Vec<GameEvent>,
    last_milestone: u64,
}

impl GameState {
    /// Create a new session with the snake centered, food placed and, in
    /// survival, the first hazard spawned
    pub fn new(rules: RuleSet, seed: u64) -> Result<Self, SpawnCapacityError> {
        let grid = rules.grid();
        let snake = Snake::new(
            &grid,
            grid.center(),
            rules.initial_direction,
            rules.initial_length,
        );
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tick_rate: rules.tick_rate,
            rules,
            grid,
            snake,
            food: None,
            hazard: None,
            score: 0,
            time_ticks: 0,
            elapsed: 0.0,
            phase: GamePhase::Playing,
            outcome: None,
            events: Vec::new(),
            last_milestone: 0,
        };
        state.ensure_food()?;
        state.ensure_hazard()?;
        log::info!(
            "new {} session on {}x{} grid (seed {})",
            state.rules.mode.as_str(),
            state.grid.width,
            state.grid.height,
            seed
        );
        Ok(state)
    }

    /// Start over with the same rules and a fresh seed
    pub fn restart(&mut self, seed: u64) -> Result<(), SpawnCapacityError> {
        *self = Self::new(self.rules.clone(), seed)?;
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whole seconds survived so far
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.floor() as u64
    }

    /// Cells food may not spawn on
    pub fn food_exclusions(&self) -> HashSet<Cell> {
        let mut excluded: HashSet<Cell> = self.snake.body().iter().copied().collect();
        if let Some(hazard) = &self.hazard {
            excluded.insert(hazard.cell);
        }
        excluded
    }

    /// Spawn food if none is active
    pub fn ensure_food(&mut self) -> Result<(), SpawnCapacityError> {
        let excluded = self.food_exclusions();
        if let Some(cell) = lifecycle::ensure_food(
            &mut self.food,
            &self.grid,
            &excluded,
            &self.rules,
            &mut self.rng,
        )? {
            self.events.push(GameEvent::FoodSpawned { cell });
        }
        Ok(())
    }

    /// Spawn, respawn or age the hazard (survival only)
    pub fn ensure_hazard(&mut self) -> Result<(), SpawnCapacityError> {
        if !self.rules.mode.has_hazards() {
            return Ok(());
        }
        let food_cell = self.food.as_ref().map(|f| f.cell);
        if let Some(hazard) = lifecycle::ensure_hazard(
            &mut self.hazard,
            &self.grid,
            &self.snake,
            food_cell,
            &self.rules,
            &mut self.rng,
        )? {
            self.events.push(GameEvent::HazardSpawned {
                cell: hazard.cell,
                lifetime: hazard.lifetime,
            });
        }
        Ok(())
    }

    /// Add points and raise a milestone event on each new hundred
    pub(crate) fn add_score(&mut self, value: u32) {
        self.score += u64::from(value);
        let milestone = self.score / MILESTONE_INTERVAL * MILESTONE_INTERVAL;
        if milestone > self.last_milestone {
            self.last_milestone = milestone;
            self.events.push(GameEvent::Milestone { score: milestone });
        }
    }

    /// Apply the speed ramp after eating
    pub(crate) fn speed_up(&mut self) {
        if self.rules.speed_increase > 0.0 {
            self.tick_rate =
                (self.tick_rate + self.rules.speed_increase).min(self.rules.max_tick_rate);
        }
    }

    /// Snapshot for rendering
    pub fn view(&self) -> FrameView {
        FrameView {
            snake: self.snake.body().iter().copied().collect(),
            food: self.food.as_ref().map(|f| f.cell),
            hazard: self.hazard.as_ref().map(|h| HazardView {
                cell: h.cell,
                remaining: h.remaining_fraction(),
            }),
            score: self.score,
            elapsed_secs: self.elapsed_secs(),
            phase: self.phase,
            outcome: self.outcome,
        }
    }
}
