//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or file dependencies

pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod lifecycle;
pub mod snake;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Resolution, resolve_move};
pub use grid::{Cell, Grid, occupies};
pub use lifecycle::{Food, Hazard, age_food, ensure_food, ensure_hazard};
pub use snake::{Direction, Snake};
pub use spawn::{SpawnCapacityError, sample_free_cell};
pub use state::{
    FrameView, GameEvent, GameMode, GamePhase, GameState, HazardView, RuleSet, TerminationCause,
};
pub use tick::{TickInput, TickOutcome, tick};
