//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use rand::Rng;

use super::collision::{Resolution, resolve_move};
use super::lifecycle::age_food;
use super::snake::Direction;
use super::spawn::SpawnCapacityError;
use super::state::{GameEvent, GamePhase, GameState, TerminationCause};

/// Input commands collected since the previous tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Direction requests in arrival order; the last valid one wins
    pub directions: Vec<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Start a fresh session
    pub restart: bool,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing simulated (paused, over, or just restarted)
    Idle,
    Moved,
    Ate { value: u32 },
    Terminated(TerminationCause),
}

/// Advance the game state by one fixed timestep.
///
/// The only error is running out of free cells for a spawn.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
) -> Result<TickOutcome, SpawnCapacityError> {
    state.events.clear();

    if input.restart {
        let seed = state.rng.random::<u64>();
        state.restart(seed)?;
        return Ok(TickOutcome::Idle);
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("paused at tick {}", state.time_ticks);
                return Ok(TickOutcome::Idle);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("resumed at tick {}", state.time_ticks);
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return Ok(TickOutcome::Idle);
    }

    for &direction in &input.directions {
        state.snake.set_pending_direction(direction);
    }

    state.time_ticks += 1;
    state.elapsed += f64::from(dt);

    // Hazard spawn/expiry happens before the move
    state.ensure_hazard()?;

    if let Some(expired) = age_food(&mut state.food) {
        state.events.push(GameEvent::FoodExpired { cell: expired.cell });
        state.ensure_food()?;
    }

    let new_head = state.snake.step(&state.grid);

    let resolution = resolve_move(
        new_head,
        &state.snake,
        state.food.as_ref(),
        state.hazard.as_ref(),
    );
    match resolution {
        Resolution::Terminated(cause) => {
            state.phase = GamePhase::GameOver;
            state.outcome = Some(cause);
            state.events.push(GameEvent::Terminated { cause });
            log::info!(
                "session over ({}) after {} ticks with score {}",
                cause.as_str(),
                state.time_ticks,
                state.score
            );
            Ok(TickOutcome::Terminated(cause))
        }
        Resolution::Eat { value } => {
            state.snake.commit(new_head, true);
            state.food = None;
            state.events.push(GameEvent::FoodEaten {
                cell: new_head,
                value,
            });
            state.add_score(value);
            state.speed_up();
            // Food spawns around the hazard, so the hazard never needs to move here
            state.ensure_food()?;
            Ok(TickOutcome::Ate { value })
        }
        Resolution::Move => {
            state.snake.commit(new_head, false);
            Ok(TickOutcome::Moved)
        }
    }
}
