//! Collision and outcome resolution for a candidate head cell

use serde::{Deserialize, Serialize};

use super::grid::Cell;
use super::lifecycle::{Food, Hazard};
use super::snake::Snake;
use super::state::TerminationCause;

/// What the candidate move resolves to. Exactly one per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Fatal; the move is not committed
    Terminated(TerminationCause),
    /// Head lands on food; commit with growth
    Eat { value: u32 },
    /// Plain move; commit without growth
    Move,
}

/// Resolve a candidate head against the pre-move world.
///
/// Priority is fixed: hazard, then self-collision, then food.
pub fn resolve_move(
    new_head: Cell,
    snake: &Snake,
    food: Option<&Food>,
    hazard: Option<&Hazard>,
) -> Resolution {
    if hazard.is_some_and(|h| h.cell == new_head) {
        return Resolution::Terminated(TerminationCause::Hazard);
    }

    let eats = food.filter(|f| f.cell == new_head);
    if snake.collides_with_self(new_head, eats.is_some()) {
        return Resolution::Terminated(TerminationCause::SelfCollision);
    }

    match eats {
        Some(f) => Resolution::Eat { value: f.value },
        None => Resolution::Move,
    }
}
