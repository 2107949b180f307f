//! Idle/demo steering - the computer plays
//!
//! Greedy: among the turns that don't die this tick, take the one that closes
//! the toroidal distance to the food, preferring to keep going straight.

use super::grid::{Cell, Grid};
use super::snake::Direction;
use super::state::GameState;

/// Shortest wrap-around Manhattan distance between two cells
pub fn torus_distance(grid: &Grid, a: Cell, b: Cell) -> i32 {
    let dx = (a.x - b.x).rem_euclid(grid.width);
    let dy = (a.y - b.y).rem_euclid(grid.height);
    dx.min(grid.width - dx) + dy.min(grid.height - dy)
}

/// Pick a direction for the next tick, or None if every option is fatal
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    let snake = &state.snake;
    let head = snake.head();
    let current = snake.direction();
    let food = state.food.as_ref();
    let hazard = state.hazard.as_ref().map(|h| h.cell);

    let candidates = Direction::ALL
        .into_iter()
        .filter(|d| *d != current.opposite())
        .filter_map(|d| {
            let next = state.grid.wrap(head, d.vector());
            let grows = food.is_some_and(|f| f.cell == next);
            if Some(next) == hazard || snake.collides_with_self(next, grows) {
                return None;
            }
            let distance = food.map_or(0, |f| torus_distance(&state.grid, next, f.cell));
            Some((d, distance))
        });

    candidates
        .min_by_key(|(d, distance)| (*distance, *d != current))
        .map(|(d, _)| d)
}
