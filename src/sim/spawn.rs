//! Free-cell sampling for food and hazards

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use super::grid::{Cell, Grid};
use crate::consts::MAX_SPAWN_ATTEMPTS;

/// No free cell is left on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no free cell on {width}x{height} grid after {attempts} attempts")]
pub struct SpawnCapacityError {
    pub width: i32,
    pub height: i32,
    pub attempts: u32,
}

/// Pick a uniformly random cell not present in `excluded`.
///
/// Rejection sampling is capped at `MAX_SPAWN_ATTEMPTS` draws; past the cap the
/// remaining free cells are enumerated and one is picked directly, so the call
/// always terminates.
pub fn sample_free_cell<R: Rng + ?Sized>(
    grid: &Grid,
    excluded: &HashSet<Cell>,
    rng: &mut R,
) -> Result<Cell, SpawnCapacityError> {
    let blocked = excluded.iter().filter(|c| grid.contains(**c)).count();
    if blocked >= grid.area() {
        return Err(SpawnCapacityError {
            width: grid.width,
            height: grid.height,
            attempts: 0,
        });
    }

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let cell = Cell::new(
            rng.random_range(0..grid.width),
            rng.random_range(0..grid.height),
        );
        if !excluded.contains(&cell) {
            return Ok(cell);
        }
    }

    let free: Vec<Cell> = grid.cells().filter(|c| !excluded.contains(c)).collect();
    if free.is_empty() {
        return Err(SpawnCapacityError {
            width: grid.width,
            height: grid.height,
            attempts: MAX_SPAWN_ATTEMPTS,
        });
    }
    log::debug!(
        "spawn rejection cap hit, picking from {} free cells",
        free.len()
    );
    Ok(free[rng.random_range(0..free.len())])
}
