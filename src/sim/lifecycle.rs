//! Food and hazard lifecycle
//!
//! Exactly one food exists during an active session. In survival mode a single
//! hazard lives for a random number of ticks, then moves elsewhere.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use super::snake::Snake;
use super::spawn::{SpawnCapacityError, sample_free_cell};
use super::state::RuleSet;

/// The active consumable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub cell: Cell,
    pub value: u32,
    /// Ticks left before the food expires (None = never)
    pub ttl_ticks: Option<u32>,
}

/// The active hazard (bomb)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hazard {
    pub cell: Cell,
    /// Ticks remaining
    pub ttl_ticks: u32,
    /// Lifetime assigned at spawn
    pub lifetime: u32,
}

impl Hazard {
    pub fn remaining_fraction(&self) -> f32 {
        if self.lifetime == 0 {
            0.0
        } else {
            self.ttl_ticks as f32 / self.lifetime as f32
        }
    }
}

/// Spawn food if absent. Returns the new cell when one was placed.
pub fn ensure_food<R: Rng + ?Sized>(
    food: &mut Option<Food>,
    grid: &Grid,
    excluded: &HashSet<Cell>,
    rules: &RuleSet,
    rng: &mut R,
) -> Result<Option<Cell>, SpawnCapacityError> {
    if food.is_some() {
        return Ok(None);
    }
    let cell = sample_free_cell(grid, excluded, rng)?;
    *food = Some(Food {
        cell,
        value: rules.food_value,
        ttl_ticks: rules.food_lifespan_ticks,
    });
    log::debug!("food spawned at ({}, {})", cell.x, cell.y);
    Ok(Some(cell))
}

/// Count down a food lifespan. Removes and returns the food once it expires.
pub fn age_food(food: &mut Option<Food>) -> Option<Food> {
    let current = food.as_mut()?;
    let ttl = current.ttl_ticks.as_mut()?;
    *ttl = ttl.saturating_sub(1);
    if *ttl == 0 { food.take() } else { None }
}

/// Keep the hazard valid for this tick.
///
/// Respawns it when absent, expired, or sitting on the snake or the food, with
/// a fresh lifetime drawn from the rule range; otherwise ages it by one tick.
/// Returns the hazard when a respawn happened.
pub fn ensure_hazard<R: Rng + ?Sized>(
    hazard: &mut Option<Hazard>,
    grid: &Grid,
    snake: &Snake,
    food_cell: Option<Cell>,
    rules: &RuleSet,
    rng: &mut R,
) -> Result<Option<Hazard>, SpawnCapacityError> {
    let needs_respawn = match hazard {
        None => true,
        Some(h) => h.ttl_ticks == 0 || Some(h.cell) == food_cell || snake.occupies(h.cell),
    };

    if !needs_respawn {
        if let Some(h) = hazard.as_mut() {
            h.ttl_ticks -= 1;
        }
        return Ok(None);
    }

    respawn_hazard(hazard, grid, snake, food_cell, rules, rng).map(Some)
}

/// Place the hazard on a fresh cell with a fresh lifetime
fn respawn_hazard<R: Rng + ?Sized>(
    hazard: &mut Option<Hazard>,
    grid: &Grid,
    snake: &Snake,
    food_cell: Option<Cell>,
    rules: &RuleSet,
    rng: &mut R,
) -> Result<Hazard, SpawnCapacityError> {
    let mut excluded: HashSet<Cell> = snake.body().iter().copied().collect();
    if let Some(cell) = food_cell {
        excluded.insert(cell);
    }
    let cell = sample_free_cell(grid, &excluded, rng)?;
    let lifetime = rng.random_range(rules.hazard_lifetime());
    let spawned = Hazard {
        cell,
        ttl_ticks: lifetime,
        lifetime,
    };
    *hazard = Some(spawned);
    log::debug!(
        "hazard spawned at ({}, {}) for {} ticks",
        cell.x,
        cell.y,
        lifetime
    );
    Ok(spawned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::snake::Direction;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Grid, Snake, RuleSet, Pcg32) {
        let grid = Grid::new(6, 6);
        let snake = Snake::new(&grid, Cell::new(3, 3), Direction::Right, 3);
        (grid, snake, RuleSet::default(), Pcg32::seed_from_u64(9))
    }

    #[test]
    fn test_ensure_food_only_when_absent() {
        let (grid, snake, rules, mut rng) = setup();
        let excluded: HashSet<Cell> = snake.body().iter().copied().collect();
        let mut food = None;

        let cell = ensure_food(&mut food, &grid, &excluded, &rules, &mut rng)
            .unwrap()
            .unwrap();
        assert!(!snake.occupies(cell));
        assert_eq!(
            ensure_food(&mut food, &grid, &excluded, &rules, &mut rng),
            Ok(None)
        );
        assert_eq!(food.unwrap().cell, cell);
    }

    #[test]
    fn test_food_expires() {
        let mut food = Some(Food {
            cell: Cell::new(0, 0),
            value: 10,
            ttl_ticks: Some(2),
        });
        assert!(age_food(&mut food).is_none());
        assert!(age_food(&mut food).is_some());
        assert!(food.is_none());
    }

    #[test]
    fn test_food_without_lifespan_never_expires() {
        let mut food = Some(Food {
            cell: Cell::new(0, 0),
            value: 10,
            ttl_ticks: None,
        });
        for _ in 0..1000 {
            assert!(age_food(&mut food).is_none());
        }
        assert!(food.is_some());
    }

    #[test]
    fn test_hazard_spawns_with_lifetime_in_range() {
        let (grid, snake, rules, mut rng) = setup();
        let food_cell = Some(Cell::new(0, 0));
        for _ in 0..50 {
            let mut hazard = None;
            let h = ensure_hazard(&mut hazard, &grid, &snake, food_cell, &rules, &mut rng)
                .unwrap()
                .unwrap();
            assert!(rules.hazard_lifetime().contains(&h.lifetime));
            assert_eq!(h.ttl_ticks, h.lifetime);
            assert!(!snake.occupies(h.cell));
            assert_ne!(Some(h.cell), food_cell);
        }
    }

    #[test]
    fn test_hazard_ages_then_respawns() {
        let (grid, snake, rules, mut rng) = setup();
        let mut hazard = Some(Hazard {
            cell: Cell::new(0, 5),
            ttl_ticks: 1,
            lifetime: 100,
        });
        assert_eq!(
            ensure_hazard(&mut hazard, &grid, &snake, None, &rules, &mut rng),
            Ok(None)
        );
        assert_eq!(hazard.unwrap().ttl_ticks, 0);
        let respawned = ensure_hazard(&mut hazard, &grid, &snake, None, &rules, &mut rng).unwrap();
        assert!(respawned.is_some());
    }

    #[test]
    fn test_hazard_on_food_respawns() {
        let (grid, snake, rules, mut rng) = setup();
        let food_cell = Cell::new(0, 5);
        let mut hazard = Some(Hazard {
            cell: food_cell,
            ttl_ticks: 50,
            lifetime: 100,
        });
        let h = ensure_hazard(&mut hazard, &grid, &snake, Some(food_cell), &rules, &mut rng)
            .unwrap()
            .unwrap();
        assert_ne!(h.cell, food_cell);
    }

    #[test]
    fn test_hazard_on_snake_respawns_off_body() {
        let (grid, snake, rules, mut rng) = setup();
        for cell in snake.body().iter().copied() {
            let mut hazard = Some(Hazard {
                cell,
                ttl_ticks: 50,
                lifetime: 100,
            });
            let h = ensure_hazard(&mut hazard, &grid, &snake, None, &rules, &mut rng)
                .unwrap()
                .unwrap();
            assert!(!snake.occupies(h.cell));
            assert_eq!(hazard, Some(h));
        }
    }

    #[test]
    fn test_remaining_fraction() {
        let h = Hazard {
            cell: Cell::new(0, 0),
            ttl_ticks: 40,
            lifetime: 160,
        };
        assert_eq!(h.remaining_fraction(), 0.25);
    }
}
