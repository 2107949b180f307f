//! Snake body and direction rules

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};

/// Movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit displacement in grid units (rows grow downward)
    pub fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// The player's snake. Head is `body[0]`, tail is the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Direction,
}

impl Snake {
    /// Lay out a straight snake of `length` cells with the head at `head`,
    /// trailing behind it opposite to `direction`.
    pub fn new(grid: &Grid, head: Cell, direction: Direction, length: usize) -> Self {
        let back = direction.opposite().vector();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        for _ in 0..length.max(1) {
            body.push_back(cell);
            cell = grid.wrap(cell, back);
        }
        Self {
            body,
            direction,
            pending: direction,
        }
    }

    /// Build a snake from explicit cells, head first. `None` for an empty body.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I, direction: Direction) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            direction,
            pending: direction,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Direction applied on the last step
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next step will apply
    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    /// Queue a direction for the next step.
    ///
    /// A reversal of the active direction is ignored. Returns whether the
    /// request was accepted.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            log::debug!(
                "ignoring reverse turn {} while moving {}",
                direction.as_str(),
                self.direction.as_str()
            );
            return false;
        }
        self.pending = direction;
        true
    }

    /// Activate the pending direction and return the candidate head cell.
    /// The body is not touched until `commit`.
    pub fn step(&mut self, grid: &Grid) -> Cell {
        self.direction = self.pending;
        grid.wrap(self.head(), self.direction.vector())
    }

    /// Prepend `new_head`; drop the tail unless growing
    pub fn commit(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether moving the head to `new_head` runs into the body.
    ///
    /// When not growing, the tail vacates this tick and is not an obstacle.
    pub fn collides_with_self(&self, new_head: Cell, grow: bool) -> bool {
        let checked = if grow {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(checked).any(|c| *c == new_head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(8, 8)
    }

    #[test]
    fn test_from_cells_needs_a_head() {
        assert!(Snake::from_cells(Vec::<Cell>::new(), Direction::Up).is_none());
        let snake = Snake::from_cells([Cell::new(2, 2)], Direction::Up).unwrap();
        assert_eq!(snake.head(), snake.tail());
        assert!(!snake.collides_with_self(Cell::new(2, 2), false));
    }

    #[test]
    fn test_new_lays_body_behind_head() {
        let snake = Snake::new(&grid(), Cell::new(4, 4), Direction::Right, 3);
        let body: Vec<_> = snake.body().iter().copied().collect();
        assert_eq!(
            body,
            vec![Cell::new(4, 4), Cell::new(3, 4), Cell::new(2, 4)]
        );
    }

    #[test]
    fn test_new_wraps_body() {
        let snake = Snake::new(&grid(), Cell::new(0, 0), Direction::Right, 3);
        assert_eq!(snake.tail(), Cell::new(6, 0));
    }

    #[test]
    fn test_reverse_is_ignored() {
        let g = grid();
        for d in Direction::ALL {
            let mut snake = Snake::new(&g, Cell::new(4, 4), d, 3);
            assert!(!snake.set_pending_direction(d.opposite()));
            snake.step(&g);
            assert_eq!(snake.direction(), d);
        }
    }

    #[test]
    fn test_last_valid_direction_wins() {
        let g = grid();
        let mut snake = Snake::new(&g, Cell::new(4, 4), Direction::Right, 3);
        assert!(snake.set_pending_direction(Direction::Up));
        assert!(snake.set_pending_direction(Direction::Down));
        // Left reverses the active direction (Right), not the pending one
        assert!(!snake.set_pending_direction(Direction::Left));
        let head = snake.step(&g);
        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(head, Cell::new(4, 5));
    }

    #[test]
    fn test_step_does_not_mutate_body() {
        let g = grid();
        let mut snake = Snake::new(&g, Cell::new(4, 4), Direction::Right, 3);
        let before = snake.clone();
        let head = snake.step(&g);
        assert_eq!(head, Cell::new(5, 4));
        assert_eq!(snake.body(), before.body());
    }

    #[test]
    fn test_commit_move_and_grow() {
        let g = grid();
        let mut snake = Snake::new(&g, Cell::new(4, 4), Direction::Right, 3);

        let head = snake.step(&g);
        snake.commit(head, false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 4));
        assert_eq!(snake.tail(), Cell::new(3, 4));

        let head = snake.step(&g);
        snake.commit(head, true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Cell::new(3, 4));
    }

    #[test]
    fn test_tail_is_not_an_obstacle_when_moving() {
        // 2x2 loop: head (0,0), tail (0,1)
        let snake = Snake::from_cells(
            [
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(1, 1),
                Cell::new(0, 1),
            ],
            Direction::Left,
        ).unwrap();
        assert!(!snake.collides_with_self(Cell::new(0, 1), false));
        assert!(snake.collides_with_self(Cell::new(0, 1), true));
        assert!(snake.collides_with_self(Cell::new(1, 1), false));
    }
}
