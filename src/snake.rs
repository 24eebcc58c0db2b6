use std::collections::HashSet;

use crate::grid::Grid;
use crate::Coords;
use Direction::*;

/// Body a fresh snake starts with, tail first.
pub const INITIAL_BODY: [Coords; 4] = [(2, 0), (2, 1), (2, 2), (2, 3)];
pub const INITIAL_DIRECTION: Direction = Down;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    #[cfg(test)]
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
    grow_next_move: bool,
}

impl Snake {
    pub fn new() -> Self {
        Snake::from_body(INITIAL_BODY.to_vec(), INITIAL_DIRECTION)
    }

    /// Builds a snake from an explicit body, tail first. The body must not be empty.
    pub fn from_body(body: Vec<Coords>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least one cell");
        Snake { body, direction, grow_next_move: false }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn move_step(&mut self, grid: &Grid) {
        let old_head = self.head();

        if !self.grow_next_move {
            self.body.remove(0);
        }

        let (dx, dy) = self.direction.delta();
        let new_head = grid.wrap(old_head.0 as i32 + dx, old_head.1 as i32 + dy);

        self.body.push(new_head);
        self.grow_next_move = false;
    }

    pub fn can_change_direction_to(&self, candidate: Direction) -> bool {
        candidate != self.direction.opposite()
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        self.direction = new_direction;
    }

    #[cfg(test)]
    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn grow(&mut self) {
        self.grow_next_move = true;
    }

    #[cfg(test)]
    pub fn is_growing(&self) -> bool {
        self.grow_next_move
    }

    pub fn has_self_collision(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        !self.body.iter().all(|pos| seen.insert(*pos))
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
