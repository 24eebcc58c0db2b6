use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::Grid;
use crate::snake::Snake;
use crate::Coords;

/// Picks a random free cell for the food, or `None` when `occupied` covers the
/// whole board.
pub fn place_food<R: Rng + ?Sized>(grid: &Grid, occupied: &[Coords], rng: &mut R) -> Option<Coords> {
    let choices: Vec<Coords> = grid.cells().filter(|pos| !occupied.contains(pos)).collect();
    choices.choose(rng).copied()
}

/// Score and food of one round, plus its paused/finished flags.
///
/// A session is always created next to a fresh [`Snake`] and is thrown away
/// together with it on reset.
#[derive(Debug, Clone)]
pub struct GameSession {
    score: u32,
    food: Option<Coords>,
    finished: bool,
    won: bool,
    paused: bool,
}

impl GameSession {
    pub fn new<R: Rng + ?Sized>(grid: &Grid, snake: &Snake, rng: &mut R) -> Self {
        let mut session = GameSession { score: 0, food: None, finished: false, won: false, paused: false };
        session.place_next_food(grid, snake, rng);
        session
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current food cell. Only `None` once the snake has filled the board.
    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn has_food_collision(&self, pos: Coords) -> bool {
        self.food == Some(pos)
    }

    pub fn record_hit<R: Rng + ?Sized>(&mut self, grid: &Grid, snake: &Snake, rng: &mut R) {
        self.score += 1;
        self.place_next_food(grid, snake, rng);
    }

    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True when the round ended because no free cell was left for food.
    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn status_text(&self) -> String {
        if self.finished {
            let headline = if self.won { "You won!" } else { "Game over," };
            format!("{} score: {}. Press 'R' to restart, 'Q' to quit.", headline, self.score)
        } else if self.paused {
            format!("Game paused, score: {}. Press 'P' to resume.", self.score)
        } else {
            format!("Score: {}", self.score)
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn place_next_food<R: Rng + ?Sized>(&mut self, grid: &Grid, snake: &Snake, rng: &mut R) {
        self.food = place_food(grid, snake.body(), rng);

        if self.food.is_none() {
            // Nowhere left to put food: the snake covers the board.
            self.won = true;
            self.finish();
        }
    }
}
