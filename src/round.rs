use rand::Rng;
use tracing::{debug, info, trace};

use crate::grid::Grid;
use crate::input::Input;
use crate::session::GameSession;
use crate::snake::Snake;

/// What a single tick did to the round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// Paused or finished, nothing moved.
    Idle,
    Moved,
    Ate,
    Won,
    Crashed,
}

/// What the driver has to do after an input was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Reset,
    Quit,
}

/// The active snake and the session it belongs to. Both are created together
/// and a reset replaces the whole round, never single fields.
pub struct Round {
    grid: Grid,
    snake: Snake,
    session: GameSession,
}

impl Round {
    pub fn new<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Self {
        let snake = Snake::new();
        let session = GameSession::new(&grid, &snake, rng);
        info!(food = ?session.food(), "new round");
        Round { grid, snake, session }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Advances the snake one cell and resolves food and self collisions, in
    /// that order. Does nothing while paused or finished.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickEvent {
        if self.session.is_finished() || self.session.is_paused() {
            return TickEvent::Idle;
        }

        self.snake.move_step(&self.grid);
        trace!(head = ?self.snake.head(), "moved");
        let mut event = TickEvent::Moved;

        if self.session.has_food_collision(self.snake.head()) {
            self.session.record_hit(&self.grid, &self.snake, rng);
            self.snake.grow();

            if self.session.is_won() {
                info!(score = self.session.score(), "board filled, round won");
                return TickEvent::Won;
            }

            debug!(score = self.session.score(), food = ?self.session.food(), "food eaten");
            event = TickEvent::Ate;
        }

        if self.snake.has_self_collision() {
            self.session.finish();
            info!(score = self.session.score(), head = ?self.snake.head(), "snake hit itself");
            event = TickEvent::Crashed;
        }

        event
    }

    pub fn apply(&mut self, input: Input) -> Flow {
        match input {
            Input::Move(dir) => {
                if !self.session.is_paused() && self.snake.can_change_direction_to(dir) {
                    self.snake.set_direction(dir);
                }
                Flow::Continue
            }
            Input::TogglePause => {
                if self.session.is_paused() {
                    self.session.unpause();
                } else {
                    self.session.pause();
                }
                debug!(paused = self.session.is_paused(), "pause toggled");
                Flow::Continue
            }
            Input::Reset => Flow::Reset,
            Input::Quit => Flow::Quit,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(grid: Grid, snake: Snake, session: GameSession) -> Self {
        Round { grid, snake, session }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{Direction::*, INITIAL_BODY};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const GRID: Grid = Grid::new(32, 24);

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// A fresh round whose food sits right under the snake's next head.
    fn round_about_to_eat(rng: &mut StdRng) -> Round {
        let snake = Snake::new();
        let mut session = GameSession::new(&GRID, &snake, rng);
        while session.food() != Some((2, 4)) {
            session = GameSession::new(&GRID, &snake, rng);
        }
        Round::from_parts(GRID, snake, session)
    }

    #[test]
    fn tick_moves_the_snake_down() {
        let mut rng = rng();
        let mut round = Round::new(GRID, &mut rng);
        let food = round.session().food().unwrap();

        let event = round.tick(&mut rng);

        if food == (2, 4) {
            assert_eq!(event, TickEvent::Ate);
        } else {
            assert_eq!(event, TickEvent::Moved);
        }
        assert_eq!(round.snake().body(), &[(2, 1), (2, 2), (2, 3), (2, 4)]);
    }

    #[test]
    fn eating_scores_and_grows_on_the_following_tick() {
        let mut rng = rng();
        let mut round = round_about_to_eat(&mut rng);

        assert_eq!(round.tick(&mut rng), TickEvent::Ate);
        assert_eq!(round.session().score(), 1);
        assert!(round.snake().is_growing());
        assert_eq!(round.snake().body().len(), INITIAL_BODY.len());
        let food = round.session().food().unwrap();
        assert!(!round.snake().body().contains(&food));

        round.tick(&mut rng);
        assert_eq!(round.snake().body().len(), INITIAL_BODY.len() + 1);
    }

    #[test]
    fn paused_round_does_not_move_or_turn() {
        let mut rng = rng();
        let mut round = Round::new(GRID, &mut rng);

        assert_eq!(round.apply(Input::TogglePause), Flow::Continue);
        assert!(round.session().is_paused());
        assert_eq!(round.tick(&mut rng), TickEvent::Idle);
        assert_eq!(round.snake().body(), &INITIAL_BODY);

        round.apply(Input::Move(Left));
        assert_eq!(round.snake().get_direction(), Down);

        round.apply(Input::TogglePause);
        assert!(!round.session().is_paused());
        round.apply(Input::Move(Left));
        assert_eq!(round.snake().get_direction(), Left);
    }

    #[test]
    fn reversing_is_ignored() {
        let mut rng = rng();
        let mut round = Round::new(GRID, &mut rng);

        round.apply(Input::Move(Up));
        assert_eq!(round.snake().get_direction(), Down);
        round.apply(Input::Move(Down));
        assert_eq!(round.snake().get_direction(), Down);
    }

    #[test]
    fn self_collision_finishes_and_freezes_the_round() {
        let mut rng = rng();
        let snake = Snake::from_body(vec![(3, 3), (3, 2), (4, 2), (5, 2), (5, 3), (4, 3)], Left);
        let mut round = Round::from_parts(GRID, snake.clone(), GameSession::new(&GRID, &snake, &mut rng));
        // Growing keeps the tail in place so the head runs into it.
        round.snake.grow();

        assert_eq!(round.tick(&mut rng), TickEvent::Crashed);
        assert!(round.session().is_finished());
        assert!(round.session().status_text().starts_with("Game over"));

        let body = round.snake().body().to_vec();
        assert_eq!(round.tick(&mut rng), TickEvent::Idle);
        assert_eq!(round.snake().body(), &body[..]);
    }

    #[test]
    fn filling_the_board_wins() {
        let grid = Grid::new(3, 4);
        let mut rng = rng();
        // Snake covers every cell but (2, 3) and heads straight into it.
        let mut body: Vec<_> = grid.cells().filter(|&pos| pos != (2, 3)).collect();
        body.retain(|&pos| pos != (1, 3));
        body.push((1, 3));
        let snake = Snake::from_body(body, Right);
        let session = GameSession::new(&grid, &snake, &mut rng);
        assert_eq!(session.food(), Some((2, 3)));
        let mut round = Round::from_parts(grid, snake, session);
        round.snake.grow();

        assert_eq!(round.tick(&mut rng), TickEvent::Won);
        assert!(round.session().is_won());
        assert!(round.session().is_finished());
        assert_eq!(round.tick(&mut rng), TickEvent::Idle);
    }

    #[test]
    fn reset_and_quit_are_left_to_the_driver() {
        let mut rng = rng();
        let mut round = Round::new(GRID, &mut rng);

        assert_eq!(round.apply(Input::Reset), Flow::Reset);
        assert_eq!(round.apply(Input::Quit), Flow::Quit);
    }

    #[test]
    fn reset_after_finish_starts_over() {
        let mut rng = rng();
        let mut round = Round::new(GRID, &mut rng);
        round.apply(Input::Move(Right));
        round.tick(&mut rng);
        round.session.finish();

        if round.apply(Input::Reset) == Flow::Reset {
            round = Round::new(GRID, &mut rng);
        }

        assert!(!round.session().is_finished());
        assert!(!round.session().is_paused());
        assert_eq!(round.session().score(), 0);
        assert_eq!(round.snake().body(), &INITIAL_BODY);
        assert_eq!(round.snake().get_direction(), Down);
    }
}
