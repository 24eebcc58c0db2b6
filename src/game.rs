use std::{thread::sleep, time::{Duration, Instant}};

use crate::Coords;
use crate::config::GameConfig;
use crate::input::Input;
use crate::round::{Flow, Round, TickEvent};
use crate::term::TermManager;

use anyhow::{bail, Result};
use rand::{rngs::StdRng, SeedableRng};
use crossterm::event::KeyEvent;
use tracing::{debug, info};

const POLL_INTERVAL_MS: u64 = 5;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';
const EMPTY_CHAR: char = ' ';

/// Owns the terminal, the random source and the one active round.
pub struct SnakeGame {
    config: GameConfig,
    term: TermManager,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(SnakeGame { config, term: TermManager::new()?, rng })
    }

    pub fn initialize(&mut self) -> Result<()> {
        let (term_w, term_h) = self.term.get_terminal_size();
        let (need_w, need_h) = self.config.required_terminal_size();

        if (term_w as u32) < need_w || (term_h as u32) < need_h {
            bail!(
                "terminal is {}x{}, but a {}x{} board needs at least {}x{}",
                term_w, term_h, self.config.grid.width(), self.config.grid.height(), need_w, need_h
            );
        }

        self.term.setup()
    }

    /// Returns false if the player quit from the intro screen.
    pub fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "P or Esc to pause",
            "R to restart, Q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;
        let key = self.term.read_key_blocking()?;
        Ok(starts_game(&key))
    }

    /// Runs rounds until the player quits.
    pub fn play(&mut self) -> Result<()> {
        self.term.clear()?;
        self.term.draw_borders(self.board_frame_size())?;

        let mut round = Round::new(self.config.grid, &mut self.rng);
        let mut last_tick = Instant::now();
        self.render(&round)?;

        loop {
            let mut dirty = false;

            for key_ev in self.term.read_key_events_queue(Duration::from_millis(1))? {
                let input = match Input::from_key_event(&key_ev) {
                    Some(input) => input,
                    None => continue,
                };

                match round.apply(input) {
                    Flow::Continue => {}
                    Flow::Reset => {
                        info!(score = round.session().score(), "round reset");
                        round = Round::new(self.config.grid, &mut self.rng);
                    }
                    Flow::Quit => {
                        info!(score = round.session().score(), "quit");
                        return Ok(());
                    }
                }
                dirty = true;
            }

            if last_tick.elapsed() >= self.config.tick {
                last_tick = Instant::now();
                match round.tick(&mut self.rng) {
                    TickEvent::Idle => {}
                    event => {
                        debug!(?event, "tick");
                        dirty = true;
                    }
                }
            }

            if dirty {
                self.render(&round)?;
            }

            sleep(Duration::from_millis(POLL_INTERVAL_MS));
        }
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn board_frame_size(&self) -> Coords {
        let grid = self.config.grid;
        (grid.width() * self.config.cell_size + 2, grid.height() + 2)
    }

    fn render(&mut self, round: &Round) -> Result<()> {
        for pos in round.grid().cells() {
            self.draw_cell(pos, cell_char(round, pos))?;
        }

        let (_, frame_h) = self.board_frame_size();
        let (term_w, _) = self.term.get_terminal_size();
        let status = format!("{:<width$}", round.session().status_text(), width = term_w as usize);
        self.term.print_str_at((0, frame_h), &status)?;
        self.term.flush()
    }

    fn draw_cell(&mut self, pos: Coords, ch: char) -> Result<()> {
        let cell_size = self.config.cell_size;
        let x = 1 + pos.0 * cell_size;
        let y = 1 + pos.1;

        for x_diff in 0..cell_size {
            self.term.print_at((x + x_diff, y), ch)?;
        }
        Ok(())
    }
}

/// Any key leaves the intro, except the ones that quit.
fn starts_game(key: &KeyEvent) -> bool {
    Input::from_key_event(key) != Some(Input::Quit)
}

/// What to draw on one board cell. Food is hidden once the round is over and a
/// crashed snake is drawn dead; a snake that filled the board is not.
fn cell_char(round: &Round, pos: Coords) -> char {
    let snake = round.snake();
    let session = round.session();
    let dead = session.is_finished() && !session.is_won();

    if pos == snake.head() {
        if dead {DEAD_SNAKE_CHAR} else {snake.head_char()}
    } else if snake.body().contains(&pos) {
        if dead {DEAD_SNAKE_CHAR} else {SNAKE_BODY_CHAR}
    } else if !session.is_finished() && session.has_food_collision(pos) {
        FOOD_CHAR
    } else {
        EMPTY_CHAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::session::GameSession;
    use crate::snake::{Direction, Snake};
    use crossterm::event::{KeyCode, KeyModifiers};

    const GRID: Grid = Grid::new(32, 24);

    fn rng() -> StdRng {
        StdRng::seed_from_u64(17)
    }

    fn empty_cell(round: &Round) -> Coords {
        round.grid().cells()
            .find(|pos| !round.snake().body().contains(pos) && !round.session().has_food_collision(*pos))
            .unwrap()
    }

    #[test]
    fn running_round_shows_snake_head_and_food() {
        let mut rng = rng();
        let round = Round::new(GRID, &mut rng);
        let food = round.session().food().unwrap();

        assert_eq!(cell_char(&round, food), FOOD_CHAR);
        assert_eq!(cell_char(&round, (2, 3)), 'v');
        assert_eq!(cell_char(&round, (2, 0)), SNAKE_BODY_CHAR);
        assert_eq!(cell_char(&round, empty_cell(&round)), EMPTY_CHAR);
    }

    #[test]
    fn paused_round_draws_like_a_running_one() {
        let mut rng = rng();
        let mut round = Round::new(GRID, &mut rng);
        round.apply(Input::TogglePause);
        let food = round.session().food().unwrap();

        assert!(round.session().is_paused());
        assert_eq!(cell_char(&round, food), FOOD_CHAR);
        assert_eq!(cell_char(&round, (2, 3)), 'v');
        assert_eq!(cell_char(&round, (2, 1)), SNAKE_BODY_CHAR);
    }

    #[test]
    fn lost_round_hides_food_and_marks_the_snake_dead() {
        let mut rng = rng();
        let snake = Snake::new();
        let mut session = GameSession::new(&GRID, &snake, &mut rng);
        let food = session.food().unwrap();
        session.finish();
        let round = Round::from_parts(GRID, snake, session);

        assert_eq!(cell_char(&round, food), EMPTY_CHAR);
        for pos in round.snake().body() {
            assert_eq!(cell_char(&round, *pos), DEAD_SNAKE_CHAR);
        }
    }

    #[test]
    fn won_round_draws_the_snake_alive() {
        let grid = Grid::new(3, 4);
        let mut rng = rng();
        let snake = Snake::from_body(grid.cells().collect(), Direction::Right);
        let session = GameSession::new(&grid, &snake, &mut rng);
        assert!(session.is_won());
        let round = Round::from_parts(grid, snake, session);

        assert_eq!(cell_char(&round, (2, 3)), '>');
        for pos in grid.cells().filter(|&pos| pos != (2, 3)) {
            assert_eq!(cell_char(&round, pos), SNAKE_BODY_CHAR);
        }
    }

    #[test]
    fn quit_keys_leave_the_intro() {
        let key = |code| KeyEvent { code, modifiers: KeyModifiers::NONE };

        assert!(!starts_game(&key(KeyCode::Char('q'))));
        assert!(!starts_game(&key(KeyCode::Char('Q'))));
        assert!(!starts_game(&KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }));
        assert!(starts_game(&key(KeyCode::Enter)));
        assert!(starts_game(&key(KeyCode::Char('x'))));
    }
}
