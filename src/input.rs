use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

/// Everything a key press can ask the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    Reset,
    Quit,
    TogglePause,
}

impl Input {
    /// Unrecognized keys map to `None` and are dropped by the caller.
    pub fn from_key_event(ev: &KeyEvent) -> Option<Input> {
        if is_ctrl_c(ev) {
            return Some(Input::Quit);
        }

        let input = match ev.code {
            KeyCode::Char('w') | KeyCode::Up => Input::Move(Up),
            KeyCode::Char('a') | KeyCode::Left => Input::Move(Left),
            KeyCode::Char('s') | KeyCode::Down => Input::Move(Down),
            KeyCode::Char('d') | KeyCode::Right => Input::Move(Right),
            KeyCode::Char('r') | KeyCode::Char('R') => Input::Reset,
            KeyCode::Char('q') | KeyCode::Char('Q') => Input::Quit,
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Input::TogglePause,
            _ => return None,
        };

        Some(input)
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
