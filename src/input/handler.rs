use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Restart,
    ShowAnalytics,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Map a key to an action for the current phase
    ///
    /// `A` doubles as "left" while playing and "analytics" after game over.
    pub fn handle_key_event(&self, key: KeyEvent, phase: Phase) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match (phase, key.code) {
            (_, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) => KeyAction::Quit,

            (Phase::GameOver, KeyCode::Char('r') | KeyCode::Char('R')) => KeyAction::Restart,
            (Phase::GameOver, KeyCode::Char('a') | KeyCode::Char('A')) => KeyAction::ShowAnalytics,
            (Phase::GameOver, _) => KeyAction::None,

            // Movement - Arrow keys
            (Phase::Playing, KeyCode::Up) => KeyAction::Turn(Direction::Up),
            (Phase::Playing, KeyCode::Down) => KeyAction::Turn(Direction::Down),
            (Phase::Playing, KeyCode::Left) => KeyAction::Turn(Direction::Left),
            (Phase::Playing, KeyCode::Right) => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            (Phase::Playing, KeyCode::Char('w') | KeyCode::Char('W')) => {
                KeyAction::Turn(Direction::Up)
            }
            (Phase::Playing, KeyCode::Char('s') | KeyCode::Char('S')) => {
                KeyAction::Turn(Direction::Down)
            }
            (Phase::Playing, KeyCode::Char('a') | KeyCode::Char('A')) => {
                KeyAction::Turn(Direction::Left)
            }
            (Phase::Playing, KeyCode::Char('d') | KeyCode::Char('D')) => {
                KeyAction::Turn(Direction::Right)
            }

            (Phase::Playing, _) => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
