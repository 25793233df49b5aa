use super::direction::Direction;
use super::food::Food;
use super::grid::Grid;
use super::snake::Snake;
use crate::metrics::AnalyticsRecorder;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Whether the session is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Playing,
    GameOver,
}

/// Everything that belongs to one play-through
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub grid: Grid,
    pub score: u32,
    /// Ticks per second
    pub speed: u32,
    pub phase: Phase,
    pub analytics: AnalyticsRecorder,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Food, grid: Grid, speed: u32) -> Self {
        Self {
            snake,
            food,
            grid,
            score: 0,
            speed,
            phase: Phase::Playing,
            analytics: AnalyticsRecorder::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
