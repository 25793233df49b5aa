//! Core game logic module for Snake
//!
//! This module contains all the game logic without any terminal or database
//! dependencies. The engine hands finished games back as records; storing
//! them is the caller's job.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use config::{GameConfig, tick_interval};
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use food::Food;
pub use grid::Grid;
pub use snake::Snake;
pub use state::{GameState, Phase, Position};
