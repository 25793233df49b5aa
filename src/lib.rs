//! Snake Stats - terminal Snake that keeps score history
//!
//! This library provides:
//! - Core game logic (game module)
//! - Per-session counters and the analytics report (metrics module)
//! - SQLite persistence of finished games (storage module)
//! - TUI rendering and key handling (render, input modules)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
