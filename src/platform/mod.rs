//! Platform layer
//!
//! Handles everything time- and thread-related around the simulation:
//! - Frame delta clock
//! - The game thread and its pause/resume/stop scheduler
//! - A demo auto-sorter that plays through the pointer interface

pub mod autoplay;
pub mod clock;
pub mod game_thread;

pub use autoplay::AutoSorter;
pub use clock::FrameClock;
pub use game_thread::{Command, GameLoop, GameOverCallback, GameThread, RunState};
