//! Crate error type
//!
//! The simulation itself never fails; errors only come from the edges
//! (config files, thread lifecycle).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Game thread panicked")]
    ThreadPanicked,
}

pub type Result<T> = std::result::Result<T, Error>;
