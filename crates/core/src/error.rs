//! Error type shared by the core traits (sensor, display, input).
//!
//! Rule and session failures are not errors: an empty origin or an illegal
//! destination is an ordinary outcome of [`crate::session`]. Only collaborator
//! failures end up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChessyError {
    #[error("sensor scan failed: {0}")]
    Sensor(String),

    #[error("display failed: {0}")]
    Display(String),

    #[error("input failed: {0}")]
    Input(#[from] std::io::Error),

    #[error("journal write failed: {0}")]
    Journal(String),
}

pub type Result<T> = std::result::Result<T, ChessyError>;
