//! Error types for game construction and the terminal front end.

use thiserror::Error;

/// Errors raised while building a game or driving the terminal.
///
/// Losing or winning is never an error; these only cover bad configuration
/// and I/O failures.
#[derive(Error, Debug)]
pub enum GameError {
    /// The board cannot hold a border plus at least one interior cell.
    #[error("grid size {size} is too small, need at least 3")]
    GridTooSmall { size: usize },

    #[error("grid size {size} is too large, at most {max} fits a terminal")]
    GridTooLarge { size: usize, max: usize },

    /// Wall probability must be a finite number in `[0, 1]`.
    #[error("wall probability {0} is outside [0, 1]")]
    InvalidWallProbability(f64),

    #[error("tick period must be greater than zero")]
    InvalidTickPeriod,

    /// A hand-built layout broke a board invariant.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;
