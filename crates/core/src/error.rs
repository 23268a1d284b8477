//! Error types shared by the game core.

use thiserror::Error;

/// Failures raised by grid, timer and session operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A value was rejected before any state was mutated.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The grid dimensions multiply to an odd number of cards.
    #[error("invalid argument: {columns}x{rows} grid holds an odd number of cards")]
    OddCardCount {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },

    /// The operation is not valid in the current state.
    ///
    /// Front-ends treat this as an ignored event rather than a failure.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl GameError {
    /// Whether the error represents a rejected value rather than an ignored event.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GameError::InvalidArgument(_) | GameError::OddCardCount { .. }
        )
    }
}

/// Convenience alias for results produced by the game core.
pub type GameResult<T> = Result<T, GameError>;
