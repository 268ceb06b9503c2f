//! Error type shared by the whole engine.

/// Errors raised by the game engine.
///
/// `InvalidAction` and `ActionOutOfRange` are caller errors and leave the
/// state untouched. `InvariantViolation` signals a programmer error (for
/// example drawing from a deck whose size is guaranteed by construction).
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("illegal action: {0}")]
    InvalidAction(String),

    #[error("action index {index} outside vocabulary of size {size}")]
    ActionOutOfRange { index: usize, size: usize },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("unknown city {0:?}")]
    UnknownCity(String),

    #[error("invalid map: {0}")]
    InvalidMap(String),

    #[error("invalid discard: {0}")]
    InvalidDiscard(String),

    #[error("episode is over; call reset")]
    GameOver,

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;
