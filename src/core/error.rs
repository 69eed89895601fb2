//! Error type shared by the board, the configuration layer and the agent.

use std::time::Duration;

use thiserror::Error;

use super::coord::Coord;
use super::player::Player;

/// Errors surfaced at the crate boundary.
///
/// Tree desynchronization (committing a move search never explored) is not an
/// error: the agent drops its tree and starts over.
#[derive(Debug, Error)]
pub enum HexError {
    #[error("invalid board size {0} (expected 1..={max})", max = crate::board::MAX_BOARD_SIZE)]
    InvalidBoardSize(u16),

    #[error("coordinate {coord} is outside a {size}x{size} board")]
    OutOfRange { coord: Coord, size: u16 },

    #[error("cell {0} is already occupied")]
    Occupied(Coord),

    #[error("search budget must be positive, got {0:?}")]
    InvalidBudget(Duration),

    #[error("search iteration budget must be positive")]
    ZeroIterations,

    #[error("game is over, {0} has won")]
    GameOver(Player),

    #[error("it is {expected}'s turn, not {got}'s")]
    NotYourTurn { expected: Player, got: Player },

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, HexError>;
