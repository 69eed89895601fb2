//! Hex board model: occupancy, legal moves, win detection and playouts.

mod playout;
pub mod state;

pub use state::{BoardState, MAX_BOARD_SIZE};
