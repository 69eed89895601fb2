//! Core value types: coordinates, players, RNG, errors, configuration.

pub mod config;
pub mod coord;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{HexConfig, DEFAULT_BOARD_SIZE, DEFAULT_TIME_BUDGET};
pub use coord::{Coord, DIRECTIONS};
pub use error::{HexError, Result};
pub use player::Player;
pub use rng::{HexRng, HexRngState};
