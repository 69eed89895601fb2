//! The two contestants and the board edges they own.
//!
//! `Red` links the top row (`y == 0`) to the bottom row (`y == N - 1`).
//! `Blue` links the left column (`x == 0`) to the right column (`x == N - 1`).
//! Win detection and the playout bridge heuristic both go through
//! [`Player::axis`] so the edge convention lives in one place.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// One of the two contestants. A cell holds `Option<Player>`, `None` being empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Connects top and bottom.
    Red,
    /// Connects left and right.
    Blue,
}

impl Player {
    /// Both players, `Red` first.
    pub const ALL: [Player; 2] = [Player::Red, Player::Blue];

    /// The other player.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// The coordinate this player races along: `y` for Red, `x` for Blue.
    #[inline]
    #[must_use]
    pub const fn axis(self, x: i32, y: i32) -> i32 {
        match self {
            Player::Red => y,
            Player::Blue => x,
        }
    }

    /// The other coordinate.
    #[inline]
    #[must_use]
    pub const fn cross_axis(self, x: i32, y: i32) -> i32 {
        match self {
            Player::Red => x,
            Player::Blue => y,
        }
    }

    /// Does `coord` lie on this player's start edge?
    #[inline]
    #[must_use]
    pub fn on_start_edge(self, coord: Coord) -> bool {
        self.axis(i32::from(coord.x), i32::from(coord.y)) == 0
    }

    /// Does `coord` lie on this player's goal edge?
    #[inline]
    #[must_use]
    pub fn on_goal_edge(self, coord: Coord, size: u16) -> bool {
        self.axis(i32::from(coord.x), i32::from(coord.y)) == i32::from(size) - 1
    }

    /// Single-letter board symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Blue => 'B',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Red => write!(f, "Red"),
            Player::Blue => write!(f, "Blue"),
        }
    }
}
