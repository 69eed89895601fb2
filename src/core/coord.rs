//! Board coordinates and hex adjacency.
//!
//! The board is a rhombus addressed by zero-based `(x, y)`. Adjacency uses the
//! axial pattern: every cell touches up to six others, and `DIRECTIONS` lists
//! the six offsets in cyclic order so that `DIRECTIONS[i - 1]` and
//! `DIRECTIONS[i + 1]` are both adjacent to `DIRECTIONS[i]`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Axial neighbour offsets in cyclic order.
pub const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// A cell on the board.
///
/// Ordered by `x`, then `y`. The ordering is what keeps the free-coordinate
/// set deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Coord {
    /// Create a coordinate. Bounds are checked by the board, not here.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Row-major index on a board of the given size.
    #[inline]
    #[must_use]
    pub const fn index(self, size: u16) -> usize {
        self.y as usize * size as usize + self.x as usize
    }

    /// Inverse of [`Coord::index`].
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize, size: u16) -> Self {
        Self {
            x: (index % size as usize) as u16,
            y: (index / size as usize) as u16,
        }
    }

    /// Is this coordinate inside a board of the given size?
    #[inline]
    #[must_use]
    pub const fn in_bounds(self, size: u16) -> bool {
        self.x < size && self.y < size
    }

    /// Offset by a direction, as signed coordinates (may leave the board).
    #[inline]
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32)) -> (i32, i32) {
        (i32::from(self.x) + dx, i32::from(self.y) + dy)
    }

    /// Neighbours of this cell that lie on a board of the given size.
    #[must_use]
    pub fn neighbours(self, size: u16) -> SmallVec<[Coord; 6]> {
        DIRECTIONS
            .iter()
            .filter_map(|&dir| checked(self.offset(dir), size))
            .collect()
    }
}

/// Convert signed coordinates back to a `Coord` if they are on the board.
#[inline]
#[must_use]
pub fn checked((x, y): (i32, i32), size: u16) -> Option<Coord> {
    let n = i32::from(size);
    if (0..n).contains(&x) && (0..n).contains(&y) {
        Some(Coord::new(x as u16, y as u16))
    } else {
        None
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
