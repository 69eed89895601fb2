//! Board state: cell occupancy, legal-move bookkeeping, win detection.
//!
//! The board is cloned once per search iteration, so both halves of it are
//! cheap to copy: a flat `Vec` of cells and an `im::OrdSet` of free
//! coordinates whose clone is O(1).
//!
//! ## Invariant
//!
//! A coordinate is in the free set iff its cell is empty. The only mutation,
//! [`BoardState::place`], updates both in the same call.

use std::collections::VecDeque;

use im::OrdSet;

use crate::core::{Coord, HexError, Player, Result};

/// Largest supported board edge.
pub const MAX_BOARD_SIZE: u16 = 64;

/// An N×N Hex position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    size: u16,
    cells: Vec<Option<Player>>,
    free: OrdSet<Coord>,
}

impl BoardState {
    /// Create an empty board.
    pub fn new(size: u16) -> Result<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(HexError::InvalidBoardSize(size));
        }
        let free = (0..size)
            .flat_map(|x| (0..size).map(move |y| Coord::new(x, y)))
            .collect();
        Ok(Self {
            size,
            cells: vec![None; size as usize * size as usize],
            free,
        })
    }

    /// Build a position from a diagram, one string per row.
    ///
    /// `.` is empty, `R` and `B` are stones; whitespace is ignored, so the
    /// output of `Display` parses back.
    ///
    /// ```
    /// use hex_mcts::board::BoardState;
    /// use hex_mcts::core::Player;
    ///
    /// let board = BoardState::from_rows(&[
    ///     ". R .",
    ///     " . R .",
    ///     "  B R B",
    /// ]).unwrap();
    /// assert_eq!(board.winner(), Some(Player::Red));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let size = u16::try_from(rows.len()).map_err(|_| HexError::InvalidBoardSize(u16::MAX))?;
        let mut board = Self::new(size)?;

        for (y, row) in rows.iter().enumerate() {
            let symbols: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != size as usize {
                return Err(HexError::Config(format!(
                    "row {y} has {} cells, expected {size}",
                    symbols.len()
                )));
            }
            for (x, symbol) in symbols.into_iter().enumerate() {
                let coord = Coord::new(x as u16, y as u16);
                match symbol {
                    '.' => {}
                    'R' | 'r' => board.play(coord, Player::Red)?,
                    'B' | 'b' => board.play(coord, Player::Blue)?,
                    other => {
                        let msg = format!("unknown cell symbol {other:?} at {coord}");
                        return Err(HexError::Config(msg));
                    }
                }
            }
        }
        Ok(board)
    }

    /// Board edge length.
    #[inline]
    #[must_use]
    pub fn size(&self) -> u16 {
        self.size
    }

    fn check(&self, coord: Coord) -> Result<usize> {
        if coord.in_bounds(self.size) {
            Ok(coord.index(self.size))
        } else {
            Err(HexError::OutOfRange {
                coord,
                size: self.size,
            })
        }
    }

    /// Is the cell empty?
    pub fn is_empty(&self, coord: Coord) -> Result<bool> {
        Ok(self.cells[self.check(coord)?].is_none())
    }

    /// Who holds the cell, if anyone.
    pub fn occupant(&self, coord: Coord) -> Result<Option<Player>> {
        Ok(self.cells[self.check(coord)?])
    }

    /// Occupant of an in-bounds coordinate, without the bounds check.
    #[inline]
    pub(crate) fn get(&self, coord: Coord) -> Option<Player> {
        self.cells[coord.index(self.size)]
    }

    /// Play a stone, rejecting off-board and occupied cells.
    pub fn play(&mut self, coord: Coord, player: Player) -> Result<()> {
        let index = self.check(coord)?;
        if self.cells[index].is_some() {
            return Err(HexError::Occupied(coord));
        }
        self.place(coord, player);
        Ok(())
    }

    /// Play a stone on a cell the caller knows to be free.
    ///
    /// Search and playouts draw their coordinates from the free set, so the
    /// checks in [`BoardState::play`] would be redundant there.
    #[inline]
    pub(crate) fn place(&mut self, coord: Coord, player: Player) {
        debug_assert!(self.get(coord).is_none(), "placing on occupied cell {coord}");
        self.cells[coord.index(self.size)] = Some(player);
        let _ = self.free.remove(&coord);
    }

    /// Unplayed coordinates in `(x, y)` order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Coord> {
        self.free.iter().copied().collect()
    }

    /// Number of unplayed cells.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Number of stones on the board.
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Has every cell been played?
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// The player whose chain links both of their edges, if any.
    ///
    /// Hex has no draws, so on a full board this is always `Some`, and at most
    /// one player can ever be connected.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        Player::ALL.into_iter().find(|&player| self.connects(player))
    }

    /// Breadth-first flood from every stone on the player's start edge.
    fn connects(&self, player: Player) -> bool {
        let n = self.size as usize;
        let mut visited = vec![false; n * n];
        let mut queue = VecDeque::with_capacity(n);

        for (index, cell) in self.cells.iter().enumerate() {
            let coord = Coord::from_index(index, self.size);
            if *cell == Some(player) && player.on_start_edge(coord) {
                visited[index] = true;
                queue.push_back(coord);
            }
        }

        while let Some(current) = queue.pop_front() {
            if player.on_goal_edge(current, self.size) {
                return true;
            }
            for neighbour in current.neighbours(self.size) {
                let index = neighbour.index(self.size);
                if !visited[index] && self.cells[index] == Some(player) {
                    visited[index] = true;
                    queue.push_back(neighbour);
                }
            }
        }
        false
    }
}

impl std::fmt::Display for BoardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.size {
            write!(f, "{:indent$}", "", indent = y as usize)?;
            for x in 0..self.size {
                if x > 0 {
                    write!(f, " ")?;
                }
                let symbol = self.get(Coord::new(x, y)).map_or('.', Player::symbol);
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
