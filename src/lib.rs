//! # hex-mcts
//!
//! A Monte Carlo Tree Search engine that picks moves for the connection game
//! Hex on an N×N rhombic board.
//!
//! ## Design Principles
//!
//! 1. **Cheap iterations**: the board clones in O(1) for the free-move set
//!    and one flat copy for the cells; every search iteration plays on its own
//!    clone.
//!
//! 2. **Reuse across turns**: the tree always sits at the last committed
//!    position, and committing a move keeps the explored subtree.
//!
//! 3. **Deterministic under a seed**: all randomness flows from one seeded
//!    `HexRng` per agent, so iteration-bounded searches are reproducible.
//!
//! ## Modules
//!
//! - `core`: Coordinates, players, RNG, errors, configuration
//! - `board`: Board state, win detection, heuristic playouts
//! - `mcts`: Search tree, agent, statistics, commit log

pub mod board;
pub mod core;
pub mod mcts;

// Re-export commonly used types
pub use crate::core::{Coord, HexConfig, HexError, HexRng, HexRngState, Player, Result};

pub use crate::board::{BoardState, MAX_BOARD_SIZE};

pub use crate::mcts::{
    Agent, CommitLog, CommitRecord, NodeId, SearchBudget, SearchConfig, SearchStats, SearchTree,
    TreeNode, TreeStats,
};
