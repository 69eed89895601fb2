//! Monte Carlo Tree Search for Hex.
//!
//! ## Overview
//!
//! - **UCT selection** with a fixed exploration constant while searching and
//!   pure win ratio for the final choice
//! - **One expansion per iteration**, drawn from a shuffled pending list per
//!   node
//! - **Heuristic playouts** that answer bridge intrusions
//! - **Tree reuse across turns**: committing a move keeps the matching
//!   subtree and its statistics
//! - **Arena storage** with index handles and slot reuse
//!
//! ## Usage
//!
//! ```rust
//! use hex_mcts::core::{Coord, HexConfig, Player};
//! use hex_mcts::mcts::{Agent, SearchBudget, SearchConfig};
//!
//! let config = HexConfig::default()
//!     .with_board_size(5)
//!     .with_agent_player(Player::Red)
//!     .with_first_player(Player::Blue);
//! let mut agent = Agent::new(config, SearchConfig::default().with_seed(7)).unwrap();
//!
//! // The opponent opens; keep the agent's tree in sync.
//! agent.acknowledge_opponent_move(Coord::new(2, 2), Player::Blue).unwrap();
//!
//! // Think for 500 iterations and play.
//! let reply = agent.request_move_with(SearchBudget::Iterations(500)).unwrap();
//! assert_eq!(agent.board().occupant(reply).unwrap(), Some(Player::Red));
//! ```

pub mod commit_log;
pub mod config;
pub mod node;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use commit_log::{CommitLog, CommitRecord};
pub use config::{SearchBudget, SearchConfig, C_FINAL, C_SELECT};
pub use node::{NodeId, TreeNode};
pub use search::Agent;
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
