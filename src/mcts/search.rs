//! The playing agent: timed MCTS search and cross-turn tree reuse.
//!
//! Each iteration clones the live board, descends the tree by UCT
//! (`C_SELECT`), expands one pending move, fills the rest of the board with a
//! heuristic playout and folds the winner back into every node on the path.
//!
//! After a move is committed, by the agent or by its opponent, the tree is
//! pruned to the matching child so that statistics gathered for that line
//! carry over to the next search. If search never explored the move, the tree
//! is dropped and rebuilt lazily on the next search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::board::BoardState;
use crate::core::{Coord, HexConfig, HexError, HexRng, Player, Result};

use super::commit_log::{CommitLog, CommitRecord};
use super::config::{SearchBudget, SearchConfig, C_FINAL, C_SELECT};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// MCTS player for one game.
///
/// Owns the live board, the search tree for the current position and the
/// random source. Calls must be serialized: a commit never runs while a
/// search is in progress.
#[derive(Debug)]
pub struct Agent {
    /// Game parameters.
    config: HexConfig,

    /// Search parameters.
    search_config: SearchConfig,

    /// Position after the last committed move.
    board: BoardState,

    /// Player to move on `board`.
    to_move: Player,

    /// Tree rooted at `board`; `None` until the first search.
    tree: Option<SearchTree>,

    /// RNG for expansion order.
    rng: HexRng,

    /// RNG for playouts.
    playout_rng: HexRng,

    /// Statistics of the last search.
    stats: SearchStats,

    /// Playouts over the agent's lifetime.
    total_playouts: u64,

    /// Set from outside to end a search at the next iteration boundary.
    stop: Arc<AtomicBool>,

    /// Optional diagnostic log.
    commit_log: Option<CommitLog>,

    /// Result of the latest commit.
    last_commit: Option<CommitRecord>,
}

impl Agent {
    /// Create an agent for a new game.
    pub fn new(config: HexConfig, search_config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let board = BoardState::new(config.board_size)?;
        let mut rng = HexRng::new(search_config.seed);
        let playout_rng = rng.fork();

        Ok(Self {
            to_move: config.first_player,
            config,
            search_config,
            board,
            tree: None,
            rng,
            playout_rng,
            stats: SearchStats::default(),
            total_playouts: 0,
            stop: Arc::new(AtomicBool::new(false)),
            commit_log: None,
            last_commit: None,
        })
    }

    /// Write a line per commit, and a summary when the agent is dropped.
    #[must_use]
    pub fn with_commit_log(mut self, log: CommitLog) -> Self {
        self.commit_log = Some(log);
        self
    }

    /// The side this agent plays.
    #[must_use]
    pub fn player(&self) -> Player {
        self.config.agent_player
    }

    /// Player to move in the current position.
    #[must_use]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// The live board.
    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Winner of the live position, if decided.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    /// The current search tree, if one exists.
    #[must_use]
    pub fn tree(&self) -> Option<&SearchTree> {
        self.tree.as_ref()
    }

    /// Statistics of the last search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Playouts run since the agent was created.
    #[must_use]
    pub fn total_playouts(&self) -> u64 {
        self.total_playouts
    }

    /// Outcome of the latest commit.
    #[must_use]
    pub fn last_commit(&self) -> Option<&CommitRecord> {
        self.last_commit.as_ref()
    }

    /// Flag that ends a running search after its current iteration.
    ///
    /// Cleared when a search starts.
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &HexConfig {
        &self.config
    }

    fn ensure_playable(&self, player: Player) -> Result<()> {
        if let Some(winner) = self.board.winner() {
            return Err(HexError::GameOver(winner));
        }
        if player != self.to_move {
            return Err(HexError::NotYourTurn {
                expected: self.to_move,
                got: player,
            });
        }
        if self.board.is_full() {
            return Err(HexError::NoLegalMoves);
        }
        Ok(())
    }

    /// Search the current position and return the best move.
    ///
    /// Does not commit the move; see [`Agent::request_move`].
    pub fn search(&mut self, budget: SearchBudget) -> Result<Coord> {
        budget.validate()?;
        self.ensure_playable(self.config.agent_player)?;

        let start = Instant::now();
        self.stats = SearchStats::default();
        self.stop.store(false, Ordering::Relaxed);

        let last_mover = self.to_move.opponent();
        let tree = self
            .tree
            .get_or_insert_with(|| SearchTree::new(&self.board, last_mover, &mut self.rng));

        loop {
            Self::iterate(
                tree,
                &self.board,
                &mut self.rng,
                &mut self.playout_rng,
                &mut self.stats,
            );

            if self.stop.load(Ordering::Relaxed) || tree.len() >= self.search_config.max_nodes {
                self.stats.stopped_early = true;
                break;
            }
            let exhausted = match budget {
                SearchBudget::Time(limit) => start.elapsed() >= limit,
                SearchBudget::Iterations(count) => self.stats.iterations >= count,
            };
            if exhausted {
                break;
            }
        }

        self.total_playouts += u64::from(self.stats.iterations);
        self.stats.tree_size = tree.len();
        self.stats.elapsed = start.elapsed();

        let best = tree.best_child(tree.root(), C_FINAL).ok_or(HexError::NoLegalMoves)?;
        let node = tree.get(best);
        let coord = node.coord.ok_or(HexError::NoLegalMoves)?;

        debug!(
            %coord,
            win_ratio = node.win_ratio().unwrap_or(0.0),
            iterations = self.stats.iterations,
            tree_size = self.stats.tree_size,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "search finished"
        );
        Ok(coord)
    }

    /// One selection, expansion, simulation and backpropagation cycle.
    fn iterate(
        tree: &mut SearchTree,
        board: &BoardState,
        rng: &mut HexRng,
        playout_rng: &mut HexRng,
        stats: &mut SearchStats,
    ) {
        let mut sim = board.clone();

        let mut leaf = tree.select_leaf(&mut sim, C_SELECT);
        let expanded = tree.expand_one_child(leaf, &mut sim, rng);
        if let Some(child) = expanded {
            leaf = child;
        }

        let node = tree.get(leaf);
        let winner = sim.random_playout(node.coord, node.to_move(), playout_rng);
        tree.backpropagate(leaf, winner);
        stats.record_iteration(expanded.is_some());
    }

    /// Play `coord` for `player` on the live board and sync the tree.
    ///
    /// The subtree under the matching child becomes the new tree, statistics
    /// included. Without a matching child the tree is dropped. The commit log
    /// only sees commits that found a tree.
    pub fn commit_move(&mut self, coord: Coord, player: Player) -> Result<()> {
        self.ensure_playable(player)?;
        self.board.play(coord, player)?;
        self.to_move = player.opponent();

        let mut record = CommitRecord {
            coord,
            player,
            nodes_before: 0,
            nodes_after: 0,
            win_ratio: None,
        };

        if let Some(mut tree) = self.tree.take() {
            record.nodes_before = tree.len();
            let keep = tree.find_child(tree.root(), coord);
            match tree.prune_to_child(keep) {
                Some(child) => {
                    tree.reroot(child);
                    record.nodes_after = tree.len();
                    record.win_ratio = tree.root_node().win_ratio();
                    self.tree = Some(tree);
                }
                None => {
                    warn!(
                        %coord,
                        %player,
                        nodes = record.nodes_before,
                        "move was never explored, dropping search tree"
                    );
                }
            }
        }

        debug!(
            %coord,
            %player,
            nodes_before = record.nodes_before,
            nodes_after = record.nodes_after,
            "move committed"
        );
        // Without a tree there was nothing to prune, so nothing to log.
        if record.nodes_before > 0 {
            if let Some(log) = &mut self.commit_log {
                log.record(&record);
            }
        }
        self.last_commit = Some(record);
        Ok(())
    }

    /// Think for the configured time, play the best move and return it.
    pub fn request_move(&mut self) -> Result<Coord> {
        let coord = self.search(SearchBudget::time(self.config.time_budget)?)?;
        self.commit_move(coord, self.config.agent_player)?;
        Ok(coord)
    }

    /// Like [`Agent::request_move`] with an explicit budget.
    pub fn request_move_with(&mut self, budget: SearchBudget) -> Result<Coord> {
        let coord = self.search(budget)?;
        self.commit_move(coord, self.config.agent_player)?;
        Ok(coord)
    }

    /// Commit a move made by the other side.
    pub fn acknowledge_opponent_move(&mut self, coord: Coord, player: Player) -> Result<()> {
        if player == self.config.agent_player {
            return Err(HexError::NotYourTurn {
                expected: player.opponent(),
                got: player,
            });
        }
        self.commit_move(coord, player)
    }
}

impl Drop for Agent {
    fn drop(&mut self) {
        if let Some(log) = &mut self.commit_log {
            log.summary(self.total_playouts);
        }
    }
}
