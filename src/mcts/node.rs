//! Search tree nodes.
//!
//! Nodes live in the `SearchTree` arena and refer to each other by
//! `NodeId`. `children` are owned; `parent` is a plain index used only to read
//! the parent's visit count and to walk up during backpropagation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Coord, Player};

/// Handle to a slot in the `SearchTree` arena.
///
/// A handle stays valid until its subtree is released; the slot may then be
/// handed to a new node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Parent link of a root.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(slot: u32) -> Self {
        Self(slot)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::NONE => f.write_str("node #none"),
            Self(slot) => write!(f, "node #{slot}"),
        }
    }
}

/// One position in the search tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeNode {
    /// Move that led here from the parent. `None` only for the root of a
    /// freshly built tree.
    pub coord: Option<Coord>,

    /// The player who made `coord`. Wins are counted for this player.
    pub owner: Player,

    /// `NodeId::NONE` at the root.
    pub parent: NodeId,

    /// Number of stones played since the game began.
    pub depth: u16,

    /// Expanded children.
    pub children: SmallVec<[NodeId; 8]>,

    /// Legal moves not yet expanded, consumed from the back.
    ///
    /// Shuffled once when the node is created. Together with the moves of
    /// `children` this is exactly the set of legal moves here.
    pub pending: Vec<Coord>,

    /// Iterations whose path went through this node.
    pub simulations: u32,

    /// Of those, how many `owner` won.
    pub wins: u32,
}

impl TreeNode {
    /// Create a node reached by `owner` playing `coord`.
    pub fn new(
        parent: NodeId,
        coord: Coord,
        owner: Player,
        depth: u16,
        pending: Vec<Coord>,
    ) -> Self {
        Self {
            coord: Some(coord),
            owner,
            parent,
            depth,
            children: SmallVec::new(),
            pending,
            simulations: 0,
            wins: 0,
        }
    }

    /// Create a root node. `owner` is the player who moved last.
    pub fn root(owner: Player, depth: u16, pending: Vec<Coord>) -> Self {
        Self {
            coord: None,
            owner,
            parent: NodeId::NONE,
            depth,
            children: SmallVec::new(),
            pending,
            simulations: 0,
            wins: 0,
        }
    }

    /// The player to move from this position.
    #[inline]
    #[must_use]
    pub fn to_move(&self) -> Player {
        self.owner.opponent()
    }

    /// Are there moves left to expand?
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// No pending moves and no children: the position is decided or full.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.pending.is_empty() && self.children.is_empty()
    }

    /// `wins / simulations`, or `None` before the first visit.
    #[must_use]
    pub fn win_ratio(&self) -> Option<f64> {
        (self.simulations > 0).then(|| f64::from(self.wins) / f64::from(self.simulations))
    }

    /// UCT score given the parent's visit count.
    ///
    /// `wins/n + c * sqrt(ln(N) / n)`. Unvisited nodes score infinity; in
    /// practice search never scores one, since a node gets its first visit in
    /// the iteration that creates it.
    #[must_use]
    pub fn uct(&self, exploration: f64, parent_simulations: u32) -> f64 {
        if self.simulations == 0 {
            return f64::INFINITY;
        }
        let n = f64::from(self.simulations);
        let exploitation = f64::from(self.wins) / n;
        if exploration == 0.0 {
            return exploitation;
        }
        exploitation + exploration * (f64::from(parent_simulations).ln() / n).sqrt()
    }
}
