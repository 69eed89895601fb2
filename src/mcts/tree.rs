//! Arena-based search tree.
//!
//! Nodes are stored in a flat vector of slots and referenced by `NodeId`.
//! Released slots go on a free list and are reused by later expansions, so a
//! tree that is pruned every turn does not keep growing its backing storage.
//!
//! Only `children` own nodes. Releasing a node releases its whole subtree;
//! `parent` links are never followed when freeing.

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::core::{Coord, HexRng, Player};

use super::node::{NodeId, TreeNode};

/// Search tree rooted at the last committed position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTree {
    /// Node slots; `None` marks a released slot.
    nodes: Vec<Option<TreeNode>>,

    /// Released slots available for reuse.
    free_slots: Vec<NodeId>,

    /// The root node ID.
    root: NodeId,

    /// Number of live nodes.
    live: usize,
}

impl SearchTree {
    /// Create a tree for `board`, where `last_mover` made the latest move
    /// (or would have, on an empty board).
    pub fn new(board: &BoardState, last_mover: Player, rng: &mut HexRng) -> Self {
        let depth = board.stone_count() as u16;
        let root = TreeNode::root(last_mover, depth, Self::pending_moves(board, rng));
        Self {
            nodes: vec![Some(root)],
            free_slots: Vec::new(),
            root: NodeId::new(0),
            live: 1,
        }
    }

    /// Legal moves for a new node, in expansion order.
    ///
    /// A decided position gets none: it is terminal for the tree even if
    /// cells remain.
    fn pending_moves(board: &BoardState, rng: &mut HexRng) -> Vec<Coord> {
        if board.winner().is_some() {
            return Vec::new();
        }
        let mut moves = board.legal_moves();
        rng.shuffle(&mut moves);
        moves
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &TreeNode {
        self.get(self.root)
    }

    /// Get a node by ID.
    ///
    /// # Panics
    ///
    /// If `id` refers to a released slot.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &TreeNode {
        match &self.nodes[id.index()] {
            Some(node) => node,
            None => panic!("{id} refers to a released node"),
        }
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        match &mut self.nodes[id.index()] {
            Some(node) => node,
            None => panic!("{id} refers to a released node"),
        }
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// A tree always holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn alloc(&mut self, node: TreeNode) -> NodeId {
        self.live += 1;
        if let Some(id) = self.free_slots.pop() {
            self.nodes[id.index()] = Some(node);
            id
        } else {
            let id = NodeId::new(self.nodes.len() as u32);
            self.nodes.push(Some(node));
            id
        }
    }

    /// Release `id` and everything below it, children before parents.
    fn release_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        let mut order = Vec::new();
        while let Some(current) = stack.pop() {
            stack.extend(self.get(current).children.iter().copied());
            order.push(current);
        }
        for current in order.into_iter().rev() {
            self.nodes[current.index()] = None;
            self.free_slots.push(current);
            self.live -= 1;
        }
    }

    /// UCT score of `id` using its parent's visit count.
    ///
    /// The root has no parent, so only its win ratio counts.
    #[must_use]
    pub fn value(&self, id: NodeId, exploration: f64) -> f64 {
        let node = self.get(id);
        if node.parent.is_none() {
            return node.uct(0.0, 0);
        }
        node.uct(exploration, self.get(node.parent).simulations)
    }

    /// Child of `id` with the highest UCT score.
    #[must_use]
    pub fn best_child(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        self.get(id).children.iter().copied().max_by(|&a, &b| {
            self.value(a, exploration)
                .partial_cmp(&self.value(b, exploration))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Child of `id` reached by `coord`, if it was ever expanded.
    #[must_use]
    pub fn find_child(&self, id: NodeId, coord: Coord) -> Option<NodeId> {
        self.get(id)
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).coord == Some(coord))
    }

    /// Expand one pending move of `id`.
    ///
    /// Plays the move on `board`, which must hold the position of `id`, and
    /// returns the new child. `None` if nothing is pending.
    pub fn expand_one_child(
        &mut self,
        id: NodeId,
        board: &mut BoardState,
        rng: &mut HexRng,
    ) -> Option<NodeId> {
        let node = self.get_mut(id);
        let coord = node.pending.pop()?;
        let mover = node.to_move();
        let depth = node.depth + 1;

        board.place(coord, mover);
        let child = TreeNode::new(id, coord, mover, depth, Self::pending_moves(board, rng));
        let child_id = self.alloc(child);
        self.get_mut(id).children.push(child_id);
        Some(child_id)
    }

    /// Descend from the root by UCT until a node with pending moves or a
    /// terminal node, replaying each chosen move on `board`.
    pub fn select_leaf(&self, board: &mut BoardState, exploration: f64) -> NodeId {
        let mut current = self.root;
        loop {
            let node = self.get(current);
            if node.has_pending() {
                return current;
            }
            let Some(child) = self.best_child(current, exploration) else {
                return current;
            };
            let child_node = self.get(child);
            if let Some(coord) = child_node.coord {
                board.place(coord, child_node.owner);
            }
            current = child;
        }
    }

    /// Record one playout result on `leaf` and all of its ancestors.
    pub fn backpropagate(&mut self, leaf: NodeId, winner: Option<Player>) {
        let mut current = leaf;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.simulations += 1;
            if winner == Some(node.owner) {
                node.wins += 1;
            }
            current = node.parent;
        }
    }

    /// Release every child of the root except `keep`.
    ///
    /// Returns `keep`, or `None` when there was nothing to keep, in which case
    /// all children are gone. The statistics of `keep` are untouched.
    pub fn prune_to_child(&mut self, keep: Option<NodeId>) -> Option<NodeId> {
        let root = self.root;
        let children = std::mem::take(&mut self.get_mut(root).children);
        for child in children {
            if Some(child) == keep {
                self.get_mut(root).children.push(child);
            } else {
                self.release_subtree(child);
            }
        }
        keep.filter(|k| self.get(root).children.contains(k))
    }

    /// Make `child` the root, releasing the old root and any siblings still
    /// attached to it.
    ///
    /// `child` must be a child of the root.
    pub fn reroot(&mut self, child: NodeId) {
        let old = self.root;
        debug_assert!(self.get(old).children.contains(&child));

        let siblings = std::mem::take(&mut self.get_mut(old).children);
        for sibling in siblings.into_iter().filter(|&s| s != child) {
            self.release_subtree(sibling);
        }
        self.release_subtree(old);

        self.get_mut(child).parent = NodeId::NONE;
        self.root = child;
    }

    /// Iterate over live nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeId::new(i as u32), n)))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let root = self.root_node();
        let max_depth = self.iter().map(|(_, n)| n.depth).max().unwrap_or(root.depth) - root.depth;
        TreeStats {
            node_count: self.live,
            slot_count: self.nodes.len(),
            max_depth,
            root_simulations: root.simulations,
            root_children: root.children.len(),
        }
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Live nodes.
    pub node_count: usize,

    /// Allocated slots, live or free.
    pub slot_count: usize,

    /// Deepest node, counted from the root.
    pub max_depth: u16,

    /// Visits of the root.
    pub root_simulations: u32,

    /// Expanded moves at the root.
    pub root_children: usize,
}
