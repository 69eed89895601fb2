//! Search configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{HexError, Result};

/// UCT exploration constant used while descending the tree.
pub const C_SELECT: f64 = 0.5;

/// Exploration constant for picking the move to play: pure win ratio.
pub const C_FINAL: f64 = 0.0;

/// How long one search may run.
///
/// The budget is checked between iterations, never inside one, and at least
/// one iteration always runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchBudget {
    /// Stop once this much wall-clock time has elapsed.
    Time(Duration),
    /// Stop after this many iterations. Deterministic for a fixed seed.
    Iterations(u32),
}

impl SearchBudget {
    /// A time budget, rejecting zero.
    pub fn time(budget: Duration) -> Result<Self> {
        let budget = Self::Time(budget);
        budget.validate()?;
        Ok(budget)
    }

    /// An iteration budget, rejecting zero.
    pub fn iterations(count: u32) -> Result<Self> {
        let budget = Self::Iterations(count);
        budget.validate()?;
        Ok(budget)
    }

    /// Reject budgets that would not allow any thinking.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Time(d) if d.is_zero() => Err(HexError::InvalidBudget(d)),
            Self::Iterations(0) => Err(HexError::ZeroIterations),
            _ => Ok(()),
        }
    }
}

/// Engine-side search parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Random seed for expansion order and playouts.
    /// Same seed produces deterministic searches under an iteration budget.
    pub seed: u64,

    /// Stop a search early once the tree holds this many nodes.
    /// Every node keeps its own pending-move list, so this bounds memory.
    pub max_nodes: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_nodes: 1_000_000,
        }
    }
}

impl SearchConfig {
    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom node limit.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}
