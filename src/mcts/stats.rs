//! Counters for one search call.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a call to `Agent::search` did.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Completed select, expand, playout, backpropagate cycles. Each runs
    /// exactly one playout.
    pub iterations: u32,

    /// Iterations that added a node to the tree.
    pub nodes_expanded: u32,

    /// Iterations that stopped on a node with nothing left to expand and
    /// replayed its decided position.
    pub terminal_visits: u32,

    /// Live nodes when the search finished.
    pub tree_size: usize,

    /// The node limit or the stop flag ended the search before its budget.
    pub stopped_early: bool,

    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Count one iteration.
    pub fn record_iteration(&mut self, expanded: bool) {
        self.iterations += 1;
        if expanded {
            self.nodes_expanded += 1;
        } else {
            self.terminal_visits += 1;
        }
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            f64::from(self.iterations) / secs
        }
    }
}
