//! Plain-text diagnostic log of committed moves.
//!
//! One tab-separated line per commit: live nodes before pruning, live nodes
//! after, the win ratio of the kept subtree for the player who just moved, and
//! that player. Purely observational; write failures are reported with
//! `tracing` and otherwise ignored.

use std::fmt;
use std::io::Write;

use crate::core::{Coord, Player};

/// What one commit did to the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct CommitRecord {
    /// The committed move.
    pub coord: Coord,

    /// Who played it.
    pub player: Player,

    /// Live nodes before pruning (0 without a tree).
    pub nodes_before: usize,

    /// Live nodes after pruning (0 when the tree was dropped).
    pub nodes_after: usize,

    /// Win ratio of the kept subtree for `player`; `None` if the move had not
    /// been explored.
    pub win_ratio: Option<f64>,
}

impl CommitRecord {
    /// Did the tree survive the commit?
    #[must_use]
    pub fn kept_tree(&self) -> bool {
        self.win_ratio.is_some()
    }
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6}\t{:>6}\t", self.nodes_before, self.nodes_after)?;
        match self.win_ratio {
            Some(ratio) => write!(f, "{:>6.2} %\t", ratio * 100.0)?,
            None => write!(f, "{:>6} %\t", "?")?,
        }
        write!(f, "Player : {}", self.player)
    }
}

/// Group a count in thousands: `1234567` becomes `001 234 567`.
#[must_use]
pub fn format_grouped(count: u64) -> String {
    let units = count % 1000;
    let thousands = (count / 1000) % 1000;
    let millions = count / 1_000_000;
    format!("{millions:03} {thousands:03} {units:03}")
}

/// Line-oriented sink for commit records.
pub struct CommitLog {
    sink: Box<dyn Write + Send>,
}

impl CommitLog {
    /// Log to any writer.
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self { sink: Box::new(sink) }
    }

    /// Append one commit line.
    pub fn record(&mut self, record: &CommitRecord) {
        if let Err(err) = writeln!(self.sink, "{record}") {
            tracing::warn!(%err, "failed to write commit log");
        }
    }

    /// Append the end-of-game summary and flush.
    pub fn summary(&mut self, total_playouts: u64) {
        let total = format_grouped(total_playouts);
        let result = writeln!(self.sink, "\n\tNumber of simulations : {total}")
            .and_then(|()| self.sink.flush());
        if let Err(err) = result {
            tracing::warn!(%err, "failed to write commit log summary");
        }
    }
}

impl fmt::Debug for CommitLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitLog").finish_non_exhaustive()
    }
}
