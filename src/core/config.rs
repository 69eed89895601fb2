//! Game configuration.
//!
//! Three values come from outside the engine: the board size, who opens, and
//! how long the agent may think per move. They can be built in code with the
//! `with_*` methods, deserialized with `serde`, or read from the legacy
//! two-number text file (`<first player> <size>`, where `1` means the
//! automated player opens).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{HexError, Result};
use super::player::Player;

/// Default board size.
pub const DEFAULT_BOARD_SIZE: u16 = 11;

/// Default thinking time per move.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(2500);

/// Configuration for one game against the agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexConfig {
    /// Board edge length N.
    pub board_size: u16,

    /// The player who moves first.
    pub first_player: Player,

    /// The side the agent plays.
    pub agent_player: Player,

    /// Wall-clock budget per `request_move`.
    pub time_budget: Duration,
}

impl Default for HexConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            first_player: Player::Blue,
            agent_player: Player::Red,
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }
}

impl HexConfig {
    /// Set the board size.
    #[must_use]
    pub fn with_board_size(mut self, size: u16) -> Self {
        self.board_size = size;
        self
    }

    /// Set the opening player.
    #[must_use]
    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    /// Set the side the agent plays.
    #[must_use]
    pub fn with_agent_player(mut self, player: Player) -> Self {
        self.agent_player = player;
        self
    }

    /// Set the thinking time per move.
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 || self.board_size > crate::board::MAX_BOARD_SIZE {
            return Err(HexError::InvalidBoardSize(self.board_size));
        }
        if self.time_budget.is_zero() {
            return Err(HexError::InvalidBudget(self.time_budget));
        }
        Ok(())
    }

    /// Parse the legacy `<first player> <size>` format.
    ///
    /// The agent always plays `Red`; a first value of `1` lets it open.
    pub fn parse_legacy(text: &str) -> Result<Self> {
        let mut fields = text.split_whitespace();
        let mut next = |name: &str| -> Result<u16> {
            let raw = fields
                .next()
                .ok_or_else(|| HexError::Config(format!("missing {name}")))?;
            raw.parse()
                .map_err(|_| HexError::Config(format!("{name} is not a number: {raw:?}")))
        };

        let first = next("first player")?;
        let size = next("board size")?;

        let agent_player = Player::Red;
        let first_player = if first == 1 { agent_player } else { agent_player.opponent() };

        let config = Self::default()
            .with_board_size(size)
            .with_agent_player(agent_player)
            .with_first_player(first_player);
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a legacy configuration file.
    pub fn load_legacy(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_legacy(&text)
    }
}
