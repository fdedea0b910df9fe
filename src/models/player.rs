//! Player and standings data structures.

use serde::{Deserialize, Serialize};

/// Where a player stands in the Swiss stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Active,
    Qualified,
    Eliminated,
}

/// A player in the Swiss stage. Names double as identifiers (the roster is
/// a fixed registry of display names).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    /// Byes received so far (tracked apart from wins).
    pub byes: u32,
    /// Round in which the player crossed the qualification threshold.
    pub qualified: Option<u32>,
    pub eliminated: bool,
}

impl Player {
    /// Create a new player with the given name. Counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wins: 0,
            losses: 0,
            byes: 0,
            qualified: None,
            eliminated: false,
        }
    }

    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    /// Record a bye. Byes are tracked apart from wins so that
    /// wins + losses + byes always equals the player's history entries.
    pub fn add_bye(&mut self) {
        self.byes += 1;
    }

    /// Active means still in the pairing pool: neither qualified nor eliminated.
    pub fn is_active(&self) -> bool {
        self.qualified.is_none() && !self.eliminated
    }

    pub fn status(&self) -> PlayerStatus {
        if self.qualified.is_some() {
            PlayerStatus::Qualified
        } else if self.eliminated {
            PlayerStatus::Eliminated
        } else {
            PlayerStatus::Active
        }
    }

    /// Zero every counter and flag, keeping the name (tournament reset).
    pub fn reset(&mut self) {
        self.wins = 0;
        self.losses = 0;
        self.byes = 0;
        self.qualified = None;
        self.eliminated = false;
    }
}

/// One row of the standings table (for API responses).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub byes: u32,
    pub buchholz: u32,
    pub status: PlayerStatus,
}
