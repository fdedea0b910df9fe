//! Match records, the in-progress round, and the top cut.

use serde::{Deserialize, Serialize};

/// A finalized match in round history. A bye is recorded with `p2 = None`
/// and the bye recipient as winner.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub p1: String,
    pub p2: Option<String>,
    pub winner: Option<String>,
}

impl MatchRecord {
    pub fn pair(p1: impl Into<String>, p2: impl Into<String>, winner: impl Into<String>) -> Self {
        Self {
            p1: p1.into(),
            p2: Some(p2.into()),
            winner: Some(winner.into()),
        }
    }

    pub fn bye(player: impl Into<String>) -> Self {
        let player = player.into();
        Self {
            p1: player.clone(),
            p2: None,
            winner: Some(player),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.p2.is_none()
    }

    /// Unordered comparison against a pair of names (for repeat-pairing checks).
    pub fn involves(&self, a: &str, b: &str) -> bool {
        match &self.p2 {
            Some(p2) => (self.p1 == a && p2 == b) || (self.p1 == b && p2 == a),
            None => false,
        }
    }
}

/// One unresolved pairing of the round in progress.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OpenPair {
    pub p1: String,
    pub p2: String,
    /// None until the organizer records a winner.
    pub winner: Option<String>,
}

impl OpenPair {
    pub fn new(p1: impl Into<String>, p2: impl Into<String>) -> Self {
        Self {
            p1: p1.into(),
            p2: p2.into(),
            winner: None,
        }
    }
}

/// The round currently being played: open pairings plus the bye recipient.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CurrentRound {
    pub pairs: Vec<OpenPair>,
    pub bye: Option<String>,
}

impl CurrentRound {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.bye.is_none()
    }
}

/// Progress of the top cut, strictly forward.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopCutStage {
    SemisPending,
    FinalPending,
    ChampionDecided,
}

/// Single-elimination playoff among the four best-placed Swiss players.
/// Seeded 1v4 and 2v3; the semifinal winners meet in one final.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TopCut {
    pub finalists: Vec<String>,
    pub semis: [(String, String); 2],
    pub semi_winners: Vec<String>,
    pub final_pair: Option<(String, String)>,
    pub champion: Option<String>,
}

impl TopCut {
    pub fn stage(&self) -> TopCutStage {
        if self.champion.is_some() {
            TopCutStage::ChampionDecided
        } else if self.final_pair.is_some() {
            TopCutStage::FinalPending
        } else {
            TopCutStage::SemisPending
        }
    }
}
