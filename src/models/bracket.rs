//! Single-elimination bracket state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a bracket.
pub type BracketId = Uuid;

/// One bracket slot pairing. Empty slots are byes; a match with exactly one
/// player auto-resolves with the score "BYE".
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub p1: Option<String>,
    pub p2: Option<String>,
    pub winner: Option<String>,
    /// "X-Y" once reported, "BYE" for auto-resolved matches.
    pub score: Option<String>,
}

impl BracketMatch {
    pub fn new(p1: Option<String>, p2: Option<String>) -> Self {
        let mut m = Self {
            p1,
            p2,
            winner: None,
            score: None,
        };
        m.resolve_bye();
        m
    }

    /// A match with a single present player resolves immediately.
    fn resolve_bye(&mut self) {
        match (&self.p1, &self.p2) {
            (Some(p), None) | (None, Some(p)) => {
                self.winner = Some(p.clone());
                self.score = Some("BYE".to_string());
            }
            _ => {}
        }
    }

    /// Both slots filled: the match needs a reported result.
    pub fn is_playable(&self) -> bool {
        self.p1.is_some() && self.p2.is_some()
    }
}

/// A knockout bracket: entrants padded with byes to a power of two, one
/// round built at a time from the previous round's winners.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    pub players: Vec<String>,
    pub rounds: Vec<Vec<BracketMatch>>,
    /// Index of the round still being played; equals `rounds.len()` once
    /// the bracket has finished.
    pub current_round: usize,
}

impl Bracket {
    pub fn current_matches(&self) -> Option<&Vec<BracketMatch>> {
        self.rounds.get(self.current_round)
    }

    pub fn is_finished(&self) -> bool {
        self.current_round >= self.rounds.len()
    }

    /// The champion, once the last round has been closed.
    pub fn champion(&self) -> Option<&str> {
        if !self.is_finished() {
            return None;
        }
        self.rounds
            .last()
            .and_then(|r| r.first())
            .and_then(|m| m.winner.as_deref())
    }
}
