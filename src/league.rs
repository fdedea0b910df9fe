//! League table: two divisions playing round-robin splits, with
//! promotion/relegation between them and a season-long points total.
//!
//! State round-trips as JSON through the [`SettingsStore`] under the
//! `league_state` key, so it survives restarts unlike the session-scoped
//! tournaments.

use crate::storage::SettingsStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io;

/// Splits played over a season.
pub const MAX_SPLITS: u32 = 4;

/// Division A holds positions 1-4, division B positions 5-9.
const DIVISION_A_SIZE: usize = 4;
const DIVISION_B_SIZE: usize = 5;

/// Settings-store key for the serialized state.
const STATE_KEY: &str = "league_state";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Division {
    A,
    B,
}

/// Errors from league operations; all user-facing and recoverable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// A split is already being edited.
    SplitActive,
    /// No split is open for edits.
    SplitClosed,
    /// All splits have been played.
    LeagueFinished,
    /// Some fixture in A or B has no winner yet.
    IncompleteResults,
    /// No fixture at the given position.
    MatchNotFound,
    /// The winner is not one of the fixture's two players.
    NotAParticipant(String),
    /// Division sizes do not allow finalizing (A needs 4 players, B needs 5).
    InvalidDivisions,
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::SplitActive => write!(f, "A split is already open"),
            LeagueError::SplitClosed => write!(f, "No split is open"),
            LeagueError::LeagueFinished => write!(f, "The league has finished; no more splits"),
            LeagueError::IncompleteResults => write!(f, "Some fixtures in A or B have no winner"),
            LeagueError::MatchNotFound => write!(f, "Fixture not found"),
            LeagueError::NotAParticipant(name) => {
                write!(f, "{} is not part of this fixture", name)
            }
            LeagueError::InvalidDivisions => {
                write!(f, "Divisions must hold 4 (A) and 5 (B) players to finalize")
            }
        }
    }
}

impl std::error::Error for LeagueError {}

/// One round-robin fixture inside a division.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueMatch {
    pub p1: String,
    pub p2: String,
    pub winner: Option<String>,
}

/// All fixtures of one split.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SplitFixtures {
    pub a: Vec<LeagueMatch>,
    pub b: Vec<LeagueMatch>,
}

/// Who moved between divisions when a split closed.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Movements {
    pub up: Vec<String>,
    pub down: Vec<String>,
}

/// Result of finalizing a split.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SplitOutcome {
    pub split: u32,
    pub rank_a: Vec<String>,
    pub rank_b: Vec<String>,
    /// Last-placed player of B, owed the consolation wildcard.
    pub wildcard: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueState {
    /// 1-based split counter; `> MAX_SPLITS` once the season is over.
    pub split: u32,
    /// Whether the current split is open for result edits.
    pub active: bool,
    pub division_a: Vec<String>,
    pub division_b: Vec<String>,
    /// Fixtures per split.
    pub fixtures: BTreeMap<u32, SplitFixtures>,
    /// Final position per player per split.
    pub positions: HashMap<String, BTreeMap<u32, u32>>,
    pub movements: BTreeMap<u32, Movements>,
}

/// Full round-robin inside one division, in roster order.
fn round_robin(players: &[String]) -> Vec<LeagueMatch> {
    let mut out = Vec::new();
    for i in 0..players.len() {
        for j in i + 1..players.len() {
            out.push(LeagueMatch {
                p1: players[i].clone(),
                p2: players[j].clone(),
                winner: None,
            });
        }
    }
    out
}

fn head_to_head<'a>(p1: &'a str, p2: &'a str, results: &'a [LeagueMatch]) -> Option<&'a str> {
    results
        .iter()
        .find(|m| {
            (m.p1 == p1 && m.p2 == p2) || (m.p1 == p2 && m.p2 == p1)
        })
        .and_then(|m| m.winner.as_deref())
        .filter(|w| *w == p1 || *w == p2)
}

/// Rank a division: wins descending; two-way ties by head-to-head, larger
/// ties by the penalty metric ascending, then name.
pub fn rank(
    players: &[String],
    results: &[LeagueMatch],
    penalties: &HashMap<String, u32>,
) -> Vec<String> {
    let mut wins: HashMap<&str, u32> = players.iter().map(|p| (p.as_str(), 0)).collect();
    for m in results {
        if let Some(w) = &m.winner {
            if let Some(e) = wins.get_mut(w.as_str()) {
                *e += 1;
            }
        }
    }

    let mut groups: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for p in players {
        groups
            .entry(wins.get(p.as_str()).copied().unwrap_or(0))
            .or_default()
            .push(p.clone());
    }

    let mut ranking = Vec::with_capacity(players.len());
    for (_, mut group) in groups.into_iter().rev() {
        match group.len() {
            1 => ranking.append(&mut group),
            2 => {
                match head_to_head(&group[0], &group[1], results) {
                    Some(w) => {
                        let loser = if w == group[0] { group[1].clone() } else { group[0].clone() };
                        ranking.push(w.to_string());
                        ranking.push(loser);
                    }
                    None => {
                        group.sort();
                        ranking.append(&mut group);
                    }
                }
            }
            _ => {
                group.sort_by_key(|p| {
                    (penalties.get(p).copied().unwrap_or(0), p.clone())
                });
                ranking.append(&mut group);
            }
        }
    }
    ranking
}

impl LeagueState {
    /// Fresh league: first four roster names into A, the next five into B.
    pub fn new(roster: &[String]) -> Self {
        let division_a = roster.iter().take(DIVISION_A_SIZE).cloned().collect();
        let division_b = roster
            .iter()
            .skip(DIVISION_A_SIZE)
            .take(DIVISION_B_SIZE)
            .cloned()
            .collect();
        Self {
            split: 1,
            active: false,
            division_a,
            division_b,
            fixtures: BTreeMap::new(),
            positions: HashMap::new(),
            movements: BTreeMap::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.split > MAX_SPLITS
    }

    /// Open the current split for edits, generating its fixtures if absent.
    pub fn open_split(&mut self) -> Result<(), LeagueError> {
        if self.active {
            return Err(LeagueError::SplitActive);
        }
        if self.is_finished() {
            return Err(LeagueError::LeagueFinished);
        }
        let split = self.split;
        if !self.fixtures.contains_key(&split) {
            self.fixtures.insert(
                split,
                SplitFixtures {
                    a: round_robin(&self.division_a),
                    b: round_robin(&self.division_b),
                },
            );
        }
        self.active = true;
        Ok(())
    }

    /// Discard the open split's edits entirely.
    pub fn cancel_split(&mut self) -> Result<(), LeagueError> {
        if !self.active {
            return Err(LeagueError::SplitClosed);
        }
        self.fixtures.remove(&self.split);
        self.active = false;
        Ok(())
    }

    /// Record the winner of one fixture in the open split.
    pub fn set_winner(
        &mut self,
        division: Division,
        index: usize,
        winner: String,
    ) -> Result<(), LeagueError> {
        if !self.active {
            return Err(LeagueError::SplitClosed);
        }
        let fixtures = self
            .fixtures
            .get_mut(&self.split)
            .ok_or(LeagueError::SplitClosed)?;
        let list = match division {
            Division::A => &mut fixtures.a,
            Division::B => &mut fixtures.b,
        };
        let m = list.get_mut(index).ok_or(LeagueError::MatchNotFound)?;
        if winner != m.p1 && winner != m.p2 {
            return Err(LeagueError::NotAParticipant(winner));
        }
        m.winner = Some(winner);
        Ok(())
    }

    /// Close the split: rank both divisions, record positions (A: 1-4,
    /// B: 5-9), apply promotion/relegation (top two of B up, bottom two of
    /// A down), log the movements, and move to the next split.
    pub fn finalize_split(
        &mut self,
        penalties: &HashMap<String, u32>,
    ) -> Result<SplitOutcome, LeagueError> {
        if !self.active {
            return Err(LeagueError::SplitClosed);
        }
        if self.division_a.len() != DIVISION_A_SIZE || self.division_b.len() != DIVISION_B_SIZE {
            return Err(LeagueError::InvalidDivisions);
        }
        let split = self.split;
        let fixtures = self
            .fixtures
            .get(&split)
            .ok_or(LeagueError::SplitClosed)?;
        if fixtures.a.iter().chain(&fixtures.b).any(|m| m.winner.is_none()) {
            return Err(LeagueError::IncompleteResults);
        }

        let rank_a = rank(&self.division_a, &fixtures.a, penalties);
        let rank_b = rank(&self.division_b, &fixtures.b, penalties);
        for (i, user) in rank_a.iter().enumerate() {
            self.positions
                .entry(user.clone())
                .or_default()
                .insert(split, i as u32 + 1);
        }
        for (j, user) in rank_b.iter().enumerate() {
            self.positions
                .entry(user.clone())
                .or_default()
                .insert(split, j as u32 + 5);
        }

        self.division_a = vec![
            rank_a[0].clone(),
            rank_a[1].clone(),
            rank_b[0].clone(),
            rank_b[1].clone(),
        ];
        self.division_b = vec![
            rank_a[2].clone(),
            rank_a[3].clone(),
            rank_b[2].clone(),
            rank_b[3].clone(),
            rank_b[4].clone(),
        ];
        self.movements.insert(
            split,
            Movements {
                up: vec![rank_b[0].clone(), rank_b[1].clone()],
                down: vec![rank_a[2].clone(), rank_a[3].clone()],
            },
        );
        self.active = false;
        self.split = split + 1;

        Ok(SplitOutcome {
            split,
            wildcard: rank_b.last().cloned(),
            rank_a,
            rank_b,
        })
    }

    /// Season points: `10 - position`, summed over finalized splits.
    pub fn points_for(&self, user: &str) -> u32 {
        self.positions
            .get(user)
            .map(|splits| splits.values().map(|pos| 10u32.saturating_sub(*pos)).sum())
            .unwrap_or(0)
    }

    /// The general table: points minus a 0.2 deduction per penalty unit,
    /// rounded to one decimal, sorted descending.
    pub fn general_table(
        &self,
        roster: &[String],
        penalties: &HashMap<String, u32>,
    ) -> Vec<(String, f64)> {
        let mut rows: Vec<(String, f64)> = roster
            .iter()
            .map(|user| {
                let base = f64::from(self.points_for(user));
                let penalty = f64::from(penalties.get(user).copied().unwrap_or(0));
                let total = ((base - 0.2 * penalty) * 10.0).round() / 10.0;
                (user.clone(), total)
            })
            .collect();
        rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        rows
    }

    /// Drop everything and start a fresh season with the given roster.
    pub fn reset(&mut self, roster: &[String]) {
        *self = Self::new(roster);
    }

    /// Restore from the settings store, or start fresh if nothing usable
    /// is stored.
    pub fn load(store: &SettingsStore, roster: &[String]) -> Self {
        match store.get(STATE_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("stored league state is not usable: {}; starting fresh", e);
                Self::new(roster)
            }),
            None => Self::new(roster),
        }
    }

    pub fn save(&self, store: &SettingsStore) -> io::Result<()> {
        let raw = serde_json::to_string(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        store.set(STATE_KEY, &raw)
    }
}
