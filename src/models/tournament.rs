//! SwissTournament state and TournamentError.

use crate::models::game::{CurrentRound, MatchRecord, OpenPair, TopCut};
use crate::models::player::{Player, StandingRow};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Not every open pairing has a winner selected.
    IncompleteResults,
    /// Not enough players for this format.
    NotEnoughPlayers { required: usize },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Player not part of this tournament.
    PlayerNotFound(String),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// No match at the given position.
    MatchNotFound,
    /// Equal scores cannot decide a winner.
    TiedScore,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::IncompleteResults => write!(f, "Not all matches have a result"),
            TournamentError::NotEnoughPlayers { required } => {
                write!(f, "Need at least {} players", required)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::PlayerNotFound(name) => write!(f, "Player not found: {}", name),
            TournamentError::DuplicatePlayerName => {
                write!(f, "A player with this name already exists")
            }
            TournamentError::MatchNotFound => write!(f, "Match not found"),
            TournamentError::TiedScore => {
                write!(f, "Tied scores are not allowed; enter two different scores")
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a Swiss tournament.
pub type TournamentId = Uuid;

/// Thresholds and length of the Swiss stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SwissConfig {
    pub max_rounds: u32,
    /// Wins needed to qualify for the top cut.
    pub qualify_wins: u32,
    /// Losses that knock a player out of the pairing pool.
    pub eliminate_losses: u32,
}

impl Default for SwissConfig {
    fn default() -> Self {
        Self {
            max_rounds: 7,
            qualify_wins: 4,
            eliminate_losses: 3,
        }
    }
}

/// Full Swiss-stage state: roster with counters, round history, the round
/// in progress, and the top cut once formed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwissTournament {
    pub id: TournamentId,
    pub config: SwissConfig,
    pub players: Vec<Player>,
    /// 1-based; incremented when a round is committed.
    pub round: u32,
    /// Finalized rounds, append-only.
    pub history: BTreeMap<u32, Vec<MatchRecord>>,
    pub current: CurrentRound,
    pub top_cut: Option<TopCut>,
}

impl SwissTournament {
    /// Create a tournament from a roster of names. Names must be unique
    /// (case-insensitive); any roster size is accepted, including empty.
    pub fn new(names: Vec<String>, config: SwissConfig) -> Result<Self, TournamentError> {
        let mut players: Vec<Player> = Vec::with_capacity(names.len());
        for name in names {
            let trimmed = name.trim();
            if players
                .iter()
                .any(|p| p.name.eq_ignore_ascii_case(trimmed))
            {
                return Err(TournamentError::DuplicatePlayerName);
            }
            players.push(Player::new(trimmed));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            players,
            round: 1,
            history: BTreeMap::new(),
            current: CurrentRound::default(),
            top_cut: None,
        })
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Names still in the pairing pool (neither qualified nor eliminated).
    pub fn active_players(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.name.clone())
            .collect()
    }

    pub fn qualified_count(&self) -> usize {
        self.players.iter().filter(|p| p.qualified.is_some()).count()
    }

    /// Whether these two players already met in a finalized round.
    pub fn already_played(&self, a: &str, b: &str) -> bool {
        self.history
            .values()
            .flatten()
            .any(|m| m.involves(a, b))
    }

    /// Buchholz score per player: sum of the current win counts of every
    /// opponent faced. Byes carry no opponent and are excluded.
    pub fn buchholz(&self) -> HashMap<String, u32> {
        let wins: HashMap<&str, u32> = self
            .players
            .iter()
            .map(|p| (p.name.as_str(), p.wins))
            .collect();
        let mut bh: HashMap<String, u32> =
            self.players.iter().map(|p| (p.name.clone(), 0)).collect();
        for m in self.history.values().flatten() {
            if let Some(p2) = &m.p2 {
                if let Some(w2) = wins.get(p2.as_str()) {
                    if let Some(e) = bh.get_mut(&m.p1) {
                        *e += w2;
                    }
                }
                if let Some(w1) = wins.get(m.p1.as_str()) {
                    if let Some(e) = bh.get_mut(p2) {
                        *e += w1;
                    }
                }
            }
        }
        bh
    }

    /// Standings sorted descending by (wins, Buchholz, name).
    pub fn standings(&self) -> Vec<StandingRow> {
        let bh = self.buchholz();
        let mut rows: Vec<StandingRow> = self
            .players
            .iter()
            .map(|p| StandingRow {
                name: p.name.clone(),
                wins: p.wins,
                losses: p.losses,
                byes: p.byes,
                buchholz: bh.get(&p.name).copied().unwrap_or(0),
                status: p.status(),
            })
            .collect();
        rows.sort_by(|a, b| {
            (b.wins, b.buchholz, &b.name).cmp(&(a.wins, a.buchholz, &a.name))
        });
        rows
    }

    /// Drop all state and start over with the same roster.
    pub fn reset(&mut self) {
        for p in &mut self.players {
            p.reset();
        }
        self.round = 1;
        self.history.clear();
        self.current = CurrentRound::default();
        self.top_cut = None;
    }

    /// Admin override: set a player's record directly and recompute the
    /// qualification/elimination sets from the thresholds. This is the one
    /// path that may undo a qualified/eliminated flag.
    pub fn set_record(
        &mut self,
        name: &str,
        wins: u32,
        losses: u32,
    ) -> Result<(), TournamentError> {
        let round = self.round;
        let config = self.config;
        {
            let p = self
                .player_mut(name)
                .ok_or_else(|| TournamentError::PlayerNotFound(name.to_string()))?;
            p.wins = wins;
            p.losses = losses;
        }
        for p in &mut self.players {
            p.qualified = if p.wins >= config.qualify_wins {
                Some(p.qualified.unwrap_or(round))
            } else {
                None
            };
            p.eliminated = p.losses >= config.eliminate_losses;
        }
        Ok(())
    }

    /// Admin override: replace the current round's pairings and bye by hand.
    /// Every referenced name must belong to the roster.
    pub fn set_manual_pairings(
        &mut self,
        pairs: Vec<(String, String)>,
        bye: Option<String>,
    ) -> Result<(), TournamentError> {
        for name in pairs
            .iter()
            .flat_map(|(a, b)| [a, b])
            .chain(bye.iter())
        {
            if self.player(name).is_none() {
                return Err(TournamentError::PlayerNotFound(name.clone()));
            }
        }
        self.current = CurrentRound {
            pairs: pairs
                .into_iter()
                .map(|(a, b)| OpenPair::new(a, b))
                .collect(),
            bye,
        };
        Ok(())
    }
}
