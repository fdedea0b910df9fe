//! Data structures for the league: players, matches, Swiss state, brackets.

mod bracket;
mod game;
mod player;
mod tournament;

pub use bracket::{Bracket, BracketId, BracketMatch};
pub use game::{CurrentRound, MatchRecord, OpenPair, TopCut, TopCutStage};
pub use player::{Player, PlayerStatus, StandingRow};
pub use tournament::{SwissConfig, SwissTournament, TournamentError, TournamentId};
