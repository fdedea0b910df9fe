//! Pokemon league web app: library with models and business logic.

pub mod bridge;
pub mod league;
pub mod logic;
pub mod models;
pub mod registry;
pub mod saves;
pub mod shop;
pub mod storage;

pub use logic::{
    advance_round, clear_score, create_bracket, finalize_round, generate_pairings,
    record_final_winner, record_semifinal_winners, report_score, set_pair_winner, TOP_CUT_SIZE,
};
pub use models::{
    Bracket, BracketId, BracketMatch, CurrentRound, MatchRecord, OpenPair, Player, PlayerStatus,
    StandingRow, SwissConfig, SwissTournament, TopCut, TopCutStage, TournamentError, TournamentId,
};
