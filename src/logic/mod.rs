//! Tournament business logic: Swiss pairing, round commits, top cut, bracket.

mod bracket;
mod pairing;
mod rounds;
mod topcut;

pub use bracket::{advance_round, clear_score, create_bracket, report_score};
pub use pairing::generate_pairings;
pub use rounds::{finalize_round, set_pair_winner};
pub use topcut::{record_final_winner, record_semifinal_winners, TOP_CUT_SIZE};
