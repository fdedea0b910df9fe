//! Single-elimination bracket: creation, score reporting, advancement.

use crate::models::{Bracket, BracketMatch, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

fn next_pow2(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        n.next_power_of_two()
    }
}

/// Seed the entrants: optional shuffle, then pad with byes (empty slots) to
/// the next power of two.
fn seed_entrants<R: Rng>(players: &[String], shuffle: bool, rng: &mut R) -> Vec<Option<String>> {
    let mut pool: Vec<Option<String>> = players.iter().cloned().map(Some).collect();
    if shuffle {
        pool.shuffle(rng);
    }
    pool.resize(next_pow2(pool.len()), None);
    pool
}

/// First round: fold the seeded list (slot i against slot size-1-i) so the
/// padded byes land against distinct entrants instead of each other.
fn first_round(slots: Vec<Option<String>>) -> Vec<BracketMatch> {
    let n = slots.len();
    (0..n / 2)
        .map(|i| BracketMatch::new(slots[i].clone(), slots[n - 1 - i].clone()))
        .collect()
}

/// Later rounds: adjacent winners meet.
fn round_from_winners(winners: Vec<Option<String>>) -> Vec<BracketMatch> {
    winners
        .chunks(2)
        .map(|pair| BracketMatch::new(pair[0].clone(), pair.get(1).cloned().flatten()))
        .collect()
}

/// Build a bracket from a roster. Requires at least two entrants.
pub fn create_bracket<R: Rng>(
    players: Vec<String>,
    shuffle: bool,
    rng: &mut R,
) -> Result<Bracket, TournamentError> {
    if players.len() < 2 {
        return Err(TournamentError::NotEnoughPlayers { required: 2 });
    }
    let slots = seed_entrants(&players, shuffle, rng);
    Ok(Bracket {
        id: Uuid::new_v4(),
        players,
        rounds: vec![first_round(slots)],
        current_round: 0,
    })
}

/// Report a score for a current-round match. Ties are rejected and leave
/// the match untouched; otherwise the higher scorer wins and the score is
/// stored as "X-Y".
pub fn report_score(
    b: &mut Bracket,
    match_index: usize,
    score_a: u32,
    score_b: u32,
) -> Result<(), TournamentError> {
    if b.is_finished() {
        return Err(TournamentError::InvalidState);
    }
    let round = &mut b.rounds[b.current_round];
    let m = round.get_mut(match_index).ok_or(TournamentError::MatchNotFound)?;
    if !m.is_playable() {
        return Err(TournamentError::InvalidState);
    }
    if score_a == score_b {
        return Err(TournamentError::TiedScore);
    }
    m.winner = if score_a > score_b {
        m.p1.clone()
    } else {
        m.p2.clone()
    };
    m.score = Some(format!("{}-{}", score_a, score_b));
    Ok(())
}

/// Clear a reported score on a current-round match (bye results stay).
pub fn clear_score(b: &mut Bracket, match_index: usize) -> Result<(), TournamentError> {
    if b.is_finished() {
        return Err(TournamentError::InvalidState);
    }
    let round = &mut b.rounds[b.current_round];
    let m = round.get_mut(match_index).ok_or(TournamentError::MatchNotFound)?;
    if !m.is_playable() {
        return Err(TournamentError::InvalidState);
    }
    m.winner = None;
    m.score = None;
    Ok(())
}

/// Close the current round and build the next one from its winners. With a
/// single entrant left the bracket finishes and that entrant is champion.
pub fn advance_round(b: &mut Bracket) -> Result<(), TournamentError> {
    if b.is_finished() {
        return Err(TournamentError::InvalidState);
    }
    let current = &b.rounds[b.current_round];
    if current.iter().any(|m| m.is_playable() && m.winner.is_none()) {
        return Err(TournamentError::IncompleteResults);
    }
    let winners: Vec<Option<String>> = current.iter().map(|m| m.winner.clone()).collect();
    let remaining = winners.iter().flatten().count();
    if remaining > 1 {
        b.rounds.push(round_from_winners(winners));
    }
    b.current_round += 1;
    Ok(())
}
