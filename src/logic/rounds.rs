//! Result recording and round commit for the Swiss stage.

use crate::logic::topcut::{build_top_cut, TOP_CUT_SIZE};
use crate::models::{CurrentRound, MatchRecord, SwissTournament, TournamentError};

/// Record the winner of one open pairing, by position in the current round.
///
/// The winner string is trusted input: a value equal to the pair's first
/// player credits that player, anything else credits the second.
pub fn set_pair_winner(
    t: &mut SwissTournament,
    index: usize,
    winner: String,
) -> Result<(), TournamentError> {
    let pair = t
        .current
        .pairs
        .get_mut(index)
        .ok_or(TournamentError::MatchNotFound)?;
    pair.winner = Some(winner);
    Ok(())
}

/// Commit the current round: apply counters, append history, update
/// qualification/elimination, advance the round number, and form the top
/// cut once its trigger is met.
///
/// Rejected when no round is open or any pairing lacks a winner; nothing is
/// committed partially and the pairs stay open until every winner is set.
pub fn finalize_round(t: &mut SwissTournament) -> Result<(), TournamentError> {
    if t.current.is_empty() {
        return Err(TournamentError::InvalidState);
    }
    if t.current.pairs.iter().any(|p| p.winner.is_none()) {
        return Err(TournamentError::IncompleteResults);
    }

    let round = t.round;
    let pairs = t.current.pairs.clone();
    let bye = t.current.bye.clone();

    let mut records: Vec<MatchRecord> = Vec::with_capacity(pairs.len() + 1);
    for pair in pairs {
        let credited = match pair.winner {
            Some(w) if w == pair.p1 => pair.p1.clone(),
            _ => pair.p2.clone(),
        };
        let loser = if credited == pair.p1 {
            pair.p2.clone()
        } else {
            pair.p1.clone()
        };
        t.player_mut(&credited)
            .ok_or_else(|| TournamentError::PlayerNotFound(credited.clone()))?
            .add_win();
        t.player_mut(&loser)
            .ok_or_else(|| TournamentError::PlayerNotFound(loser.clone()))?
            .add_loss();
        records.push(MatchRecord::pair(pair.p1, pair.p2, credited));
    }
    if let Some(bye_player) = bye {
        t.player_mut(&bye_player)
            .ok_or_else(|| TournamentError::PlayerNotFound(bye_player.clone()))?
            .add_bye();
        records.push(MatchRecord::bye(bye_player));
    }

    // History is append-only: never replace an already-finalized round.
    t.history.entry(round).or_insert(records);

    let config = t.config;
    for p in &mut t.players {
        if p.qualified.is_none() && p.wins >= config.qualify_wins {
            p.qualified = Some(round);
        }
        if !p.eliminated && p.losses >= config.eliminate_losses {
            p.eliminated = true;
        }
    }

    t.round += 1;
    t.current = CurrentRound::default();

    if t.top_cut.is_none()
        && (t.qualified_count() >= TOP_CUT_SIZE || t.round > t.config.max_rounds)
    {
        build_top_cut(t);
    }
    Ok(())
}
