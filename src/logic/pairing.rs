//! Swiss pairing: bye selection and score-group pairing for one round.

use crate::models::{CurrentRound, OpenPair, SwissTournament, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Pick the bye recipient for an odd-sized pool: uniform among players with
/// no prior bye. When every active player already has one, warn and fall
/// back to a uniform choice among all of them rather than blocking the round.
fn choose_bye<R: Rng>(
    t: &SwissTournament,
    players: &[String],
    rng: &mut R,
) -> Option<String> {
    if players.len() % 2 == 0 {
        return None;
    }
    let mut candidates: Vec<&String> = players
        .iter()
        .filter(|name| t.player(name).map(|p| p.byes == 0).unwrap_or(true))
        .collect();
    if candidates.is_empty() {
        log::warn!(
            "no active player is without a bye; picking uniformly among all {} active players",
            players.len()
        );
        candidates = players.iter().collect();
    }
    candidates.choose(rng).map(|s| (*s).clone())
}

/// Generate the current round's pairings.
///
/// 1. Collect active players (not qualified, not eliminated); an empty pool
///    yields an empty round.
/// 2. Pick the bye for odd pools and remove the recipient.
/// 3. Bucket the rest by win count, shuffle each bucket, then walk the
///    buckets from the highest score down: pair greedily, preferring the
///    first opponent not already faced and falling back to the immediate
///    next player (a repeat pairing) when everyone left is a rematch.
/// 4. An odd bucket's leftover carries into the next lower bucket; a
///    leftover after the lowest bucket swaps into the last formed pair,
///    whose displaced member becomes the bye if none was set.
pub fn generate_pairings<R: Rng>(
    t: &mut SwissTournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if !t.current.is_empty() {
        return Err(TournamentError::InvalidState);
    }
    if t.top_cut.is_some() || t.round > t.config.max_rounds {
        return Err(TournamentError::InvalidState);
    }

    let players = t.active_players();
    if players.is_empty() {
        t.current = CurrentRound::default();
        return Ok(());
    }

    let mut bye = choose_bye(t, &players, rng);
    let pool: Vec<String> = players
        .into_iter()
        .filter(|p| Some(p) != bye.as_ref())
        .collect();

    let mut groups: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for name in pool {
        let wins = t.player(&name).map(|p| p.wins).unwrap_or(0);
        groups.entry(wins).or_default().push(name);
    }
    for g in groups.values_mut() {
        g.shuffle(rng);
    }

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut carry: Vec<String> = Vec::new();
    for (_, group) in groups.into_iter().rev() {
        let mut bucket = carry;
        bucket.extend(group);
        while bucket.len() >= 2 {
            let a = bucket.remove(0);
            let idx = bucket
                .iter()
                .position(|b| !t.already_played(&a, b))
                .unwrap_or(0);
            let b = bucket.remove(idx);
            pairs.push((a, b));
        }
        carry = bucket;
    }

    if let Some(last) = carry.into_iter().next() {
        match pairs.pop() {
            Some((a, b)) => {
                pairs.push((a, last));
                bye = bye.or(Some(b));
            }
            None => bye = bye.or(Some(last)),
        }
    }

    t.current = CurrentRound {
        pairs: pairs
            .into_iter()
            .map(|(a, b)| OpenPair::new(a, b))
            .collect(),
        bye,
    };
    Ok(())
}
