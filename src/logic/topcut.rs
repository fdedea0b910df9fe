//! Top cut: a four-player playoff formed from the Swiss standings.

use crate::models::{SwissTournament, TopCut, TopCutStage, TournamentError};

/// Finalists in the playoff. The semifinal layout (1v4, 2v3) assumes four.
pub const TOP_CUT_SIZE: usize = 4;

/// Form the top cut from the current standings: qualified players seeded by
/// (qualification round, name), topped up from the rest by
/// (wins, Buchholz, name) descending. With fewer than four candidates in
/// total no cut is created.
pub(crate) fn build_top_cut(t: &mut SwissTournament) {
    let mut qualified: Vec<(u32, String)> = t
        .players
        .iter()
        .filter_map(|p| p.qualified.map(|rnd| (rnd, p.name.clone())))
        .collect();
    qualified.sort();
    let mut finalists: Vec<String> = qualified.into_iter().map(|(_, name)| name).collect();

    if finalists.len() < TOP_CUT_SIZE {
        let bh = t.buchholz();
        let mut candidates: Vec<&crate::models::Player> = t
            .players
            .iter()
            .filter(|p| !finalists.contains(&p.name))
            .collect();
        candidates.sort_by(|a, b| {
            let ka = (a.wins, bh.get(&a.name).copied().unwrap_or(0), &a.name);
            let kb = (b.wins, bh.get(&b.name).copied().unwrap_or(0), &b.name);
            kb.cmp(&ka)
        });
        for p in candidates {
            if finalists.len() >= TOP_CUT_SIZE {
                break;
            }
            finalists.push(p.name.clone());
        }
    }
    finalists.truncate(TOP_CUT_SIZE);
    if finalists.len() < TOP_CUT_SIZE {
        log::warn!(
            "only {} candidates for the top cut; leaving the playoff unformed",
            finalists.len()
        );
        return;
    }

    t.top_cut = Some(TopCut {
        semis: [
            (finalists[0].clone(), finalists[3].clone()),
            (finalists[1].clone(), finalists[2].clone()),
        ],
        finalists,
        semi_winners: Vec::new(),
        final_pair: None,
        champion: None,
    });
}

/// Record both semifinal winners; they meet in the final.
pub fn record_semifinal_winners(
    t: &mut SwissTournament,
    first: String,
    second: String,
) -> Result<(), TournamentError> {
    let tc = t.top_cut.as_mut().ok_or(TournamentError::InvalidState)?;
    if tc.stage() != TopCutStage::SemisPending {
        return Err(TournamentError::InvalidState);
    }
    tc.semi_winners = vec![first.clone(), second.clone()];
    tc.final_pair = Some((first, second));
    Ok(())
}

/// Record the final's winner: the tournament champion.
pub fn record_final_winner(
    t: &mut SwissTournament,
    champion: String,
) -> Result<(), TournamentError> {
    let tc = t.top_cut.as_mut().ok_or(TournamentError::InvalidState)?;
    if tc.stage() != TopCutStage::FinalPending {
        return Err(TournamentError::InvalidState);
    }
    tc.champion = Some(champion);
    Ok(())
}
