//! Integration tests for the Swiss stage: pairing, round commits, standings,
//! and the top cut.

use poke_league_web::{
    finalize_round, generate_pairings, record_final_winner, record_semifinal_winners,
    set_pair_winner, SwissConfig, SwissTournament, TopCutStage, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn tournament_with_players(n: usize) -> SwissTournament {
    let names: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
    SwissTournament::new(names, SwissConfig::default()).unwrap()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

/// Mark the first listed player of every open pair as its winner.
fn report_all_first_wins(t: &mut SwissTournament) {
    let winners: Vec<String> = t.current.pairs.iter().map(|p| p.p1.clone()).collect();
    for (i, w) in winners.into_iter().enumerate() {
        set_pair_winner(t, i, w).unwrap();
    }
}

#[test]
fn duplicate_names_are_rejected() {
    let names = vec!["Ana".to_string(), "ana".to_string()];
    assert!(matches!(
        SwissTournament::new(names, SwissConfig::default()),
        Err(TournamentError::DuplicatePlayerName)
    ));
}

#[test]
fn odd_pool_gets_exactly_one_bye() {
    let mut t = tournament_with_players(9);
    generate_pairings(&mut t, &mut rng()).unwrap();
    assert_eq!(t.current.pairs.len(), 4);
    assert!(t.current.bye.is_some());

    // Every active player appears exactly once across pairs and bye.
    let mut seen: Vec<&str> = t
        .current
        .pairs
        .iter()
        .flat_map(|p| [p.p1.as_str(), p.p2.as_str()])
        .chain(t.current.bye.as_deref())
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 9);
}

#[test]
fn even_pool_gets_no_bye() {
    let mut t = tournament_with_players(8);
    generate_pairings(&mut t, &mut rng()).unwrap();
    assert_eq!(t.current.pairs.len(), 4);
    assert_eq!(t.current.bye, None);
}

#[test]
fn empty_pool_is_a_no_op() {
    let mut t = tournament_with_players(0);
    generate_pairings(&mut t, &mut rng()).unwrap();
    assert!(t.current.is_empty());
}

#[test]
fn regenerating_an_open_round_is_rejected() {
    let mut t = tournament_with_players(8);
    generate_pairings(&mut t, &mut rng()).unwrap();
    assert!(matches!(
        generate_pairings(&mut t, &mut rng()),
        Err(TournamentError::InvalidState)
    ));
}

#[test]
fn finalize_requires_every_winner() {
    let mut t = tournament_with_players(9);
    generate_pairings(&mut t, &mut rng()).unwrap();
    let before = t.clone();
    assert!(matches!(
        finalize_round(&mut t),
        Err(TournamentError::IncompleteResults)
    ));
    // Nothing committed: pairs stay open, counters untouched.
    assert_eq!(t.current, before.current);
    assert_eq!(t.players, before.players);
    assert_eq!(t.round, 1);
}

#[test]
fn committed_round_updates_counters_and_history() {
    let mut t = tournament_with_players(9);
    generate_pairings(&mut t, &mut rng()).unwrap();
    let bye = t.current.bye.clone().unwrap();
    let winners: Vec<String> = t.current.pairs.iter().map(|p| p.p1.clone()).collect();
    let losers: Vec<String> = t.current.pairs.iter().map(|p| p.p2.clone()).collect();
    report_all_first_wins(&mut t);
    finalize_round(&mut t).unwrap();

    for w in &winners {
        let p = t.player(w).unwrap();
        assert_eq!((p.wins, p.losses), (1, 0));
    }
    for l in &losers {
        let p = t.player(l).unwrap();
        assert_eq!((p.wins, p.losses), (0, 1));
    }
    let b = t.player(&bye).unwrap();
    assert_eq!((b.wins, b.losses, b.byes), (0, 0, 1));

    assert_eq!(t.round, 2);
    assert!(t.current.is_empty());
    let round1 = &t.history[&1];
    assert_eq!(round1.len(), 5);
    assert_eq!(round1.iter().filter(|m| m.is_bye()).count(), 1);
}

#[test]
fn counters_match_history_entries() {
    let mut t = tournament_with_players(9);
    for _ in 0..4 {
        generate_pairings(&mut t, &mut rng()).unwrap();
        report_all_first_wins(&mut t);
        finalize_round(&mut t).unwrap();
        if t.top_cut.is_some() {
            break;
        }
    }
    for p in &t.players {
        let entries = t
            .history
            .values()
            .flatten()
            .filter(|m| m.p1 == p.name || m.p2.as_deref() == Some(p.name.as_str()))
            .count();
        assert_eq!((p.wins + p.losses + p.byes) as usize, entries, "{}", p.name);
    }
}

#[test]
fn byes_prefer_players_without_one() {
    let mut t = tournament_with_players(3);
    generate_pairings(&mut t, &mut rng()).unwrap();
    let first_bye = t.current.bye.clone().unwrap();
    report_all_first_wins(&mut t);
    finalize_round(&mut t).unwrap();

    generate_pairings(&mut t, &mut rng()).unwrap();
    let second_bye = t.current.bye.clone().unwrap();
    assert_ne!(first_bye, second_bye);
}

#[test]
fn rematches_are_avoided_while_alternatives_exist() {
    let mut t = tournament_with_players(4);
    t.set_manual_pairings(
        vec![
            ("P0".to_string(), "P1".to_string()),
            ("P2".to_string(), "P3".to_string()),
        ],
        None,
    )
    .unwrap();
    report_all_first_wins(&mut t);
    finalize_round(&mut t).unwrap();

    // Level the records so all four land in one score bucket.
    for name in ["P0", "P1", "P2", "P3"] {
        t.set_record(name, 1, 0).unwrap();
    }
    for seed in 0..20 {
        t.current = Default::default();
        let mut r = StdRng::seed_from_u64(seed);
        generate_pairings(&mut t, &mut r).unwrap();
        for pair in &t.current.pairs {
            assert!(
                !t.already_played(&pair.p1, &pair.p2),
                "seed {seed} repeated {} vs {}",
                pair.p1,
                pair.p2
            );
        }
    }
}

#[test]
fn buchholz_and_standings_order() {
    let mut t = tournament_with_players(4);
    t.set_manual_pairings(
        vec![
            ("P0".to_string(), "P1".to_string()),
            ("P2".to_string(), "P3".to_string()),
        ],
        None,
    )
    .unwrap();
    report_all_first_wins(&mut t); // P0, P2 win
    finalize_round(&mut t).unwrap();

    t.set_manual_pairings(
        vec![
            ("P0".to_string(), "P2".to_string()),
            ("P1".to_string(), "P3".to_string()),
        ],
        None,
    )
    .unwrap();
    report_all_first_wins(&mut t); // P0, P1 win
    finalize_round(&mut t).unwrap();

    // Wins: P0=2, P1=1, P2=1, P3=0. Every Buchholz is 2.
    let bh = t.buchholz();
    for name in ["P0", "P1", "P2", "P3"] {
        assert_eq!(bh[name], 2, "{name}");
    }

    // (wins, buchholz, name) descending: P1 and P2 tie, P2 sorts first.
    let standings = t.standings();
    let order: Vec<&str> = standings.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["P0", "P2", "P1", "P3"]);
}

#[test]
fn qualification_and_elimination_are_monotonic() {
    let mut t = tournament_with_players(9);
    let mut qualified_seen: Vec<(String, u32)> = Vec::new();
    let mut eliminated_seen: Vec<String> = Vec::new();
    for _ in 0..7 {
        if t.top_cut.is_some() {
            break;
        }
        generate_pairings(&mut t, &mut rng()).unwrap();
        report_all_first_wins(&mut t);
        finalize_round(&mut t).unwrap();

        for (name, round) in &qualified_seen {
            assert_eq!(t.player(name).unwrap().qualified, Some(*round));
        }
        for name in &eliminated_seen {
            assert!(t.player(name).unwrap().eliminated);
        }
        for p in &t.players {
            if let Some(round) = p.qualified {
                if !qualified_seen.iter().any(|(n, _)| n == &p.name) {
                    qualified_seen.push((p.name.clone(), round));
                }
            }
            if p.eliminated && !eliminated_seen.contains(&p.name) {
                eliminated_seen.push(p.name.clone());
            }
        }

        // Qualified and eliminated players leave the pairing pool.
        let active = t.active_players();
        for (name, _) in &qualified_seen {
            assert!(!active.contains(name));
        }
        for name in &eliminated_seen {
            assert!(!active.contains(name));
        }
    }
    // By round 8 at the latest the top cut has formed.
    assert!(t.top_cut.is_some());
}

#[test]
fn top_cut_runs_semis_then_final() {
    let mut t = tournament_with_players(9);
    while t.top_cut.is_none() {
        generate_pairings(&mut t, &mut rng()).unwrap();
        report_all_first_wins(&mut t);
        finalize_round(&mut t).unwrap();
    }
    let tc = t.top_cut.clone().unwrap();
    assert_eq!(tc.finalists.len(), 4);
    assert_eq!(tc.semis[0], (tc.finalists[0].clone(), tc.finalists[3].clone()));
    assert_eq!(tc.semis[1], (tc.finalists[1].clone(), tc.finalists[2].clone()));
    assert_eq!(tc.stage(), TopCutStage::SemisPending);

    // Final before semis is rejected.
    assert!(matches!(
        record_final_winner(&mut t, tc.finalists[0].clone()),
        Err(TournamentError::InvalidState)
    ));

    let (s1, s2) = (tc.semis[0].0.clone(), tc.semis[1].0.clone());
    record_semifinal_winners(&mut t, s1.clone(), s2.clone()).unwrap();
    let tc = t.top_cut.clone().unwrap();
    assert_eq!(tc.stage(), TopCutStage::FinalPending);
    assert_eq!(tc.final_pair, Some((s1.clone(), s2.clone())));

    // Semis cannot be re-recorded once the final is set.
    assert!(matches!(
        record_semifinal_winners(&mut t, s1.clone(), s2.clone()),
        Err(TournamentError::InvalidState)
    ));

    record_final_winner(&mut t, s1.clone()).unwrap();
    let tc = t.top_cut.clone().unwrap();
    assert_eq!(tc.stage(), TopCutStage::ChampionDecided);
    assert_eq!(tc.champion, Some(s1));

    // No pairing after the cut, and no second final.
    assert!(matches!(
        generate_pairings(&mut t, &mut rng()),
        Err(TournamentError::InvalidState)
    ));
    assert!(matches!(
        record_final_winner(&mut t, s2),
        Err(TournamentError::InvalidState)
    ));
}

#[test]
fn qualified_players_keep_their_round_number() {
    let mut t = tournament_with_players(9);
    while t.top_cut.is_none() {
        generate_pairings(&mut t, &mut rng()).unwrap();
        report_all_first_wins(&mut t);
        finalize_round(&mut t).unwrap();
    }
    for p in &t.players {
        if let Some(round) = p.qualified {
            assert!(round < t.round);
            assert!(p.wins >= t.config.qualify_wins);
        }
    }
}

#[test]
fn reset_drops_all_state() {
    let mut t = tournament_with_players(9);
    generate_pairings(&mut t, &mut rng()).unwrap();
    report_all_first_wins(&mut t);
    finalize_round(&mut t).unwrap();

    t.reset();
    assert_eq!(t.round, 1);
    assert!(t.history.is_empty());
    assert!(t.current.is_empty());
    assert!(t.top_cut.is_none());
    for p in &t.players {
        assert_eq!((p.wins, p.losses, p.byes), (0, 0, 0));
        assert_eq!(p.qualified, None);
        assert!(!p.eliminated);
    }
}

#[test]
fn manual_pairings_reject_unknown_names() {
    let mut t = tournament_with_players(4);
    assert!(matches!(
        t.set_manual_pairings(vec![("P0".to_string(), "Nobody".to_string())], None),
        Err(TournamentError::PlayerNotFound(_))
    ));
}

#[test]
fn set_record_recomputes_thresholds() {
    let mut t = tournament_with_players(4);
    t.set_record("P0", 4, 0).unwrap();
    t.set_record("P1", 0, 3).unwrap();
    assert_eq!(t.player("P0").unwrap().qualified, Some(1));
    assert!(t.player("P1").unwrap().eliminated);

    // The override path may also undo either flag.
    t.set_record("P0", 3, 0).unwrap();
    t.set_record("P1", 0, 2).unwrap();
    assert_eq!(t.player("P0").unwrap().qualified, None);
    assert!(!t.player("P1").unwrap().eliminated);
}
