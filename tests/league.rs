//! Integration tests for the league table: splits, ranking, promotion and
//! relegation, points, and persistence.

use poke_league_web::league::{rank, Division, LeagueError, LeagueMatch, LeagueState};
use poke_league_web::storage::SettingsStore;
use std::collections::HashMap;

fn roster() -> Vec<String> {
    (0..9).map(|i| format!("T{i}")).collect()
}

fn league() -> LeagueState {
    LeagueState::new(&roster())
}

/// Make the lower-indexed player win every fixture of the open split.
fn sweep_split(lg: &mut LeagueState) {
    let split = lg.split;
    let fixtures = lg.fixtures[&split].clone();
    for (i, m) in fixtures.a.iter().enumerate() {
        lg.set_winner(Division::A, i, m.p1.clone()).unwrap();
    }
    for (i, m) in fixtures.b.iter().enumerate() {
        lg.set_winner(Division::B, i, m.p1.clone()).unwrap();
    }
}

#[test]
fn divisions_split_the_roster_four_and_five() {
    let lg = league();
    assert_eq!(lg.division_a, vec!["T0", "T1", "T2", "T3"]);
    assert_eq!(lg.division_b, vec!["T4", "T5", "T6", "T7", "T8"]);
}

#[test]
fn opening_a_split_generates_round_robins() {
    let mut lg = league();
    lg.open_split().unwrap();
    let fixtures = &lg.fixtures[&1];
    assert_eq!(fixtures.a.len(), 6); // C(4,2)
    assert_eq!(fixtures.b.len(), 10); // C(5,2)
    assert!(fixtures.a.iter().all(|m| m.winner.is_none()));

    assert!(matches!(lg.open_split(), Err(LeagueError::SplitActive)));
}

#[test]
fn winners_must_be_fixture_participants() {
    let mut lg = league();
    lg.open_split().unwrap();
    assert!(matches!(
        lg.set_winner(Division::A, 0, "T8".to_string()),
        Err(LeagueError::NotAParticipant(_))
    ));
    assert!(matches!(
        lg.set_winner(Division::A, 99, "T0".to_string()),
        Err(LeagueError::MatchNotFound)
    ));
}

#[test]
fn finalize_rejects_missing_results() {
    let mut lg = league();
    lg.open_split().unwrap();
    assert!(matches!(
        lg.finalize_split(&HashMap::new()),
        Err(LeagueError::IncompleteResults)
    ));
}

#[test]
fn finalized_split_records_positions_and_movements() {
    let mut lg = league();
    lg.open_split().unwrap();
    sweep_split(&mut lg);
    let outcome = lg.finalize_split(&HashMap::new()).unwrap();

    assert_eq!(outcome.split, 1);
    assert_eq!(outcome.rank_a, vec!["T0", "T1", "T2", "T3"]);
    assert_eq!(outcome.rank_b, vec!["T4", "T5", "T6", "T7", "T8"]);
    assert_eq!(outcome.wildcard.as_deref(), Some("T8"));

    // Positions: A holds 1-4, B holds 5-9.
    assert_eq!(lg.positions["T0"][&1], 1);
    assert_eq!(lg.positions["T3"][&1], 4);
    assert_eq!(lg.positions["T4"][&1], 5);
    assert_eq!(lg.positions["T8"][&1], 9);

    // Top two of B go up, bottom two of A go down.
    assert_eq!(lg.division_a, vec!["T0", "T1", "T4", "T5"]);
    assert_eq!(lg.division_b, vec!["T2", "T3", "T6", "T7", "T8"]);
    let moves = &lg.movements[&1];
    assert_eq!(moves.up, vec!["T4", "T5"]);
    assert_eq!(moves.down, vec!["T2", "T3"]);

    assert!(!lg.active);
    assert_eq!(lg.split, 2);
}

#[test]
fn season_ends_after_max_splits() {
    let mut lg = league();
    for _ in 0..4 {
        lg.open_split().unwrap();
        sweep_split(&mut lg);
        lg.finalize_split(&HashMap::new()).unwrap();
    }
    assert!(lg.is_finished());
    assert!(matches!(lg.open_split(), Err(LeagueError::LeagueFinished)));
}

#[test]
fn cancelling_a_split_drops_its_results() {
    let mut lg = league();
    lg.open_split().unwrap();
    lg.set_winner(Division::A, 0, "T0".to_string()).unwrap();
    lg.cancel_split().unwrap();
    assert!(!lg.active);
    assert!(lg.fixtures.get(&1).is_none());

    // Reopening starts from blank fixtures.
    lg.open_split().unwrap();
    assert!(lg.fixtures[&1].a.iter().all(|m| m.winner.is_none()));
}

#[test]
fn two_way_ties_break_on_head_to_head() {
    let players: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
    let results = vec![
        LeagueMatch { p1: "A".into(), p2: "B".into(), winner: Some("B".into()) },
        LeagueMatch { p1: "A".into(), p2: "C".into(), winner: Some("A".into()) },
        LeagueMatch { p1: "A".into(), p2: "D".into(), winner: Some("A".into()) },
        LeagueMatch { p1: "B".into(), p2: "C".into(), winner: Some("C".into()) },
        LeagueMatch { p1: "B".into(), p2: "D".into(), winner: Some("B".into()) },
        LeagueMatch { p1: "C".into(), p2: "D".into(), winner: Some("D".into()) },
    ];
    // Wins: A=2, B=2, C=1, D=1; B beat A, D beat C.
    let order = rank(&players, &results, &HashMap::new());
    assert_eq!(order, vec!["B", "A", "D", "C"]);
}

#[test]
fn larger_ties_break_on_penalties_then_name() {
    let players: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
    let results = vec![
        LeagueMatch { p1: "A".into(), p2: "B".into(), winner: Some("A".into()) },
        LeagueMatch { p1: "A".into(), p2: "C".into(), winner: Some("C".into()) },
        LeagueMatch { p1: "A".into(), p2: "D".into(), winner: Some("A".into()) },
        LeagueMatch { p1: "B".into(), p2: "C".into(), winner: Some("B".into()) },
        LeagueMatch { p1: "B".into(), p2: "D".into(), winner: Some("B".into()) },
        LeagueMatch { p1: "C".into(), p2: "D".into(), winner: Some("C".into()) },
    ];
    // Wins: A=2, B=2, C=2, D=0.
    let penalties: HashMap<String, u32> =
        [("A".to_string(), 5), ("B".to_string(), 1), ("C".to_string(), 3)]
            .into_iter()
            .collect();
    let order = rank(&players, &results, &penalties);
    assert_eq!(order, vec!["B", "C", "A", "D"]);
}

#[test]
fn points_follow_positions() {
    let mut lg = league();
    lg.open_split().unwrap();
    sweep_split(&mut lg);
    lg.finalize_split(&HashMap::new()).unwrap();

    assert_eq!(lg.points_for("T0"), 9); // position 1
    assert_eq!(lg.points_for("T8"), 1); // position 9
    assert_eq!(lg.points_for("nobody"), 0);

    let penalties: HashMap<String, u32> = [("T0".to_string(), 3)].into_iter().collect();
    let table = lg.general_table(&roster(), &penalties);
    let t0 = table.iter().find(|(u, _)| u == "T0").unwrap();
    assert!((t0.1 - 8.4).abs() < 1e-9);
}

#[test]
fn state_round_trips_through_the_settings_store() {
    let path = std::env::temp_dir().join(format!("league-{}.json", uuid::Uuid::new_v4()));
    let store = SettingsStore::new(&path);

    let mut lg = league();
    lg.open_split().unwrap();
    sweep_split(&mut lg);
    lg.finalize_split(&HashMap::new()).unwrap();
    lg.save(&store).unwrap();

    let restored = LeagueState::load(&store, &roster());
    assert_eq!(restored, lg);

    std::fs::remove_file(&path).ok();
}

#[test]
fn load_falls_back_to_a_fresh_league() {
    let path = std::env::temp_dir().join(format!("league-{}.json", uuid::Uuid::new_v4()));
    let store = SettingsStore::new(&path);
    let lg = LeagueState::load(&store, &roster());
    assert_eq!(lg.split, 1);
    assert_eq!(lg.division_a.len(), 4);
}
