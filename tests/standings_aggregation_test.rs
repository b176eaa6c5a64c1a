// tests/standings_aggregation_test.rs
use chrono::{TimeZone, Utc};
use pitchside_backend::league::aggregator::{compute_standings, MatchOutcome, StandingRow};
use pitchside_backend::models::standing::PointsSystem;
use uuid::Uuid;

fn team(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn outcome(id: u128, home: Uuid, away: Uuid, home_score: i32, away_score: i32, day: u32) -> MatchOutcome {
    MatchOutcome {
        match_id: Uuid::from_u128(id),
        home_team_id: home,
        away_team_id: away,
        home_score,
        away_score,
        home_shootout_score: 0,
        away_shootout_score: 0,
        scheduled_at: Utc.with_ymd_and_hms(2025, 4, day, 18, 0, 0).unwrap(),
    }
}

fn row(table: &[StandingRow], team_id: Uuid) -> &StandingRow {
    table.iter().find(|r| r.team_id == team_id).unwrap()
}

#[test]
fn documented_two_match_scenario() {
    let (home, away, third) = (team(1), team(2), team(3));
    let outcomes = vec![
        outcome(10, home, away, 2, 1, 1),
        outcome(11, home, third, 0, 0, 8),
    ];

    let table = compute_standings(&[home, away, third], &outcomes, PointsSystem::default());

    let home_row = row(&table, home);
    assert_eq!(
        (home_row.played, home_row.wins, home_row.draws, home_row.points, home_row.goal_difference),
        (2, 1, 1, 4, 1)
    );
    let away_row = row(&table, away);
    assert_eq!((away_row.played, away_row.losses, away_row.points, away_row.goal_difference), (1, 1, 0, -1));
    let third_row = row(&table, third);
    assert_eq!((third_row.played, third_row.draws, third_row.points, third_row.goal_difference), (1, 1, 1, 0));
}

#[test]
fn empty_tournament_yields_zeroed_rows() {
    let teams = [team(1), team(2)];
    let table = compute_standings(&teams, &[], PointsSystem::default());
    assert_eq!(table.len(), 2);
    for row in &table {
        assert_eq!(row.played, 0);
        assert_eq!(row.points, 0);
        assert_eq!(row.recent_form, "");
    }
    // Positions still assigned deterministically
    assert_eq!(table[0].position, 1);
    assert_eq!(table[1].position, 2);
}

/// Folding the same matches in every permutation must produce the same
/// table. Exhaustive over four matches.
#[test]
fn aggregation_is_order_independent() {
    let (a, b, c) = (team(1), team(2), team(3));
    let teams = [a, b, c];
    let outcomes = vec![
        outcome(10, a, b, 2, 0, 1),
        outcome(11, b, c, 1, 1, 2),
        outcome(12, c, a, 0, 3, 3),
        outcome(13, a, c, 1, 2, 4),
    ];

    let baseline = compute_standings(&teams, &outcomes, PointsSystem::default());

    let mut permutation = outcomes.clone();
    permute_all(&mut permutation, 0, &mut |candidate| {
        let table = compute_standings(&teams, candidate, PointsSystem::default());
        assert_eq!(baseline, table);
    });
}

fn permute_all<F: FnMut(&[MatchOutcome])>(items: &mut Vec<MatchOutcome>, k: usize, visit: &mut F) {
    if k == items.len() {
        visit(items);
        return;
    }
    for i in k..items.len() {
        items.swap(k, i);
        permute_all(items, k + 1, visit);
        items.swap(k, i);
    }
}

#[test]
fn aggregation_is_idempotent() {
    let (a, b) = (team(1), team(2));
    let outcomes = vec![outcome(10, a, b, 1, 0, 1), outcome(11, b, a, 2, 2, 2)];
    let first = compute_standings(&[a, b], &outcomes, PointsSystem::default());
    let second = compute_standings(&[a, b], &outcomes, PointsSystem::default());
    assert_eq!(first, second);
}

#[test]
fn display_order_points_then_gd_then_gf() {
    let (a, b, c, d) = (team(1), team(2), team(3), team(4));
    let teams = [a, b, c, d];
    // a: win 3-0 (3pts, gd+3); b: win 1-0 (3pts, gd+1); d gets a 2-1 win (3pts, gd+1, gf 2)
    let outcomes = vec![
        outcome(10, a, c, 3, 0, 1),
        outcome(11, b, c, 1, 0, 2),
        outcome(12, d, c, 2, 1, 3),
    ];
    let table = compute_standings(&teams, &outcomes, PointsSystem::default());

    assert_eq!(table[0].team_id, a); // best goal difference
    assert_eq!(table[1].team_id, d); // same points and gd as b, more goals for
    assert_eq!(table[2].team_id, b);
    assert_eq!(table[3].team_id, c);
    assert_eq!(
        table.iter().map(|r| r.position).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[test]
fn shootout_decides_level_matches_without_touching_goals() {
    let (a, b) = (team(1), team(2));
    let mut decided = outcome(10, a, b, 2, 2, 1);
    decided.home_shootout_score = 5;
    decided.away_shootout_score = 4;

    let table = compute_standings(&[a, b], &[decided], PointsSystem::default());

    let winner = row(&table, a);
    assert_eq!(winner.wins, 1);
    assert_eq!(winner.points, 3);
    assert_eq!(winner.goals_for, 2);
    assert_eq!(winner.goals_against, 2);

    let loser = row(&table, b);
    assert_eq!(loser.losses, 1);
    assert_eq!(loser.points, 0);
    assert_eq!(loser.goals_for, 2);
}

#[test]
fn custom_points_weights_apply() {
    let (a, b) = (team(1), team(2));
    let outcomes = vec![
        outcome(10, a, b, 1, 0, 1),
        outcome(11, a, b, 1, 1, 2),
    ];
    let system = PointsSystem { win: 2, draw: 1, loss: 0 };
    let table = compute_standings(&[a, b], &outcomes, system);
    assert_eq!(row(&table, a).points, 3);
    assert_eq!(row(&table, b).points, 1);
}

#[test]
fn recent_form_reads_most_recent_first() {
    let (a, b) = (team(1), team(2));
    let outcomes = vec![
        outcome(10, a, b, 2, 0, 1),
        outcome(11, a, b, 0, 1, 2),
        outcome(12, a, b, 1, 1, 3),
        outcome(13, a, b, 3, 0, 4),
        outcome(14, a, b, 0, 0, 5),
        outcome(15, a, b, 0, 2, 6),
    ];
    let table = compute_standings(&[a, b], &outcomes, PointsSystem::default());
    // Six results, capped at five, newest on the left
    assert_eq!(row(&table, a).recent_form, "LDWDL");
    assert_eq!(row(&table, b).recent_form, "WDLDW");
}
