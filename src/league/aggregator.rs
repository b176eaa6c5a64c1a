use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::models::event::EventType;
use crate::models::standing::PointsSystem;

/// The facts of one finished match, as consumed by the standings fold.
/// Shootout tallies stay separate from the score: goals-for/against count
/// regulation and extra-time goals only, while a level score with a
/// decided shootout classifies as a win/loss.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub match_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub home_shootout_score: i32,
    pub away_shootout_score: i32,
    pub scheduled_at: DateTime<Utc>,
}

/// One computed table row. Plain data so two runs over the same input
/// compare equal field for field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub team_id: Uuid,
    pub played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub points: i32,
    pub recent_form: String,
    pub position: i32,
}

impl StandingRow {
    fn zeroed(team_id: Uuid) -> Self {
        Self {
            team_id,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            recent_form: String::new(),
            position: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

fn classify(outcome: &MatchOutcome) -> Outcome {
    if outcome.home_score > outcome.away_score {
        Outcome::HomeWin
    } else if outcome.away_score > outcome.home_score {
        Outcome::AwayWin
    } else if outcome.home_shootout_score > outcome.away_shootout_score {
        Outcome::HomeWin
    } else if outcome.away_shootout_score > outcome.home_shootout_score {
        Outcome::AwayWin
    } else {
        Outcome::Draw
    }
}

/// Fold a set of completed matches into a league table. Commutative over
/// the input order: the counters are sums, and recent form is derived
/// from the match set after a deterministic date sort. Unregistered teams
/// appearing in an outcome are ignored rather than invented.
pub fn compute_standings(
    team_ids: &[Uuid],
    outcomes: &[MatchOutcome],
    points: PointsSystem,
) -> Vec<StandingRow> {
    let mut rows: HashMap<Uuid, StandingRow> = team_ids
        .iter()
        .map(|&id| (id, StandingRow::zeroed(id)))
        .collect();

    for outcome in outcomes {
        let result = classify(outcome);

        if let Some(home) = rows.get_mut(&outcome.home_team_id) {
            home.played += 1;
            home.goals_for += outcome.home_score;
            home.goals_against += outcome.away_score;
            match result {
                Outcome::HomeWin => {
                    home.wins += 1;
                    home.points += points.win;
                }
                Outcome::Draw => {
                    home.draws += 1;
                    home.points += points.draw;
                }
                Outcome::AwayWin => {
                    home.losses += 1;
                    home.points += points.loss;
                }
            }
        }

        if let Some(away) = rows.get_mut(&outcome.away_team_id) {
            away.played += 1;
            away.goals_for += outcome.away_score;
            away.goals_against += outcome.home_score;
            match result {
                Outcome::AwayWin => {
                    away.wins += 1;
                    away.points += points.win;
                }
                Outcome::Draw => {
                    away.draws += 1;
                    away.points += points.draw;
                }
                Outcome::HomeWin => {
                    away.losses += 1;
                    away.points += points.loss;
                }
            }
        }
    }

    for form in compute_recent_form(outcomes) {
        if let Some(row) = rows.get_mut(&form.0) {
            row.recent_form = form.1;
        }
    }

    let mut table: Vec<StandingRow> = team_ids
        .iter()
        .filter_map(|id| rows.remove(id))
        .map(|mut row| {
            row.goal_difference = row.goals_for - row.goals_against;
            row
        })
        .collect();

    // Display order: points, goal difference, goals for; stable beyond that.
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });

    for (index, row) in table.iter_mut().enumerate() {
        row.position = (index + 1) as i32;
    }

    table
}

/// Last five results per team, most recent first, as "W"/"D"/"L" chars.
/// Ordered by scheduled date with the match id as deterministic tie-break.
fn compute_recent_form(outcomes: &[MatchOutcome]) -> Vec<(Uuid, String)> {
    let mut ordered: Vec<&MatchOutcome> = outcomes.iter().collect();
    ordered.sort_by(|a, b| {
        a.scheduled_at
            .cmp(&b.scheduled_at)
            .then(a.match_id.cmp(&b.match_id))
    });

    let mut history: HashMap<Uuid, Vec<char>> = HashMap::new();
    for outcome in ordered {
        let result = classify(outcome);
        let (home_char, away_char) = match result {
            Outcome::HomeWin => ('W', 'L'),
            Outcome::AwayWin => ('L', 'W'),
            Outcome::Draw => ('D', 'D'),
        };
        history.entry(outcome.home_team_id).or_default().push(home_char);
        history.entry(outcome.away_team_id).or_default().push(away_char);
    }

    history
        .into_iter()
        .map(|(team_id, results)| {
            let form: String = results.iter().rev().take(5).collect();
            (team_id, form)
        })
        .collect()
}

/// The slice of a ledger row the statistics fold needs. Rows must arrive
/// in insertion order; that order is the leaderboard tie-break.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub event_id: Uuid,
    pub event_type: EventType,
    pub player_id: Option<Uuid>,
    pub related_player_id: Option<Uuid>,
    pub in_shootout: bool,
    pub voids_event_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTotals {
    pub player_id: Uuid,
    pub goals: i64,
    pub assists: i64,
}

/// Fold the ledger into per-player goal/assist totals. Voided events and
/// shootout kicks are skipped; own goals credit nobody.
pub fn compute_player_totals(entries: &[LedgerEntry]) -> Vec<PlayerTotals> {
    let voided: HashSet<Uuid> = entries
        .iter()
        .filter_map(|entry| entry.voids_event_id)
        .collect();

    let mut order: Vec<Uuid> = Vec::new();
    let mut totals: HashMap<Uuid, PlayerTotals> = HashMap::new();

    fn credit(
        totals: &mut HashMap<Uuid, PlayerTotals>,
        order: &mut Vec<Uuid>,
        player_id: Uuid,
        goals: i64,
        assists: i64,
    ) {
        let entry = totals.entry(player_id).or_insert_with(|| {
            order.push(player_id);
            PlayerTotals { player_id, goals: 0, assists: 0 }
        });
        entry.goals += goals;
        entry.assists += assists;
    }

    for entry in entries {
        if entry.in_shootout
            || entry.event_type == EventType::EventVoided
            || voided.contains(&entry.event_id)
        {
            continue;
        }

        match entry.event_type {
            EventType::Goal => {
                if let Some(player) = entry.player_id {
                    credit(&mut totals, &mut order, player, 1, 0);
                }
                if let Some(assist) = entry.related_player_id {
                    credit(&mut totals, &mut order, assist, 0, 1);
                }
            }
            EventType::PenaltyGoal => {
                if let Some(player) = entry.player_id {
                    credit(&mut totals, &mut order, player, 1, 0);
                }
            }
            // Own goals are a team statistic only.
            _ => {}
        }
    }

    order
        .into_iter()
        .filter_map(|player_id| totals.remove(&player_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn team(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn outcome(
        id: u128,
        home: Uuid,
        away: Uuid,
        home_score: i32,
        away_score: i32,
        day: u32,
    ) -> MatchOutcome {
        MatchOutcome {
            match_id: Uuid::from_u128(id),
            home_team_id: home,
            away_team_id: away,
            home_score,
            away_score,
            home_shootout_score: 0,
            away_shootout_score: 0,
            scheduled_at: Utc.with_ymd_and_hms(2025, 3, day, 15, 0, 0).unwrap(),
        }
    }

    #[test]
    fn two_match_table() {
        let (home, away, third) = (team(1), team(2), team(3));
        let teams = [home, away, third];
        let outcomes = vec![
            outcome(10, home, away, 2, 1, 1),
            outcome(11, home, third, 0, 0, 8),
        ];

        let table = compute_standings(&teams, &outcomes, PointsSystem::default());

        let row = |id: Uuid| table.iter().find(|r| r.team_id == id).unwrap();

        let home_row = row(home);
        assert_eq!(home_row.played, 2);
        assert_eq!(home_row.wins, 1);
        assert_eq!(home_row.draws, 1);
        assert_eq!(home_row.losses, 0);
        assert_eq!(home_row.points, 4);
        assert_eq!(home_row.goal_difference, 1);
        assert_eq!(home_row.position, 1);

        let away_row = row(away);
        assert_eq!(away_row.played, 1);
        assert_eq!(away_row.losses, 1);
        assert_eq!(away_row.points, 0);
        assert_eq!(away_row.goal_difference, -1);

        let third_row = row(third);
        assert_eq!(third_row.played, 1);
        assert_eq!(third_row.draws, 1);
        assert_eq!(third_row.points, 1);
        assert_eq!(third_row.goal_difference, 0);
    }

    #[test]
    fn fold_is_idempotent_and_order_independent() {
        let (a, b, c, d) = (team(1), team(2), team(3), team(4));
        let teams = [a, b, c, d];
        let outcomes = vec![
            outcome(10, a, b, 3, 1, 1),
            outcome(11, c, d, 0, 2, 2),
            outcome(12, a, c, 1, 1, 3),
            outcome(13, b, d, 2, 2, 4),
            outcome(14, d, a, 1, 0, 5),
        ];

        let baseline = compute_standings(&teams, &outcomes, PointsSystem::default());
        assert_eq!(
            baseline,
            compute_standings(&teams, &outcomes, PointsSystem::default())
        );

        let mut reversed = outcomes.clone();
        reversed.reverse();
        assert_eq!(
            baseline,
            compute_standings(&teams, &reversed, PointsSystem::default())
        );

        let mut rotated = outcomes.clone();
        rotated.rotate_left(2);
        assert_eq!(
            baseline,
            compute_standings(&teams, &rotated, PointsSystem::default())
        );
    }

    #[test]
    fn custom_points_system() {
        let (a, b) = (team(1), team(2));
        let outcomes = vec![outcome(10, a, b, 1, 0, 1)];
        let table = compute_standings(
            &[a, b],
            &outcomes,
            PointsSystem { win: 2, draw: 1, loss: 0 },
        );
        assert_eq!(table[0].team_id, a);
        assert_eq!(table[0].points, 2);
    }

    #[test]
    fn level_score_with_shootout_classifies_as_win() {
        let (a, b) = (team(1), team(2));
        let mut decided = outcome(10, a, b, 1, 1, 1);
        decided.home_shootout_score = 3;
        decided.away_shootout_score = 4;

        let table = compute_standings(&[a, b], &[decided], PointsSystem::default());
        let row = |id: Uuid| table.iter().find(|r| r.team_id == id).unwrap();

        // Shootout decides the result, not the goal tallies.
        assert_eq!(row(b).wins, 1);
        assert_eq!(row(b).points, 3);
        assert_eq!(row(b).goals_for, 1);
        assert_eq!(row(a).losses, 1);
        assert_eq!(row(a).goals_against, 1);
    }

    #[test]
    fn tie_break_points_then_gd_then_gf() {
        let (a, b, c) = (team(1), team(2), team(3));
        // a and b are level on points; goal difference separates them
        let outcomes = vec![
            outcome(10, a, c, 4, 0, 1),
            outcome(11, b, c, 2, 0, 2),
        ];
        let table = compute_standings(&[a, b, c], &outcomes, PointsSystem::default());
        assert_eq!(table[0].team_id, a); // gd +4 over +2
        assert_eq!(table[1].team_id, b);
        assert_eq!(table[2].team_id, c);
    }

    #[test]
    fn recent_form_is_most_recent_first() {
        let (a, b) = (team(1), team(2));
        let outcomes = vec![
            outcome(10, a, b, 1, 0, 1), // W for a
            outcome(11, b, a, 2, 0, 2), // L for a
            outcome(12, a, b, 1, 1, 3), // D for a
        ];
        let table = compute_standings(&[a, b], &outcomes, PointsSystem::default());
        let row_a = table.iter().find(|r| r.team_id == a).unwrap();
        assert_eq!(row_a.recent_form, "DLW");
        let row_b = table.iter().find(|r| r.team_id == b).unwrap();
        assert_eq!(row_b.recent_form, "DWL");
    }

    fn ledger(
        id: u128,
        event_type: EventType,
        player: Option<Uuid>,
        related: Option<Uuid>,
    ) -> LedgerEntry {
        LedgerEntry {
            event_id: Uuid::from_u128(id),
            event_type,
            player_id: player,
            related_player_id: related,
            in_shootout: false,
            voids_event_id: None,
        }
    }

    #[test]
    fn player_totals_credit_goals_and_assists() {
        let scorer = team(100);
        let assister = team(101);
        let entries = vec![
            ledger(1, EventType::Goal, Some(scorer), Some(assister)),
            ledger(2, EventType::PenaltyGoal, Some(scorer), None),
            ledger(3, EventType::OwnGoal, Some(assister), None),
            ledger(4, EventType::YellowCard, Some(scorer), None),
        ];

        let totals = compute_player_totals(&entries);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].player_id, scorer);
        assert_eq!(totals[0].goals, 2);
        assert_eq!(totals[0].assists, 0);
        assert_eq!(totals[1].player_id, assister);
        assert_eq!(totals[1].goals, 0);
        assert_eq!(totals[1].assists, 1);
    }

    #[test]
    fn voided_events_do_not_count() {
        let scorer = team(100);
        let mut void = ledger(2, EventType::EventVoided, None, None);
        void.voids_event_id = Some(Uuid::from_u128(1));
        let entries = vec![
            ledger(1, EventType::Goal, Some(scorer), None),
            void,
            ledger(3, EventType::Goal, Some(scorer), None),
        ];

        let totals = compute_player_totals(&entries);
        assert_eq!(totals[0].goals, 1);
    }

    #[test]
    fn shootout_kicks_are_not_goals() {
        let scorer = team(100);
        let mut shootout = ledger(1, EventType::PenaltyGoal, Some(scorer), None);
        shootout.in_shootout = true;
        let totals = compute_player_totals(&[shootout]);
        assert!(totals.is_empty());
    }

    #[test]
    fn insertion_order_breaks_leaderboard_ties() {
        let first = team(100);
        let second = team(101);
        let entries = vec![
            ledger(1, EventType::Goal, Some(first), None),
            ledger(2, EventType::Goal, Some(second), None),
        ];
        let totals = compute_player_totals(&entries);
        assert_eq!(totals[0].player_id, first);
        assert_eq!(totals[1].player_id, second);
    }
}
