// tests/player_stats_test.rs
use pitchside_backend::league::aggregator::{compute_player_totals, LedgerEntry};
use pitchside_backend::models::event::EventType;
use uuid::Uuid;

fn entry(id: u128, event_type: EventType, player: Option<Uuid>, related: Option<Uuid>) -> LedgerEntry {
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
fn goals_and_assists_accumulate() {
    let striker = Uuid::from_u128(1);
    let winger = Uuid::from_u128(2);
    let entries = vec![
        entry(10, EventType::Goal, Some(striker), Some(winger)),
        entry(11, EventType::Goal, Some(striker), None),
        entry(12, EventType::PenaltyGoal, Some(winger), None),
        entry(13, EventType::Goal, Some(winger), Some(striker)),
    ];

    let totals = compute_player_totals(&entries);
    let striker_row = totals.iter().find(|t| t.player_id == striker).unwrap();
    assert_eq!(striker_row.goals, 2);
    assert_eq!(striker_row.assists, 1);

    let winger_row = totals.iter().find(|t| t.player_id == winger).unwrap();
    assert_eq!(winger_row.goals, 2);
    assert_eq!(winger_row.assists, 1);
}

#[test]
fn own_goals_credit_no_player() {
    let defender = Uuid::from_u128(1);
    let totals = compute_player_totals(&[entry(10, EventType::OwnGoal, Some(defender), None)]);
    assert!(totals.is_empty());
}

#[test]
fn voided_goal_is_uncredited() {
    let striker = Uuid::from_u128(1);
    let mut void = entry(11, EventType::EventVoided, None, None);
    void.voids_event_id = Some(Uuid::from_u128(10));

    let entries = vec![
        entry(10, EventType::Goal, Some(striker), None),
        void,
    ];
    let totals = compute_player_totals(&entries);
    assert!(totals.is_empty());
}

#[test]
fn shootout_kicks_never_count_as_goals() {
    let taker = Uuid::from_u128(1);
    let mut kick = entry(10, EventType::PenaltyGoal, Some(taker), None);
    kick.in_shootout = true;
    assert!(compute_player_totals(&[kick]).is_empty());
}

#[test]
fn cards_and_ball_events_do_not_score() {
    let player = Uuid::from_u128(1);
    let entries = vec![
        entry(10, EventType::YellowCard, Some(player), None),
        entry(11, EventType::RedCard, Some(player), None),
        entry(12, EventType::Corner, None, None),
        entry(13, EventType::PenaltyMiss, Some(player), None),
    ];
    assert!(compute_player_totals(&entries).is_empty());
}

#[test]
fn ledger_order_is_the_tie_break() {
    let first_scorer = Uuid::from_u128(1);
    let second_scorer = Uuid::from_u128(2);
    let entries = vec![
        entry(10, EventType::Goal, Some(first_scorer), None),
        entry(11, EventType::Goal, Some(second_scorer), None),
    ];
    let totals = compute_player_totals(&entries);
    assert_eq!(totals[0].player_id, first_scorer);
    assert_eq!(totals[1].player_id, second_scorer);
    assert_eq!(totals[0].goals, totals[1].goals);
}
