// tests/lineup_validation_test.rs
use pitchside_backend::errors::ServiceError;
use pitchside_backend::lineup::validation::{
    formation_slot_count, LineupPolicy, LineupValidator,
};
use pitchside_backend::models::lineup::LineupPlayerEntry;
use uuid::Uuid;

fn squad_entry(jersey: i32, starter: bool) -> LineupPlayerEntry {
    LineupPlayerEntry {
        player_id: Uuid::new_v4(),
        position: "CM".to_string(),
        jersey_number: jersey,
        is_starter: starter,
    }
}

fn starters(count: i32) -> Vec<LineupPlayerEntry> {
    (1..=count).map(|n| squad_entry(n, true)).collect()
}

#[test]
fn formation_structures_parse_to_eleven() {
    for structure in ["4-4-2", "4-3-3", "3-5-2", "4-2-3-1", "5-4-1"] {
        assert_eq!(formation_slot_count(structure).unwrap(), 11, "{structure}");
    }
}

#[test]
fn malformed_structures_are_rejected() {
    for structure in ["", "-", "4-4-two", "0-5-5", "11", "6-6-6"] {
        assert!(formation_slot_count(structure).is_err(), "{structure}");
    }
}

#[test]
fn exact_policy_rejects_short_lineups() {
    let validator = LineupValidator::new(LineupPolicy::Exact);
    assert!(validator.validate_submission("4-4-2", &starters(11)).is_ok());
    assert!(matches!(
        validator.validate_submission("4-4-2", &starters(10)),
        Err(ServiceError::Validation(_))
    ));
    assert!(validator.validate_submission("4-4-2", &starters(12)).is_err());
}

#[test]
fn allow_partial_policy_accepts_subsets() {
    let validator = LineupValidator::new(LineupPolicy::AllowPartial);
    assert!(validator.validate_submission("4-4-2", &starters(11)).is_ok());
    assert!(validator.validate_submission("4-4-2", &starters(7)).is_ok());
    // Overfilling is still rejected
    assert!(validator.validate_submission("4-4-2", &starters(12)).is_err());
}

#[test]
fn bench_players_are_allowed_on_top_of_the_eleven() {
    let validator = LineupValidator::new(LineupPolicy::Exact);
    let mut players = starters(11);
    players.push(squad_entry(12, false));
    players.push(squad_entry(13, false));
    assert!(validator.validate_submission("4-4-2", &players).is_ok());
}

#[test]
fn duplicate_player_ids_are_rejected() {
    let validator = LineupValidator::new(LineupPolicy::Exact);
    let mut players = starters(11);
    players[10].player_id = players[0].player_id;
    assert!(matches!(
        validator.validate_submission("4-4-2", &players),
        Err(ServiceError::Validation(_))
    ));
}

#[test]
fn jersey_numbers_outside_1_to_99_are_rejected() {
    for policy in [LineupPolicy::Exact, LineupPolicy::AllowPartial] {
        let validator = LineupValidator::new(policy);
        for bad in [0, -1, 100] {
            let mut players = starters(11);
            players[5].jersey_number = bad;
            assert!(
                validator.validate_submission("4-4-2", &players).is_err(),
                "jersey {bad}"
            );
        }
    }
}

#[test]
fn empty_submission_is_rejected() {
    let validator = LineupValidator::new(LineupPolicy::AllowPartial);
    assert!(validator.validate_submission("4-4-2", &[]).is_err());
}
