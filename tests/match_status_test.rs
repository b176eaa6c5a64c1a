// tests/match_status_test.rs
use pitchside_backend::matches::status::MatchStatus;

const ALL: [MatchStatus; 8] = [
    MatchStatus::Scheduled,
    MatchStatus::FirstHalf,
    MatchStatus::HalfTime,
    MatchStatus::SecondHalf,
    MatchStatus::ExtraTime,
    MatchStatus::Penalties,
    MatchStatus::FullTime,
    MatchStatus::Cancelled,
];

/// The full transition matrix: a transition succeeds exactly when the
/// target is a direct successor in the lifecycle graph.
#[test]
fn transition_matrix_is_exact() {
    use MatchStatus::*;

    let allowed: &[(MatchStatus, MatchStatus)] = &[
        (Scheduled, FirstHalf),
        (Scheduled, Cancelled),
        (FirstHalf, HalfTime),
        (FirstHalf, Cancelled),
        (HalfTime, SecondHalf),
        (HalfTime, Cancelled),
        (SecondHalf, FullTime),
        (SecondHalf, ExtraTime),
        (SecondHalf, Cancelled),
        (ExtraTime, Penalties),
        (ExtraTime, FullTime),
        (Penalties, FullTime),
    ];

    for from in ALL {
        for to in ALL {
            let expected = allowed.contains(&(from, to));
            assert_eq!(
                from.can_advance_to(to),
                expected,
                "{from} -> {to} should be {expected}"
            );
        }
    }
}

#[test]
fn cancelled_is_a_dead_end() {
    for target in ALL {
        assert!(!MatchStatus::Cancelled.can_advance_to(target));
    }
}

#[test]
fn completed_statuses_match_the_aggregation_set() {
    let completed: Vec<MatchStatus> = ALL.into_iter().filter(|s| s.is_completed()).collect();
    assert_eq!(
        completed,
        vec![
            MatchStatus::ExtraTime,
            MatchStatus::Penalties,
            MatchStatus::FullTime
        ]
    );
}

#[test]
fn event_gating_statuses() {
    // Regular events only in live play
    assert!(MatchStatus::FirstHalf.is_live());
    assert!(MatchStatus::SecondHalf.is_live());
    assert!(MatchStatus::ExtraTime.is_live());
    for status in [
        MatchStatus::Scheduled,
        MatchStatus::HalfTime,
        MatchStatus::Penalties,
        MatchStatus::FullTime,
        MatchStatus::Cancelled,
    ] {
        assert!(!status.is_live(), "{status} must reject regular events");
    }

    // The shootout accepts only its own event kinds
    assert!(MatchStatus::Penalties.allows_shootout_events());
    assert!(!MatchStatus::FullTime.allows_shootout_events());
}

#[test]
fn status_strings_are_stable() {
    let names: Vec<&str> = ALL.iter().map(|s| s.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "scheduled",
            "first_half",
            "half_time",
            "second_half",
            "extra_time",
            "penalties",
            "full_time",
            "cancelled"
        ]
    );
}
