use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a match. Transitions only move along the edges
/// returned by `successors`; everything else is an invalid transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    FirstHalf,
    HalfTime,
    SecondHalf,
    ExtraTime,
    Penalties,
    FullTime,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::FirstHalf => "first_half",
            MatchStatus::HalfTime => "half_time",
            MatchStatus::SecondHalf => "second_half",
            MatchStatus::ExtraTime => "extra_time",
            MatchStatus::Penalties => "penalties",
            MatchStatus::FullTime => "full_time",
            MatchStatus::Cancelled => "cancelled",
        }
    }

    /// Direct successors in the lifecycle graph. A match can be cancelled
    /// from any state that has not yet reached a completed phase.
    pub fn successors(&self) -> &'static [MatchStatus] {
        match self {
            MatchStatus::Scheduled => &[MatchStatus::FirstHalf, MatchStatus::Cancelled],
            MatchStatus::FirstHalf => &[MatchStatus::HalfTime, MatchStatus::Cancelled],
            MatchStatus::HalfTime => &[MatchStatus::SecondHalf, MatchStatus::Cancelled],
            MatchStatus::SecondHalf => &[MatchStatus::FullTime, MatchStatus::ExtraTime, MatchStatus::Cancelled],
            MatchStatus::ExtraTime => &[MatchStatus::Penalties, MatchStatus::FullTime],
            MatchStatus::Penalties => &[MatchStatus::FullTime],
            MatchStatus::FullTime => &[],
            MatchStatus::Cancelled => &[],
        }
    }

    pub fn can_advance_to(&self, target: MatchStatus) -> bool {
        self.successors().contains(&target)
    }

    /// Statuses in which regular play events may be appended.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            MatchStatus::FirstHalf | MatchStatus::SecondHalf | MatchStatus::ExtraTime
        )
    }

    /// The penalty shootout accepts only penalty_goal / penalty_miss
    /// events, which move the shootout tallies rather than the score.
    pub fn allows_shootout_events(&self) -> bool {
        matches!(self, MatchStatus::Penalties)
    }

    /// Statuses the standings aggregator counts as a finished game.
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            MatchStatus::FullTime | MatchStatus::ExtraTime | MatchStatus::Penalties
        )
    }

    pub fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for MatchStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "first_half" => MatchStatus::FirstHalf,
            "half_time" => MatchStatus::HalfTime,
            "second_half" => MatchStatus::SecondHalf,
            "extra_time" => MatchStatus::ExtraTime,
            "penalties" => MatchStatus::Penalties,
            "full_time" => MatchStatus::FullTime,
            "cancelled" => MatchStatus::Cancelled,
            _ => MatchStatus::Scheduled,
        }
    }
}
