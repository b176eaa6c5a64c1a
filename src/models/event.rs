use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Closed enumeration of everything that can be recorded against a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    PenaltyGoal,
    PenaltyMiss,
    OwnGoal,
    YellowCard,
    RedCard,
    SecondYellow,
    SubstitutionIn,
    Corner,
    FreeKick,
    Offside,
    Injury,
    VarDecision,
    EventVoided,
}

/// Which side of the scoreboard an event moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEffect {
    /// No change.
    None,
    /// +1 for the team referenced on the event.
    ForTeam,
    /// +1 for the opposing team (own goals).
    AgainstTeam,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Goal => "goal",
            EventType::PenaltyGoal => "penalty_goal",
            EventType::PenaltyMiss => "penalty_miss",
            EventType::OwnGoal => "own_goal",
            EventType::YellowCard => "yellow_card",
            EventType::RedCard => "red_card",
            EventType::SecondYellow => "second_yellow",
            EventType::SubstitutionIn => "substitution_in",
            EventType::Corner => "corner",
            EventType::FreeKick => "free_kick",
            EventType::Offside => "offside",
            EventType::Injury => "injury",
            EventType::VarDecision => "var_decision",
            EventType::EventVoided => "event_voided",
        }
    }

    pub fn requires_player(&self) -> bool {
        matches!(
            self,
            EventType::Goal
                | EventType::PenaltyGoal
                | EventType::PenaltyMiss
                | EventType::OwnGoal
                | EventType::YellowCard
                | EventType::RedCard
                | EventType::SecondYellow
                | EventType::SubstitutionIn
        )
    }

    pub fn requires_related_player(&self) -> bool {
        matches!(self, EventType::SubstitutionIn)
    }

    /// The assist slot is only meaningful on open-play goals.
    pub fn allows_related_player(&self) -> bool {
        matches!(self, EventType::Goal | EventType::SubstitutionIn)
    }

    pub fn score_effect(&self) -> ScoreEffect {
        match self {
            EventType::Goal | EventType::PenaltyGoal => ScoreEffect::ForTeam,
            EventType::OwnGoal => ScoreEffect::AgainstTeam,
            _ => ScoreEffect::None,
        }
    }

    /// Event types accepted while the match sits in the penalty shootout.
    pub fn is_shootout_kind(&self) -> bool {
        matches!(self, EventType::PenaltyGoal | EventType::PenaltyMiss)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the append-only ledger. Never updated in place; an
/// `event_voided` row referencing `id` retracts it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sequence: i64,
    pub event_type: EventType,
    pub minute: i32,
    pub team_id: Option<Uuid>,
    pub player_id: Option<Uuid>,
    pub related_player_id: Option<Uuid>,
    pub description: Option<String>,
    pub in_shootout: bool,
    pub voids_event_id: Option<Uuid>,
    pub client_key: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppendEventRequest {
    pub event_type: EventType,
    pub minute: i32,
    pub team_id: Option<Uuid>,
    pub player_id: Option<Uuid>,
    pub related_player_id: Option<Uuid>,
    pub description: Option<String>,
    /// Client-supplied idempotency key; a retried append with the same
    /// key returns the original event instead of double-recording.
    pub client_key: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListEventsQuery {
    /// "minute" for minute-ascending order; anything else (or absent)
    /// returns insertion order.
    pub order: Option<String>,
}
