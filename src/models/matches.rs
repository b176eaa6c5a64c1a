use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matches::status::MatchStatus;

/// A tournament fixture. `home_score`/`away_score` carry regulation and
/// extra-time goals; the shootout tallies are kept apart so penalty
/// shootout goals never leak into goals-for/against.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub venue_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub status: MatchStatus,
    pub home_score: i32,
    pub away_score: i32,
    pub home_shootout_score: i32,
    pub away_shootout_score: i32,
    pub minute: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchWithTeams {
    #[serde(flatten)]
    pub match_info: Match,
    pub home_team_name: String,
    pub away_team_name: String,
    pub venue_name: String,
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduleMatchRequest {
    pub tournament_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub venue_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdvanceStatusRequest {
    pub target_status: MatchStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetMinuteRequest {
    pub minute: i32,
}
