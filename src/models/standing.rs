use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Derived cache row, one per team per tournament. The standings table is
/// never the source of truth; it is rebuilt from matches + events.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Standing {
    pub id: Uuid,
    pub tournament_id: Uuid,
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
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StandingWithTeam {
    #[serde(flatten)]
    pub standing: Standing,
    pub team_name: String,
}

/// Points awarded per result, configured on the tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsSystem {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl Default for PointsSystem {
    fn default() -> Self {
        Self { win: 3, draw: 1, loss: 0 }
    }
}

/// Leaderboard entry derived by folding the event ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStat {
    pub player_id: Uuid,
    pub player_name: String,
    pub team_name: String,
    pub goals: i64,
    pub assists: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}
