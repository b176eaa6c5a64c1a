use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lineup {
    pub id: Uuid,
    pub match_id: Uuid,
    pub team_id: Uuid,
    pub formation_id: Uuid,
    pub formation_structure: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LineupPlayer {
    pub id: Uuid,
    pub lineup_id: Uuid,
    pub player_id: Uuid,
    pub position: String,
    pub jersey_number: i32,
    pub is_starter: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LineupWithPlayers {
    pub lineup: Lineup,
    pub players: Vec<LineupPlayer>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Formation {
    pub id: Uuid,
    pub team_id: Uuid,
    pub formation_name: String,
    pub structure: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

// Request DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SaveLineupRequest {
    pub formation_id: Uuid,
    pub players: Vec<LineupPlayerEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LineupPlayerEntry {
    pub player_id: Uuid,
    pub position: String,
    pub jersey_number: i32,
    #[serde(default = "default_starter")]
    pub is_starter: bool,
}

fn default_starter() -> bool {
    true
}
