use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Free-text annotation keyed to a match minute. Display only; the
/// standings aggregator never reads these.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CommentaryEntry {
    pub id: Uuid,
    pub match_id: Uuid,
    pub minute: i32,
    pub comment: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AddCommentaryRequest {
    pub minute: i32,
    pub comment: String,
}
