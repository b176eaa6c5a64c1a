use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::commentary::{AddCommentaryRequest, CommentaryEntry};

/// Free-text commentary attached to a match minute. Display only; no
/// bearing on scores or standings.
#[derive(Debug)]
pub struct CommentaryService {
    pool: PgPool,
}

impl CommentaryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add_commentary(
        &self,
        match_id: Uuid,
        request: &AddCommentaryRequest,
        created_by: Uuid,
    ) -> Result<CommentaryEntry, ServiceError> {
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM matches WHERE id = $1")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("match"))?;

        let entry = sqlx::query_as::<_, CommentaryEntry>(
            r#"
            INSERT INTO match_commentary (id, match_id, minute, comment, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(match_id)
        .bind(request.minute)
        .bind(&request.comment)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn get_feed(&self, match_id: Uuid) -> Result<Vec<CommentaryEntry>, ServiceError> {
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM matches WHERE id = $1")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("match"))?;

        let feed = sqlx::query_as::<_, CommentaryEntry>(
            r#"
            SELECT * FROM match_commentary
            WHERE match_id = $1
            ORDER BY minute ASC, created_at ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(feed)
    }
}
