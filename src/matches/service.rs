use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::league::standings::StandingsService;
use crate::matches::status::MatchStatus;
use crate::matches::validation::EventValidator;
use crate::models::matches::{Match, MatchWithTeams, ScheduleMatchRequest};

/// Service responsible for the match lifecycle: scheduling, the status
/// state machine and the manual clock.
#[derive(Debug)]
pub struct MatchService {
    pool: PgPool,
}

impl MatchService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a fixture in `scheduled` status. Tournament, teams and
    /// venue come from the admin surface and are only checked to exist.
    pub async fn schedule_match(
        &self,
        request: &ScheduleMatchRequest,
    ) -> Result<Match, ServiceError> {
        if request.home_team_id == request.away_team_id {
            return Err(ServiceError::validation(
                "home and away team must differ",
            ));
        }

        self.ensure_tournament_exists(request.tournament_id).await?;
        self.ensure_team_exists(request.home_team_id).await?;
        self.ensure_team_exists(request.away_team_id).await?;
        self.ensure_venue_exists(request.venue_id).await?;

        let created = sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (
                id, tournament_id, home_team_id, away_team_id, venue_id,
                scheduled_at, status
            ) VALUES ($1, $2, $3, $4, $5, $6, 'scheduled')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.tournament_id)
        .bind(request.home_team_id)
        .bind(request.away_team_id)
        .bind(request.venue_id)
        .bind(request.scheduled_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            "Scheduled match {} ({} vs {}) in tournament {}",
            created.id,
            created.home_team_id,
            created.away_team_id,
            created.tournament_id
        );

        Ok(created)
    }

    pub async fn get_match(&self, match_id: Uuid) -> Result<Match, ServiceError> {
        sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("match"))
    }

    /// Match with team and venue names resolved for display.
    pub async fn get_match_detail(&self, match_id: Uuid) -> Result<MatchWithTeams, ServiceError> {
        sqlx::query_as::<_, MatchWithTeamsRow>(
            r#"
            SELECT
                m.*,
                ht.team_name AS home_team_name,
                at.team_name AS away_team_name,
                v.venue_name
            FROM matches m
            JOIN teams ht ON m.home_team_id = ht.id
            JOIN teams at ON m.away_team_id = at.id
            JOIN venues v ON m.venue_id = v.id
            WHERE m.id = $1
            "#,
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await?
        .map(MatchWithTeamsRow::into_response)
        .ok_or_else(|| ServiceError::not_found("match"))
    }

    pub async fn list_by_tournament(
        &self,
        tournament_id: Uuid,
    ) -> Result<Vec<MatchWithTeams>, ServiceError> {
        self.ensure_tournament_exists(tournament_id).await?;

        let rows = sqlx::query_as::<_, MatchWithTeamsRow>(
            r#"
            SELECT
                m.*,
                ht.team_name AS home_team_name,
                at.team_name AS away_team_name,
                v.venue_name
            FROM matches m
            JOIN teams ht ON m.home_team_id = ht.id
            JOIN teams at ON m.away_team_id = at.id
            JOIN venues v ON m.venue_id = v.id
            WHERE m.tournament_id = $1
            ORDER BY m.scheduled_at ASC
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MatchWithTeamsRow::into_response).collect())
    }

    /// Advance the match to a direct successor status. Entering a
    /// completed status triggers a full standings recompute for the
    /// tournament; the recompute is idempotent so a retried transition
    /// cannot double-count.
    pub async fn advance_status(
        &self,
        match_id: Uuid,
        target: MatchStatus,
    ) -> Result<Match, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Match>(
            "SELECT * FROM matches WHERE id = $1 FOR UPDATE",
        )
        .bind(match_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ServiceError::not_found("match"))?;

        if !current.status.can_advance_to(target) {
            return Err(ServiceError::InvalidTransition {
                from: current.status.to_string(),
                to: target.to_string(),
            });
        }

        let updated = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(match_id)
        .bind(target)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Match {} advanced {} -> {}",
            match_id,
            current.status,
            target
        );

        if target.is_completed() {
            StandingsService::new(self.pool.clone())
                .recompute_for_tournament(updated.tournament_id)
                .await?;
        }

        Ok(updated)
    }

    /// Set the operator-managed match clock. The minute is manual and not
    /// required to be monotonic.
    pub async fn set_minute(&self, match_id: Uuid, minute: i32) -> Result<Match, ServiceError> {
        EventValidator::new().validate_minute(minute)?;

        let updated = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET minute = $2, updated_at = NOW()
            WHERE id = $1
              AND status IN ('first_half', 'second_half', 'extra_time')
            RETURNING *
            "#,
        )
        .bind(match_id)
        .bind(minute)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(updated) => Ok(updated),
            None => {
                let current = self.get_match(match_id).await?;
                Err(ServiceError::InvalidState {
                    match_id,
                    status: current.status.to_string(),
                })
            }
        }
    }

    async fn ensure_tournament_exists(&self, tournament_id: Uuid) -> Result<(), ServiceError> {
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("tournament"))
    }

    async fn ensure_team_exists(&self, team_id: Uuid) -> Result<(), ServiceError> {
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM teams WHERE id = $1")
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("team"))
    }

    async fn ensure_venue_exists(&self, venue_id: Uuid) -> Result<(), ServiceError> {
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM venues WHERE id = $1")
            .bind(venue_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("venue"))
    }
}

#[derive(sqlx::FromRow)]
struct MatchWithTeamsRow {
    #[sqlx(flatten)]
    match_info: Match,
    home_team_name: String,
    away_team_name: String,
    venue_name: String,
}

impl MatchWithTeamsRow {
    fn into_response(self) -> MatchWithTeams {
        MatchWithTeams {
            match_info: self.match_info,
            home_team_name: self.home_team_name,
            away_team_name: self.away_team_name,
            venue_name: self.venue_name,
        }
    }
}
