use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::matches::status::MatchStatus;
use crate::matches::validation::EventValidator;
use crate::models::event::{AppendEventRequest, EventType, MatchEvent, ScoreEffect};
use crate::models::matches::Match;

/// Service owning the append-only event ledger. Every append is one
/// transaction covering the ledger insert and the score movement, so
/// concurrent operators can never leave the running score out of step
/// with the recorded events.
#[derive(Debug)]
pub struct EventService {
    pool: PgPool,
    validator: EventValidator,
}

impl EventService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            validator: EventValidator::new(),
        }
    }

    pub async fn append_event(
        &self,
        match_id: Uuid,
        request: &AppendEventRequest,
        created_by: Uuid,
    ) -> Result<MatchEvent, ServiceError> {
        self.validator.validate_append(request)?;

        let mut tx = self.pool.begin().await?;

        // Locking the match row serializes appends and status transitions
        // for this match.
        let current = sqlx::query_as::<_, Match>(
            "SELECT * FROM matches WHERE id = $1 FOR UPDATE",
        )
        .bind(match_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ServiceError::not_found("match"))?;

        let in_shootout = current.status.allows_shootout_events();
        if in_shootout {
            if !request.event_type.is_shootout_kind() {
                return Err(ServiceError::InvalidState {
                    match_id,
                    status: current.status.to_string(),
                });
            }
        } else if !current.status.is_live() {
            return Err(ServiceError::InvalidState {
                match_id,
                status: current.status.to_string(),
            });
        }

        if let Some(team_id) = request.team_id {
            self.validator.validate_team_side(
                team_id,
                current.home_team_id,
                current.away_team_id,
            )?;
            if let Some(player_id) = request.player_id {
                self.ensure_in_squad(&mut tx, player_id, team_id).await?;
            }
            if let Some(related_id) = request.related_player_id {
                self.ensure_in_squad(&mut tx, related_id, team_id).await?;
            }
        }

        // A retried append with the same client key returns the original
        // record and moves nothing.
        if let Some(client_key) = request.client_key {
            let existing = sqlx::query_as::<_, MatchEvent>(
                "SELECT * FROM match_events WHERE match_id = $1 AND client_key = $2",
            )
            .bind(match_id)
            .bind(client_key)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some(existing) = existing {
                tracing::info!(
                    "Duplicate append for match {} with client key {}, returning event {}",
                    match_id,
                    client_key,
                    existing.id
                );
                return Ok(existing);
            }
        }

        let event = sqlx::query_as::<_, MatchEvent>(
            r#"
            INSERT INTO match_events (
                id, match_id, event_type, minute, team_id, player_id,
                related_player_id, description, in_shootout, client_key,
                created_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(match_id)
        .bind(request.event_type)
        .bind(request.minute)
        .bind(request.team_id)
        .bind(request.player_id)
        .bind(request.related_player_id)
        .bind(request.description.as_deref())
        .bind(in_shootout)
        .bind(request.client_key)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        self.apply_score_effect(&mut tx, &current, &event, 1).await?;

        tx.commit().await?;

        tracing::info!(
            "Recorded {} at minute {} for match {}",
            event.event_type,
            event.minute,
            match_id
        );

        Ok(event)
    }

    /// Append a compensating record retracting an earlier event. The
    /// ledger stays append-only; the original row is untouched and the
    /// correction reverses its score effect.
    pub async fn void_event(
        &self,
        match_id: Uuid,
        event_id: Uuid,
        created_by: Uuid,
    ) -> Result<MatchEvent, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Match>(
            "SELECT * FROM matches WHERE id = $1 FOR UPDATE",
        )
        .bind(match_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ServiceError::not_found("match"))?;

        // Corrections are open from kickoff until the match closes.
        let voidable = current.status.is_live()
            || current.status == MatchStatus::HalfTime
            || current.status.allows_shootout_events();
        if !voidable {
            return Err(ServiceError::InvalidState {
                match_id,
                status: current.status.to_string(),
            });
        }

        let target = sqlx::query_as::<_, MatchEvent>(
            "SELECT * FROM match_events WHERE id = $1 AND match_id = $2",
        )
        .bind(event_id)
        .bind(match_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ServiceError::not_found("event"))?;

        if target.event_type == EventType::EventVoided {
            return Err(ServiceError::validation("cannot void a correction record"));
        }

        let already_voided = sqlx::query_as::<_, (Uuid,)>(
            "SELECT id FROM match_events WHERE voids_event_id = $1",
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;
        if already_voided.is_some() {
            return Err(ServiceError::Conflict(format!(
                "event {} is already voided",
                event_id
            )));
        }

        let void = sqlx::query_as::<_, MatchEvent>(
            r#"
            INSERT INTO match_events (
                id, match_id, event_type, minute, team_id, in_shootout,
                voids_event_id, created_by
            ) VALUES ($1, $2, 'event_voided', $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(match_id)
        .bind(target.minute)
        .bind(target.team_id)
        .bind(target.in_shootout)
        .bind(target.id)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        self.apply_score_effect(&mut tx, &current, &target, -1).await?;

        tx.commit().await?;

        tracing::info!(
            "Voided event {} ({}) on match {}",
            target.id,
            target.event_type,
            match_id
        );

        Ok(void)
    }

    /// Ledger in insertion order, or minute-ascending with insertion
    /// order as the tie-break (manual minutes are not unique).
    pub async fn list_events(
        &self,
        match_id: Uuid,
        minute_order: bool,
    ) -> Result<Vec<MatchEvent>, ServiceError> {
        // Distinguish an unknown match from a match without events.
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM matches WHERE id = $1")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("match"))?;

        let sql = if minute_order {
            "SELECT * FROM match_events WHERE match_id = $1 ORDER BY minute ASC, sequence ASC"
        } else {
            "SELECT * FROM match_events WHERE match_id = $1 ORDER BY sequence ASC"
        };

        let events = sqlx::query_as::<_, MatchEvent>(sql)
            .bind(match_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    /// Move the scoreboard for a scoring event, or reverse it for a void
    /// (`delta` -1). Relative SQL increments keep concurrent appends from
    /// losing updates; the event's team reference picks the side, with
    /// own goals credited to the opposition.
    async fn apply_score_effect(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        current: &Match,
        event: &MatchEvent,
        delta: i32,
    ) -> Result<(), ServiceError> {
        if event.in_shootout {
            if event.event_type != EventType::PenaltyGoal {
                return Ok(());
            }
            let team_id = event
                .team_id
                .ok_or_else(|| ServiceError::validation("shootout kick without a team"))?;
            sqlx::query(
                r#"
                UPDATE matches SET
                    home_shootout_score = home_shootout_score
                        + CASE WHEN $2 = home_team_id THEN $3 ELSE 0 END,
                    away_shootout_score = away_shootout_score
                        + CASE WHEN $2 = away_team_id THEN $3 ELSE 0 END,
                    updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(current.id)
            .bind(team_id)
            .bind(delta)
            .execute(&mut **tx)
            .await?;
            return Ok(());
        }

        let credited_team = match event.event_type.score_effect() {
            ScoreEffect::None => return Ok(()),
            ScoreEffect::ForTeam => event
                .team_id
                .ok_or_else(|| ServiceError::validation("scoring event without a team"))?,
            ScoreEffect::AgainstTeam => {
                let team_id = event
                    .team_id
                    .ok_or_else(|| ServiceError::validation("own goal without a team"))?;
                if team_id == current.home_team_id {
                    current.away_team_id
                } else {
                    current.home_team_id
                }
            }
        };

        sqlx::query(
            r#"
            UPDATE matches SET
                home_score = home_score + CASE WHEN $2 = home_team_id THEN $3 ELSE 0 END,
                away_score = away_score + CASE WHEN $2 = away_team_id THEN $3 ELSE 0 END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(current.id)
        .bind(credited_team)
        .bind(delta)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn ensure_in_squad(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        player_id: Uuid,
        team_id: Uuid,
    ) -> Result<(), ServiceError> {
        let found = sqlx::query_as::<_, (Uuid,)>(
            "SELECT id FROM players WHERE id = $1 AND team_id = $2",
        )
        .bind(player_id)
        .bind(team_id)
        .fetch_optional(&mut **tx)
        .await?;

        if found.is_none() {
            return Err(ServiceError::validation(format!(
                "player {} is not in the squad of team {}",
                player_id, team_id
            )));
        }
        Ok(())
    }
}
