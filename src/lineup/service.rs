use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::lineup::validation::{LineupPolicy, LineupValidator};
use crate::models::lineup::{
    Formation, Lineup, LineupPlayer, LineupWithPlayers, SaveLineupRequest,
};
use crate::models::matches::Match;

/// Service owning team lineups for a match. A submission replaces the
/// previous lineup wholesale inside one transaction, so a half-old,
/// half-new lineup is never visible.
#[derive(Debug)]
pub struct LineupService {
    pool: PgPool,
    validator: LineupValidator,
}

impl LineupService {
    pub fn new(pool: PgPool, policy: LineupPolicy) -> Self {
        Self {
            pool,
            validator: LineupValidator::new(policy),
        }
    }

    pub async fn save_lineup(
        &self,
        match_id: Uuid,
        team_id: Uuid,
        request: &SaveLineupRequest,
    ) -> Result<LineupWithPlayers, ServiceError> {
        let mut tx = self.pool.begin().await?;

        // The match row lock serializes competing submissions for the
        // same match; last committed wins.
        let fixture = sqlx::query_as::<_, Match>(
            "SELECT * FROM matches WHERE id = $1 FOR UPDATE",
        )
        .bind(match_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ServiceError::not_found("match"))?;

        if team_id != fixture.home_team_id && team_id != fixture.away_team_id {
            return Err(ServiceError::validation(format!(
                "team {} is not playing in this match",
                team_id
            )));
        }

        let formation = sqlx::query_as::<_, Formation>(
            "SELECT * FROM formations WHERE id = $1",
        )
        .bind(request.formation_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ServiceError::not_found("formation"))?;

        if formation.team_id != team_id {
            return Err(ServiceError::validation(
                "formation belongs to a different team",
            ));
        }

        self.validator
            .validate_submission(&formation.structure, &request.players)?;

        let player_ids: Vec<Uuid> = request.players.iter().map(|p| p.player_id).collect();
        let squad_count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM players WHERE team_id = $1 AND id = ANY($2)",
        )
        .bind(team_id)
        .bind(&player_ids)
        .fetch_one(&mut *tx)
        .await?;
        if squad_count.0 != player_ids.len() as i64 {
            return Err(ServiceError::validation(
                "lineup contains players outside the team squad",
            ));
        }

        // Replace wholesale: drop the old rows, then insert the new set.
        sqlx::query(
            r#"
            DELETE FROM lineup_players
            WHERE lineup_id IN (
                SELECT id FROM lineups WHERE match_id = $1 AND team_id = $2
            )
            "#,
        )
        .bind(match_id)
        .bind(team_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM lineups WHERE match_id = $1 AND team_id = $2")
            .bind(match_id)
            .bind(team_id)
            .execute(&mut *tx)
            .await?;

        let lineup = sqlx::query_as::<_, Lineup>(
            r#"
            INSERT INTO lineups (
                id, match_id, team_id, formation_id, formation_structure
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(match_id)
        .bind(team_id)
        .bind(formation.id)
        .bind(&formation.structure)
        .fetch_one(&mut *tx)
        .await?;

        let mut players = Vec::with_capacity(request.players.len());
        for entry in &request.players {
            let player = sqlx::query_as::<_, LineupPlayer>(
                r#"
                INSERT INTO lineup_players (
                    id, lineup_id, player_id, position, jersey_number, is_starter
                ) VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(lineup.id)
            .bind(entry.player_id)
            .bind(&entry.position)
            .bind(entry.jersey_number)
            .bind(entry.is_starter)
            .fetch_one(&mut *tx)
            .await?;
            players.push(player);
        }

        tx.commit().await?;

        tracing::info!(
            "Saved lineup for team {} in match {} ({} players, formation {})",
            team_id,
            match_id,
            players.len(),
            lineup.formation_structure
        );

        Ok(LineupWithPlayers { lineup, players })
    }

    /// Latest saved lineup, or None when the team has not submitted one
    /// yet — a valid state, not an error.
    pub async fn get_lineup(
        &self,
        match_id: Uuid,
        team_id: Uuid,
    ) -> Result<Option<LineupWithPlayers>, ServiceError> {
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM matches WHERE id = $1")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("match"))?;

        let lineup = sqlx::query_as::<_, Lineup>(
            "SELECT * FROM lineups WHERE match_id = $1 AND team_id = $2",
        )
        .bind(match_id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(lineup) = lineup else {
            return Ok(None);
        };

        let players = sqlx::query_as::<_, LineupPlayer>(
            r#"
            SELECT * FROM lineup_players
            WHERE lineup_id = $1
            ORDER BY is_starter DESC, jersey_number ASC
            "#,
        )
        .bind(lineup.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(LineupWithPlayers { lineup, players }))
    }
}
