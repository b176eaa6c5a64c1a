use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::league::aggregator::{
    compute_player_totals, compute_standings, LedgerEntry, MatchOutcome,
};
use crate::models::event::EventType;
use crate::models::standing::{PlayerStat, PointsSystem, Standing, StandingWithTeam};

const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

/// Service maintaining the standings cache and the leaderboards. The
/// cache is always a full recompute from the match results; it can be
/// dropped and rebuilt at any time.
#[derive(Debug)]
pub struct StandingsService {
    pool: PgPool,
}

impl StandingsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rebuild the tournament's standings rows from its completed
    /// matches. The whole run happens on one repeatable-read snapshot so
    /// two concurrent recomputes cannot interleave half-updated tables.
    pub async fn recompute_for_tournament(
        &self,
        tournament_id: Uuid,
    ) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let points = sqlx::query_as::<_, PointsRow>(
            "SELECT points_win, points_draw, points_loss FROM tournaments WHERE id = $1",
        )
        .bind(tournament_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ServiceError::not_found("tournament"))?;

        let team_ids: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT team_id FROM tournament_teams WHERE tournament_id = $1 ORDER BY team_id",
        )
        .bind(tournament_id)
        .fetch_all(&mut *tx)
        .await?;
        let team_ids: Vec<Uuid> = team_ids.into_iter().map(|(id,)| id).collect();

        let outcomes = sqlx::query_as::<_, OutcomeRow>(
            r#"
            SELECT id, home_team_id, away_team_id, home_score, away_score,
                   home_shootout_score, away_shootout_score, scheduled_at
            FROM matches
            WHERE tournament_id = $1
              AND status IN ('full_time', 'extra_time', 'penalties')
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&mut *tx)
        .await?;
        let outcomes: Vec<MatchOutcome> =
            outcomes.into_iter().map(OutcomeRow::into_outcome).collect();

        let table = compute_standings(&team_ids, &outcomes, points.into_points_system());

        for row in &table {
            sqlx::query(
                r#"
                INSERT INTO standings (
                    id, tournament_id, team_id, played, wins, draws, losses,
                    goals_for, goals_against, goal_difference, points,
                    recent_form, position, last_updated
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW())
                ON CONFLICT (tournament_id, team_id) DO UPDATE SET
                    played = EXCLUDED.played,
                    wins = EXCLUDED.wins,
                    draws = EXCLUDED.draws,
                    losses = EXCLUDED.losses,
                    goals_for = EXCLUDED.goals_for,
                    goals_against = EXCLUDED.goals_against,
                    goal_difference = EXCLUDED.goal_difference,
                    points = EXCLUDED.points,
                    recent_form = EXCLUDED.recent_form,
                    position = EXCLUDED.position,
                    last_updated = NOW()
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(tournament_id)
            .bind(row.team_id)
            .bind(row.played)
            .bind(row.wins)
            .bind(row.draws)
            .bind(row.losses)
            .bind(row.goals_for)
            .bind(row.goals_against)
            .bind(row.goal_difference)
            .bind(row.points)
            .bind(&row.recent_form)
            .bind(row.position)
            .execute(&mut *tx)
            .await?;
        }

        // Teams unregistered since the last run drop out of the cache.
        sqlx::query(
            "DELETE FROM standings WHERE tournament_id = $1 AND NOT (team_id = ANY($2))",
        )
        .bind(tournament_id)
        .bind(&team_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Recomputed standings for tournament {} over {} completed matches",
            tournament_id,
            outcomes.len()
        );

        Ok(())
    }

    /// League table in display order. Empty when nothing is registered or
    /// completed yet.
    pub async fn get_standings(
        &self,
        tournament_id: Uuid,
    ) -> Result<Vec<StandingWithTeam>, ServiceError> {
        let rows = sqlx::query_as::<_, StandingWithTeamRow>(
            r#"
            SELECT s.*, t.team_name
            FROM standings s
            JOIN teams t ON s.team_id = t.id
            WHERE s.tournament_id = $1
            ORDER BY s.position ASC
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StandingWithTeamRow::into_response).collect())
    }

    pub async fn get_top_scorers(
        &self,
        tournament_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<PlayerStat>, ServiceError> {
        let mut stats = self.load_player_stats(tournament_id).await?;
        stats.retain(|stat| stat.goals > 0);
        stats.sort_by(|a, b| b.goals.cmp(&a.goals));
        stats.truncate(effective_limit(limit));
        Ok(stats)
    }

    pub async fn get_top_assists(
        &self,
        tournament_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<PlayerStat>, ServiceError> {
        let mut stats = self.load_player_stats(tournament_id).await?;
        stats.retain(|stat| stat.assists > 0);
        stats.sort_by(|a, b| b.assists.cmp(&a.assists));
        stats.truncate(effective_limit(limit));
        Ok(stats)
    }

    /// Fold the ledger of the tournament's completed matches into named
    /// per-player totals, in ledger insertion order.
    async fn load_player_stats(
        &self,
        tournament_id: Uuid,
    ) -> Result<Vec<PlayerStat>, ServiceError> {
        let entries = sqlx::query_as::<_, LedgerRow>(
            r#"
            SELECT e.id, e.event_type, e.player_id, e.related_player_id,
                   e.in_shootout, e.voids_event_id
            FROM match_events e
            JOIN matches m ON e.match_id = m.id
            WHERE m.tournament_id = $1
              AND m.status IN ('full_time', 'extra_time', 'penalties')
            ORDER BY e.sequence ASC
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;
        let entries: Vec<LedgerEntry> =
            entries.into_iter().map(LedgerRow::into_entry).collect();

        let totals = compute_player_totals(&entries);
        if totals.is_empty() {
            return Ok(Vec::new());
        }

        let player_ids: Vec<Uuid> = totals.iter().map(|t| t.player_id).collect();
        let names: Vec<PlayerNameRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.player_name, t.team_name
            FROM players p
            JOIN teams t ON p.team_id = t.id
            WHERE p.id = ANY($1)
            "#,
        )
        .bind(&player_ids)
        .fetch_all(&self.pool)
        .await?;

        let stats = totals
            .into_iter()
            .map(|total| {
                let name = names.iter().find(|n| n.id == total.player_id);
                PlayerStat {
                    player_id: total.player_id,
                    player_name: name
                        .map(|n| n.player_name.clone())
                        .unwrap_or_default(),
                    team_name: name.map(|n| n.team_name.clone()).unwrap_or_default(),
                    goals: total.goals,
                    assists: total.assists,
                }
            })
            .collect();

        Ok(stats)
    }
}

fn effective_limit(limit: Option<i64>) -> usize {
    limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT).clamp(1, 100) as usize
}

#[derive(sqlx::FromRow)]
struct PointsRow {
    points_win: i32,
    points_draw: i32,
    points_loss: i32,
}

impl PointsRow {
    fn into_points_system(self) -> PointsSystem {
        PointsSystem {
            win: self.points_win,
            draw: self.points_draw,
            loss: self.points_loss,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OutcomeRow {
    id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
    home_score: i32,
    away_score: i32,
    home_shootout_score: i32,
    away_shootout_score: i32,
    scheduled_at: DateTime<Utc>,
}

impl OutcomeRow {
    fn into_outcome(self) -> MatchOutcome {
        MatchOutcome {
            match_id: self.id,
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            home_score: self.home_score,
            away_score: self.away_score,
            home_shootout_score: self.home_shootout_score,
            away_shootout_score: self.away_shootout_score,
            scheduled_at: self.scheduled_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LedgerRow {
    id: Uuid,
    event_type: EventType,
    player_id: Option<Uuid>,
    related_player_id: Option<Uuid>,
    in_shootout: bool,
    voids_event_id: Option<Uuid>,
}

impl LedgerRow {
    fn into_entry(self) -> LedgerEntry {
        LedgerEntry {
            event_id: self.id,
            event_type: self.event_type,
            player_id: self.player_id,
            related_player_id: self.related_player_id,
            in_shootout: self.in_shootout,
            voids_event_id: self.voids_event_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PlayerNameRow {
    id: Uuid,
    player_name: String,
    team_name: String,
}

#[derive(sqlx::FromRow)]
struct StandingWithTeamRow {
    #[sqlx(flatten)]
    standing: Standing,
    team_name: String,
}

impl StandingWithTeamRow {
    fn into_response(self) -> StandingWithTeam {
        StandingWithTeam {
            standing: self.standing,
            team_name: self.team_name,
        }
    }
}
