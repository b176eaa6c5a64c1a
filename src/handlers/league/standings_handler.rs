use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::error_response;
use crate::league::standings::StandingsService;
use crate::middleware::auth::Claims;
use crate::models::standing::LeaderboardQuery;

/// Get the tournament table in display order
#[tracing::instrument(
    name = "Get standings",
    skip(pool),
    fields(tournament_id = %tournament_id)
)]
pub async fn get_tournament_standings(
    tournament_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let standings_service = StandingsService::new(pool.get_ref().clone());

    match standings_service.get_standings(tournament_id).await {
        Ok(standings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": standings,
            "total_count": standings.len()
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Rebuild the standings cache from match history
#[tracing::instrument(
    name = "Rebuild standings",
    skip(pool, claims),
    fields(tournament_id = %tournament_id, requested_by = %claims.username)
)]
pub async fn rebuild_tournament_standings(
    tournament_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let standings_service = StandingsService::new(pool.get_ref().clone());

    match standings_service
        .recompute_for_tournament(tournament_id)
        .await
    {
        Ok(()) => {
            tracing::info!("Standings rebuilt for tournament {}", tournament_id);
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Standings rebuilt"
            })))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// Top scorers leaderboard
#[tracing::instrument(
    name = "Get top scorers",
    skip(query, pool),
    fields(tournament_id = %tournament_id, limit = ?query.limit)
)]
pub async fn get_top_scorers(
    tournament_id: Uuid,
    query: web::Query<LeaderboardQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let standings_service = StandingsService::new(pool.get_ref().clone());

    match standings_service
        .get_top_scorers(tournament_id, query.limit)
        .await
    {
        Ok(scorers) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": scorers
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Top assists leaderboard
#[tracing::instrument(
    name = "Get top assists",
    skip(query, pool),
    fields(tournament_id = %tournament_id, limit = ?query.limit)
)]
pub async fn get_top_assists(
    tournament_id: Uuid,
    query: web::Query<LeaderboardQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let standings_service = StandingsService::new(pool.get_ref().clone());

    match standings_service
        .get_top_assists(tournament_id, query.limit)
        .await
    {
        Ok(assists) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": assists
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}
