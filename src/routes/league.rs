// src/routes/league.rs
use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::league::standings_handler;
use crate::handlers::matches::match_handler;
use crate::middleware::auth::Claims;
use crate::models::standing::LeaderboardQuery;

/// List a tournament's matches
#[get("/{tournament_id}/matches")]
async fn get_tournament_matches(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    match_handler::list_tournament_matches(tournament_id, pool).await
}

/// Get tournament standings
#[get("/{tournament_id}/standings")]
async fn get_tournament_standings(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    standings_handler::get_tournament_standings(tournament_id, pool).await
}

/// Rebuild the standings cache from match history
#[post("/{tournament_id}/standings/rebuild")]
async fn rebuild_tournament_standings(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    standings_handler::rebuild_tournament_standings(tournament_id, pool, claims).await
}

/// Top scorers leaderboard
#[get("/{tournament_id}/top-scorers")]
async fn get_top_scorers(
    path: web::Path<Uuid>,
    query: web::Query<LeaderboardQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    standings_handler::get_top_scorers(tournament_id, query, pool).await
}

/// Top assists leaderboard
#[get("/{tournament_id}/top-assists")]
async fn get_top_assists(
    path: web::Path<Uuid>,
    query: web::Query<LeaderboardQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    standings_handler::get_top_assists(tournament_id, query, pool).await
}
