use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::error_response;
use crate::lineup::service::LineupService;
use crate::lineup::validation::LineupPolicy;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::lineup::{LineupWithPlayers, SaveLineupRequest};

/// Replace a team's lineup for a match
#[tracing::instrument(
    name = "Save lineup",
    skip(request, pool, policy, claims),
    fields(
        match_id = %match_id,
        team_id = %team_id,
        manager = %claims.username
    )
)]
pub async fn save_team_lineup(
    match_id: Uuid,
    team_id: Uuid,
    request: web::Json<SaveLineupRequest>,
    pool: web::Data<PgPool>,
    policy: web::Data<LineupPolicy>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let lineup_service = LineupService::new(pool.get_ref().clone(), *policy.get_ref());

    match lineup_service.save_lineup(match_id, team_id, &request).await {
        Ok(saved) => {
            tracing::info!(
                "Lineup saved for team {} in match {}",
                team_id,
                match_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success("Lineup saved", saved)))
        }
        Err(e) => {
            tracing::warn!("Lineup rejected for team {}: {}", team_id, e);
            Ok(error_response(&e))
        }
    }
}

/// Get a team's lineup; an unsubmitted lineup is an empty result
#[tracing::instrument(
    name = "Get lineup",
    skip(pool, policy),
    fields(match_id = %match_id, team_id = %team_id)
)]
pub async fn get_team_lineup(
    match_id: Uuid,
    team_id: Uuid,
    pool: web::Data<PgPool>,
    policy: web::Data<LineupPolicy>,
) -> Result<HttpResponse> {
    let lineup_service = LineupService::new(pool.get_ref().clone(), *policy.get_ref());

    match lineup_service.get_lineup(match_id, team_id).await {
        Ok(Some(lineup)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success("Lineup retrieved", lineup))),
        Ok(None) => Ok(HttpResponse::Ok().json(
            ApiResponse::<LineupWithPlayers>::success_message("Lineup not submitted yet"),
        )),
        Err(e) => Ok(error_response(&e)),
    }
}
