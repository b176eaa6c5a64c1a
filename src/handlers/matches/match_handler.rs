use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::error_response;
use crate::matches::service::MatchService;
use crate::middleware::auth::Claims;
use crate::models::matches::{AdvanceStatusRequest, ScheduleMatchRequest, SetMinuteRequest};

/// Schedule a new match
#[tracing::instrument(
    name = "Schedule match",
    skip(request, pool, claims),
    fields(
        tournament_id = %request.tournament_id,
        scheduled_by = %claims.username
    )
)]
pub async fn schedule_match(
    request: web::Json<ScheduleMatchRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_service = MatchService::new(pool.get_ref().clone());

    match match_service.schedule_match(&request).await {
        Ok(created) => {
            tracing::info!("Scheduled match {}", created.id);
            Ok(HttpResponse::Created().json(json!({
                "success": true,
                "message": "Match scheduled",
                "data": created
            })))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// Get match detail with team and venue names
#[tracing::instrument(name = "Get match", skip(pool), fields(match_id = %match_id))]
pub async fn get_match(match_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let match_service = MatchService::new(pool.get_ref().clone());

    match match_service.get_match_detail(match_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": detail
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// List a tournament's matches in schedule order
#[tracing::instrument(
    name = "List tournament matches",
    skip(pool),
    fields(tournament_id = %tournament_id)
)]
pub async fn list_tournament_matches(
    tournament_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let match_service = MatchService::new(pool.get_ref().clone());

    match match_service.list_by_tournament(tournament_id).await {
        Ok(fixtures) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": fixtures,
            "total_count": fixtures.len()
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Drive the match status state machine
#[tracing::instrument(
    name = "Advance match status",
    skip(request, pool, claims),
    fields(
        match_id = %match_id,
        target = %request.target_status,
        operator = %claims.username
    )
)]
pub async fn advance_match_status(
    match_id: Uuid,
    request: web::Json<AdvanceStatusRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_service = MatchService::new(pool.get_ref().clone());

    match match_service
        .advance_status(match_id, request.target_status)
        .await
    {
        Ok(updated) => {
            tracing::info!("Match {} now {}", match_id, updated.status);
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Match status updated",
                "data": updated
            })))
        }
        Err(e) => {
            tracing::warn!("Status change rejected for match {}: {}", match_id, e);
            Ok(error_response(&e))
        }
    }
}

/// Update the operator-managed match clock
#[tracing::instrument(
    name = "Set match minute",
    skip(request, pool, claims),
    fields(match_id = %match_id, minute = %request.minute, operator = %claims.username)
)]
pub async fn set_match_minute(
    match_id: Uuid,
    request: web::Json<SetMinuteRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_service = MatchService::new(pool.get_ref().clone());

    match match_service.set_minute(match_id, request.minute).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": updated
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}
