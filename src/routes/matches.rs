// src/routes/matches.rs
use actix_web::{get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::matches::{
    commentary_handler, event_handler, lineup_handler, match_handler,
};
use crate::lineup::validation::LineupPolicy;
use crate::middleware::auth::Claims;
use crate::models::commentary::AddCommentaryRequest;
use crate::models::event::{AppendEventRequest, ListEventsQuery};
use crate::models::lineup::SaveLineupRequest;
use crate::models::matches::{AdvanceStatusRequest, ScheduleMatchRequest, SetMinuteRequest};

/// Schedule a new match
#[post("")]
async fn schedule_match(
    request: web::Json<ScheduleMatchRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    match_handler::schedule_match(request, pool, claims).await
}

/// Get match detail
#[get("/{match_id}")]
async fn get_match(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::get_match(match_id, pool).await
}

/// Advance the match through its lifecycle
#[put("/{match_id}/status")]
async fn advance_match_status(
    path: web::Path<Uuid>,
    request: web::Json<AdvanceStatusRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::advance_match_status(match_id, request, pool, claims).await
}

/// Update the manual match clock
#[put("/{match_id}/minute")]
async fn set_match_minute(
    path: web::Path<Uuid>,
    request: web::Json<SetMinuteRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::set_match_minute(match_id, request, pool, claims).await
}

/// Append an event to the ledger
#[post("/{match_id}/events")]
async fn append_match_event(
    path: web::Path<Uuid>,
    request: web::Json<AppendEventRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    event_handler::append_match_event(match_id, request, pool, claims).await
}

/// Read the event ledger
#[get("/{match_id}/events")]
async fn get_match_events(
    path: web::Path<Uuid>,
    query: web::Query<ListEventsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    event_handler::get_match_events(match_id, query, pool).await
}

/// Retract an event with a compensating record
#[post("/{match_id}/events/{event_id}/void")]
async fn void_match_event(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (match_id, event_id) = path.into_inner();
    event_handler::void_match_event(match_id, event_id, pool, claims).await
}

/// Replace a team's lineup
#[put("/{match_id}/lineups/{team_id}")]
async fn save_team_lineup(
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<SaveLineupRequest>,
    pool: web::Data<PgPool>,
    policy: web::Data<LineupPolicy>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (match_id, team_id) = path.into_inner();
    lineup_handler::save_team_lineup(match_id, team_id, request, pool, policy, claims).await
}

/// Get a team's lineup
#[get("/{match_id}/lineups/{team_id}")]
async fn get_team_lineup(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
    policy: web::Data<LineupPolicy>,
) -> Result<HttpResponse> {
    let (match_id, team_id) = path.into_inner();
    lineup_handler::get_team_lineup(match_id, team_id, pool, policy).await
}

/// Add free-text commentary
#[post("/{match_id}/commentary")]
async fn add_match_commentary(
    path: web::Path<Uuid>,
    request: web::Json<AddCommentaryRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    commentary_handler::add_match_commentary(match_id, request, pool, claims).await
}

/// Get the commentary feed
#[get("/{match_id}/commentary")]
async fn get_match_commentary(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    commentary_handler::get_match_commentary(match_id, pool).await
}
