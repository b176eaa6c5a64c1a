use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::error_response;
use crate::matches::events::EventService;
use crate::middleware::auth::Claims;
use crate::models::event::{AppendEventRequest, ListEventsQuery};

/// Append an event to the match ledger
#[tracing::instrument(
    name = "Append match event",
    skip(request, pool, claims),
    fields(
        match_id = %match_id,
        event_type = %request.event_type,
        minute = %request.minute,
        operator = %claims.username
    )
)]
pub async fn append_match_event(
    match_id: Uuid,
    request: web::Json<AppendEventRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let Some(user_id) = claims.user_id() else {
        return Ok(HttpResponse::Unauthorized().json(json!({
            "success": false,
            "message": "Invalid user id in token"
        })));
    };

    let event_service = EventService::new(pool.get_ref().clone());

    match event_service.append_event(match_id, &request, user_id).await {
        Ok(event) => {
            tracing::info!("Event {} recorded for match {}", event.id, match_id);
            Ok(HttpResponse::Created().json(json!({
                "success": true,
                "message": "Event recorded",
                "data": event
            })))
        }
        Err(e) => {
            tracing::warn!("Event rejected for match {}: {}", match_id, e);
            Ok(error_response(&e))
        }
    }
}

/// Retract an event with a compensating record
#[tracing::instrument(
    name = "Void match event",
    skip(pool, claims),
    fields(match_id = %match_id, event_id = %event_id, operator = %claims.username)
)]
pub async fn void_match_event(
    match_id: Uuid,
    event_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let Some(user_id) = claims.user_id() else {
        return Ok(HttpResponse::Unauthorized().json(json!({
            "success": false,
            "message": "Invalid user id in token"
        })));
    };

    let event_service = EventService::new(pool.get_ref().clone());

    match event_service.void_event(match_id, event_id, user_id).await {
        Ok(void) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "message": "Event voided",
            "data": void
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Read the ledger in insertion or minute order
#[tracing::instrument(
    name = "Get match events",
    skip(query, pool),
    fields(match_id = %match_id, order = ?query.order)
)]
pub async fn get_match_events(
    match_id: Uuid,
    query: web::Query<ListEventsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let minute_order = query.order.as_deref() == Some("minute");
    let event_service = EventService::new(pool.get_ref().clone());

    match event_service.list_events(match_id, minute_order).await {
        Ok(events) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": events,
            "total_count": events.len()
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}
