use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::error_response;
use crate::matches::commentary::CommentaryService;
use crate::middleware::auth::Claims;
use crate::models::commentary::AddCommentaryRequest;

/// Add a commentary entry to a match
#[tracing::instrument(
    name = "Add commentary",
    skip(request, pool, claims),
    fields(match_id = %match_id, minute = %request.minute, author = %claims.username)
)]
pub async fn add_match_commentary(
    match_id: Uuid,
    request: web::Json<AddCommentaryRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let Some(user_id) = claims.user_id() else {
        return Ok(HttpResponse::Unauthorized().json(json!({
            "success": false,
            "message": "Invalid user id in token"
        })));
    };

    let commentary_service = CommentaryService::new(pool.get_ref().clone());

    match commentary_service
        .add_commentary(match_id, &request, user_id)
        .await
    {
        Ok(entry) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": entry
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Get a match's commentary feed in minute order
#[tracing::instrument(name = "Get commentary", skip(pool), fields(match_id = %match_id))]
pub async fn get_match_commentary(
    match_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let commentary_service = CommentaryService::new(pool.get_ref().clone());

    match commentary_service.get_feed(match_id).await {
        Ok(feed) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": feed,
            "total_count": feed.len()
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}
