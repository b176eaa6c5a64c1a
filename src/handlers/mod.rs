use actix_web::HttpResponse;
use serde_json::json;

use crate::errors::ServiceError;

pub mod league;
pub mod matches;

/// Map a service failure onto the HTTP surface. Validation problems are
/// unprocessable payloads; state and transition problems are conflicts
/// with the current resource state.
pub fn error_response(error: &ServiceError) -> HttpResponse {
    let body = json!({
        "success": false,
        "message": error.to_string()
    });

    match error {
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(body),
        ServiceError::InvalidTransition { .. } => HttpResponse::Conflict().json(body),
        ServiceError::InvalidState { .. } => HttpResponse::Conflict().json(body),
        ServiceError::Validation(_) => HttpResponse::UnprocessableEntity().json(body),
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::Database(e) => {
            tracing::error!("Database failure: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Internal server error"
            }))
        }
    }
}
