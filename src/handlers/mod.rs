pub mod authorization_handler;
pub mod backend_health_handler;
pub mod seed_handler;
pub mod seed_week_handler;

use actix_web::HttpResponse;
use serde_json::json;

use crate::models::SeedError;

/// Maps a seeding error onto the response the API returns for it.
pub fn seed_error_response(e: &SeedError) -> HttpResponse {
    let body = json!({
        "status": "error",
        "message": e.to_string()
    });
    match e {
        SeedError::InvalidRequest(_) => HttpResponse::BadRequest().json(body),
        SeedError::CategoryUnavailable(_) => HttpResponse::UnprocessableEntity().json(body),
        SeedError::AuthorizationUnavailable => HttpResponse::ServiceUnavailable().json(body),
        SeedError::SinkWriteFailed(_) => HttpResponse::BadGateway().json(body),
    }
}

pub fn not_authorized_response() -> HttpResponse {
    HttpResponse::Forbidden().json(json!({
        "status": "error",
        "message": "Health data access has not been authorized"
    }))
}
