use actix_web::{web, HttpResponse};

use crate::handlers::seed_error_response;
use crate::models::seed_request::AuthorizationResponse;
use crate::services::AuthorizationState;

#[tracing::instrument(name = "Authorize health data access", skip(authorization))]
pub async fn request_authorization(authorization: web::Data<AuthorizationState>) -> HttpResponse {
    match authorization.authorize().await {
        Ok(granted) => {
            tracing::info!("Health data authorization result: granted={}", granted);
            HttpResponse::Ok().json(AuthorizationResponse {
                granted,
                read: authorization.read_set().into_iter().collect(),
                write: authorization.write_set().into_iter().collect(),
            })
        }
        Err(e) => {
            tracing::error!("Health data authorization failed. Reason: {}", e);
            seed_error_response(&e)
        }
    }
}
