use actix_web::{post, web, HttpResponse};

use crate::handlers::authorization_handler::request_authorization;
use crate::services::AuthorizationState;

#[post("/authorize")]
async fn authorize(authorization: web::Data<AuthorizationState>) -> HttpResponse {
    request_authorization(authorization).await
}
