use actix_web::{post, web, HttpResponse};

use crate::handlers::seed_handler;
use crate::handlers::seed_week_handler;
use crate::models::seed_request::{SeedExerciseRequest, SeedSleepRequest, SeedStepsRequest};
use crate::models::SeedRequest;
use crate::seeder::SampleSeeder;
use crate::services::AuthorizationState;

#[post("/steps")]
async fn seed_steps_route(
    data: web::Json<SeedStepsRequest>,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    seed_handler::seed_steps(data, seeder, authorization).await
}

#[post("/sleep")]
async fn seed_sleep_route(
    data: web::Json<SeedSleepRequest>,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    seed_handler::seed_sleep(data, seeder, authorization).await
}

#[post("/exercise")]
async fn seed_exercise_route(
    data: web::Json<SeedExerciseRequest>,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    seed_handler::seed_exercise(data, seeder, authorization).await
}

#[post("/request")]
async fn seed_request_route(
    data: web::Json<SeedRequest>,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    seed_handler::seed_request(data, seeder, authorization).await
}

#[post("/week/steps")]
async fn seed_week_of_steps_route(
    body: web::Bytes,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    seed_week_handler::seed_week_of_steps(body, seeder, authorization).await
}

#[post("/week/sleep")]
async fn seed_week_of_sleep_route(
    body: web::Bytes,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    seed_week_handler::seed_week_of_sleep(body, seeder, authorization).await
}

#[post("/week/exercise")]
async fn seed_week_of_exercise_route(
    body: web::Bytes,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    seed_week_handler::seed_week_of_exercise(body, seeder, authorization).await
}
