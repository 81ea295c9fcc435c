use actix_web::{web, HttpResponse};

use crate::handlers::{not_authorized_response, seed_error_response};
use crate::models::seed_request::{SeedExerciseRequest, SeedResponse, SeedSleepRequest, SeedStepsRequest};
use crate::models::{HealthRecord, SeedError, SeedRequest};
use crate::seeder::{SampleSeeder, Seeded};
use crate::services::AuthorizationState;

/// Responds 202 with the built record; the write keeps running after the response.
fn accepted<T: Into<HealthRecord>>(result: Result<Seeded<T>, SeedError>) -> HttpResponse {
    match result {
        Ok(seeded) => {
            let (record, _completion) = seeded.into_parts();
            HttpResponse::Accepted().json(SeedResponse::accepted(vec![record.into()]))
        }
        Err(e) => {
            tracing::error!("Failed to seed record: {}", e);
            seed_error_response(&e)
        }
    }
}

#[tracing::instrument(
    name = "Seed steps",
    skip(data, seeder, authorization),
    fields(days_prior = %data.days_prior, steps = %data.steps)
)]
pub async fn seed_steps(
    data: web::Json<SeedStepsRequest>,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    if !authorization.is_granted() {
        return not_authorized_response();
    }
    accepted(seeder.seed_steps(data.days_prior, data.steps))
}

#[tracing::instrument(
    name = "Seed sleep",
    skip(data, seeder, authorization),
    fields(days_prior = %data.days_prior, hours_slept = %data.hours_slept)
)]
pub async fn seed_sleep(
    data: web::Json<SeedSleepRequest>,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    if !authorization.is_granted() {
        return not_authorized_response();
    }
    accepted(seeder.seed_sleep(data.days_prior, data.hours_slept))
}

#[tracing::instrument(
    name = "Seed exercise",
    skip(data, seeder, authorization),
    fields(days_prior = %data.days_prior, exercise_minutes = %data.exercise_minutes)
)]
pub async fn seed_exercise(
    data: web::Json<SeedExerciseRequest>,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    if !authorization.is_granted() {
        return not_authorized_response();
    }
    accepted(seeder.seed_exercise_time(data.days_prior, data.exercise_minutes))
}

#[tracing::instrument(
    name = "Seed request",
    skip(data, seeder, authorization),
    fields(category = %data.category)
)]
pub async fn seed_request(
    data: web::Json<SeedRequest>,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    if !authorization.is_granted() {
        return not_authorized_response();
    }
    accepted(seeder.seed(&data))
}
