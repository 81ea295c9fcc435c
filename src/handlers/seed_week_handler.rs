use actix_web::{web, HttpResponse};

use crate::handlers::{not_authorized_response, seed_error_response};
use crate::models::seed_request::{SeedResponse, SeedWeekRequest};
use crate::models::{HealthRecord, SeedError};
use crate::seeder::fixtures::{WEEK_OF_EXERCISE_MINUTES, WEEK_OF_SLEEP_HOURS, WEEK_OF_STEPS};
use crate::seeder::{SampleSeeder, Seeded};
use crate::services::AuthorizationState;

fn accepted_batch<T: Into<HealthRecord>>(result: Result<Vec<Seeded<T>>, SeedError>) -> HttpResponse {
    match result {
        Ok(batch) => {
            let records: Vec<HealthRecord> = batch
                .into_iter()
                .map(|seeded| seeded.into_parts().0.into())
                .collect();
            tracing::info!("Accepted {} seeded records", records.len());
            HttpResponse::Accepted().json(SeedResponse::accepted(records))
        }
        Err(e) => {
            tracing::error!("Failed to seed week: {}", e);
            seed_error_response(&e)
        }
    }
}

/// An empty body means "use the fixture week"; anything else must parse.
fn parse_week_request(body: &[u8]) -> Result<SeedWeekRequest, SeedError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SeedWeekRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| SeedError::InvalidRequest(format!("Invalid week request body: {}", e)))
}

fn values_or<'a>(data: &'a SeedWeekRequest, fixture: &'a [f64]) -> &'a [f64] {
    data.values.as_deref().unwrap_or(fixture)
}

#[tracing::instrument(name = "Seed a week of steps", skip(body, seeder, authorization))]
pub async fn seed_week_of_steps(
    body: web::Bytes,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    if !authorization.is_granted() {
        return not_authorized_response();
    }
    let data = match parse_week_request(&body) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Rejected week request: {}", e);
            return seed_error_response(&e);
        }
    };
    accepted_batch(seeder.seed_week_of_steps(values_or(&data, &WEEK_OF_STEPS)))
}

#[tracing::instrument(name = "Seed a week of sleep", skip(body, seeder, authorization))]
pub async fn seed_week_of_sleep(
    body: web::Bytes,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    if !authorization.is_granted() {
        return not_authorized_response();
    }
    let data = match parse_week_request(&body) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Rejected week request: {}", e);
            return seed_error_response(&e);
        }
    };
    accepted_batch(seeder.seed_week_of_sleep(values_or(&data, &WEEK_OF_SLEEP_HOURS)))
}

#[tracing::instrument(name = "Seed a week of exercise", skip(body, seeder, authorization))]
pub async fn seed_week_of_exercise(
    body: web::Bytes,
    seeder: web::Data<SampleSeeder>,
    authorization: web::Data<AuthorizationState>,
) -> HttpResponse {
    if !authorization.is_granted() {
        return not_authorized_response();
    }
    let data = match parse_week_request(&body) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Rejected week request: {}", e);
            return seed_error_response(&e);
        }
    };
    accepted_batch(seeder.seed_week_of_exercise(values_or(&data, &WEEK_OF_EXERCISE_MINUTES)))
}
