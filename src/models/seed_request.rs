use serde::{Deserialize, Serialize};

use crate::models::category::DataCategory;
use crate::models::sample::HealthRecord;

/// Per-call input to the seeder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRequest {
    pub category: DataCategory,
    pub days_prior: f64,
    pub magnitude: f64,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
}

impl SeedRequest {
    pub fn new(category: DataCategory, days_prior: f64, magnitude: f64) -> Self {
        Self {
            category,
            days_prior,
            magnitude,
            duration_minutes: None,
        }
    }

    pub fn with_duration_minutes(mut self, minutes: f64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct SeedStepsRequest {
    pub days_prior: f64,
    pub steps: f64,
}

#[derive(Debug, Deserialize)]
pub struct SeedSleepRequest {
    pub days_prior: f64,
    pub hours_slept: f64,
}

#[derive(Debug, Deserialize)]
pub struct SeedExerciseRequest {
    pub days_prior: f64,
    pub exercise_minutes: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedWeekRequest {
    #[serde(default)]
    pub values: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub status: String,
    pub records: Vec<HealthRecord>,
}

impl SeedResponse {
    pub fn accepted(records: Vec<HealthRecord>) -> Self {
        Self {
            status: "accepted".to_string(),
            records,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorizationResponse {
    pub granted: bool,
    pub read: Vec<DataCategory>,
    pub write: Vec<DataCategory>,
}
