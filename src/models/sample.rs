use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::category::{DataCategory, Unit};
use crate::models::error::SeedError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepState {
    InBed,
}

impl SleepState {
    /// Numeric state code as stored by health stores.
    pub fn code(&self) -> i32 {
        match self {
            SleepState::InBed => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleValue {
    Quantity(Quantity),
    Sleep { state: SleepState },
}

/// A single measured or logged value over an instant or an interval.
///
/// Fields are private so `start <= end` holds for every constructed sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    id: Uuid,
    category: DataCategory,
    value: SampleValue,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Sample {
    pub fn point(category: DataCategory, quantity: Quantity, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            value: SampleValue::Quantity(quantity),
            start: at,
            end: at,
        }
    }

    pub fn interval(
        category: DataCategory,
        value: SampleValue,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, SeedError> {
        if start > end {
            return Err(SeedError::InvalidRequest(format!(
                "sample for {} ends ({}) before it starts ({})",
                category, end, start
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            category,
            value,
            start,
            end,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> DataCategory {
        self.category
    }

    pub fn value(&self) -> &SampleValue {
        &self.value
    }

    pub fn quantity(&self) -> Option<Quantity> {
        match self.value {
            SampleValue::Quantity(q) => Some(q),
            SampleValue::Sleep { .. } => None,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn is_point(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Running,
    Walking,
    Cycling,
    Swimming,
    Other,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Running => "running",
            ActivityKind::Walking => "walking",
            ActivityKind::Cycling => "cycling",
            ActivityKind::Swimming => "swimming",
            ActivityKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutRecord {
    id: Uuid,
    activity: ActivityKind,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    total_energy: Quantity,
    total_distance: Quantity,
    heart_rate: Vec<Sample>,
}

impl WorkoutRecord {
    pub fn new(
        activity: ActivityKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        total_energy: Quantity,
        total_distance: Quantity,
        heart_rate: Vec<Sample>,
    ) -> Result<Self, SeedError> {
        if start > end {
            return Err(SeedError::InvalidRequest(format!(
                "workout ends ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            activity,
            start,
            end,
            total_energy,
            total_distance,
            heart_rate,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn activity(&self) -> ActivityKind {
        self.activity
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end.signed_duration_since(self.start)
    }

    pub fn total_energy(&self) -> Quantity {
        self.total_energy
    }

    pub fn total_distance(&self) -> Quantity {
        self.total_distance
    }

    pub fn heart_rate(&self) -> &[Sample] {
        &self.heart_rate
    }
}

/// Anything that can be handed to a sink's `save`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HealthRecord {
    Sample(Sample),
    Workout(WorkoutRecord),
}

impl HealthRecord {
    pub fn id(&self) -> Uuid {
        match self {
            HealthRecord::Sample(sample) => sample.id(),
            HealthRecord::Workout(workout) => workout.id(),
        }
    }

    pub fn category(&self) -> DataCategory {
        match self {
            HealthRecord::Sample(sample) => sample.category(),
            HealthRecord::Workout(_) => DataCategory::Workout,
        }
    }

    pub fn as_workout(&self) -> Option<&WorkoutRecord> {
        match self {
            HealthRecord::Workout(workout) => Some(workout),
            HealthRecord::Sample(_) => None,
        }
    }
}

impl From<Sample> for HealthRecord {
    fn from(sample: Sample) -> Self {
        HealthRecord::Sample(sample)
    }
}

impl From<WorkoutRecord> for HealthRecord {
    fn from(workout: WorkoutRecord) -> Self {
        HealthRecord::Workout(workout)
    }
}
