use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::health_samples::{insert_sample, insert_workout, insert_workout_samples, ping, workout_exists};
use crate::models::{HealthRecord, Sample, SinkError, WorkoutRecord};
use crate::sink::HealthDataSink;

#[derive(Clone, Debug)]
pub struct PostgresSink {
    pool: PgPool,
}

impl PostgresSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthDataSink for PostgresSink {
    async fn is_available(&self) -> bool {
        match ping(&self.pool).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Postgres health store unreachable: {}", e);
                false
            }
        }
    }

    async fn save(&self, record: &HealthRecord) -> Result<(), SinkError> {
        match record {
            HealthRecord::Sample(sample) => insert_sample(&self.pool, sample, None).await?,
            HealthRecord::Workout(workout) => insert_workout(&self.pool, workout).await?,
        }
        Ok(())
    }

    async fn attach(&self, children: &[Sample], parent: &WorkoutRecord) -> Result<(), SinkError> {
        if !workout_exists(&self.pool, parent.id()).await? {
            return Err(SinkError::UnknownParent(parent.id()));
        }
        insert_workout_samples(&self.pool, parent.id(), children).await?;
        Ok(())
    }
}
