use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

use crate::models::{Sample, SampleValue, WorkoutRecord};

/// Value and unit columns for a sample. Sleep states are stored by their numeric code.
fn value_columns(sample: &Sample) -> (f64, Option<&'static str>) {
    match sample.value() {
        SampleValue::Quantity(q) => (q.value, Some(q.unit.symbol())),
        SampleValue::Sleep { state } => (f64::from(state.code()), None),
    }
}

#[tracing::instrument(
    name = "Insert health sample into database",
    skip(executor, sample),
    fields(
        sample_id = %sample.id(),
        category = %sample.category(),
        workout_id = ?workout_id
    )
)]
pub async fn insert_sample<'e, E>(
    executor: E,
    sample: &Sample,
    workout_id: Option<Uuid>,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let (value, unit) = value_columns(sample);
    sqlx::query(
        r#"
        INSERT INTO health_samples (
            id, category, value, unit, sample_start, sample_end, workout_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(sample.id())
    .bind(sample.category().identifier())
    .bind(value)
    .bind(unit)
    .bind(sample.start())
    .bind(sample.end())
    .bind(workout_id)
    .execute(executor)
    .await?;

    Ok(())
}

#[tracing::instrument(
    name = "Insert workout into database",
    skip(pool, workout),
    fields(
        workout_id = %workout.id(),
        activity = %workout.activity().as_str()
    )
)]
pub async fn insert_workout(pool: &Pool<Postgres>, workout: &WorkoutRecord) -> Result<(), sqlx::Error> {
    let duration_seconds = workout.duration().num_milliseconds() as f64 / 1000.0;
    sqlx::query(
        r#"
        INSERT INTO workouts (
            id, activity, workout_start, workout_end, duration_seconds,
            total_energy_kcal, total_distance_miles
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(workout.id())
    .bind(workout.activity().as_str())
    .bind(workout.start())
    .bind(workout.end())
    .bind(duration_seconds)
    .bind(workout.total_energy().value)
    .bind(workout.total_distance().value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Inserts every child sample linked to `workout_id` inside one transaction.
#[tracing::instrument(
    name = "Attach samples to workout",
    skip(pool, children),
    fields(workout_id = %workout_id, child_count = children.len())
)]
pub async fn insert_workout_samples(
    pool: &Pool<Postgres>,
    workout_id: Uuid,
    children: &[Sample],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for child in children {
        insert_sample(&mut *tx, child, Some(workout_id)).await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn workout_exists(pool: &Pool<Postgres>, workout_id: Uuid) -> Result<bool, sqlx::Error> {
    let record = sqlx::query("SELECT id FROM workouts WHERE id = $1")
        .bind(workout_id)
        .fetch_optional(pool)
        .await?;
    Ok(record.is_some())
}

pub async fn ping(pool: &Pool<Postgres>) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
