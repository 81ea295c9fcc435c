//! Default week of demo data, index `i` being `i` days before now.

use crate::models::SeedError;
use crate::seeder::{await_all, SampleSeeder};

pub const WEEK_OF_STEPS: [f64; 7] = [5540.0, 8000.0, 9000.0, 6000.0, 7000.0, 11000.0, 9700.0];

pub const WEEK_OF_EXERCISE_MINUTES: [f64; 7] = [10.0, 20.0, 22.0, 0.0, 17.0, 32.0, 8.0];

pub const WEEK_OF_SLEEP_HOURS: [f64; 7] = [7.0, 8.0, 6.0, 9.4, 7.8, 5.4, 8.7];

/// Seeds all three fixture weeks and waits for every write.
///
/// Returns how many writes succeeded; individual failures are logged, not retried.
#[tracing::instrument(name = "Seed fixture week", skip(seeder))]
pub async fn seed_fixture_week(seeder: &SampleSeeder) -> Result<usize, SeedError> {
    let steps = seeder.seed_week_of_steps(&WEEK_OF_STEPS)?;
    let sleep = seeder.seed_week_of_sleep(&WEEK_OF_SLEEP_HOURS)?;
    let exercise = seeder.seed_week_of_exercise(&WEEK_OF_EXERCISE_MINUTES)?;
    let submitted = steps.len() + sleep.len() + exercise.len();

    let mut outcomes = await_all(steps).await;
    outcomes.extend(await_all(sleep).await);
    outcomes.extend(await_all(exercise).await);

    let succeeded = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    for e in outcomes.iter().filter_map(|outcome| outcome.as_ref().err()) {
        tracing::error!("Fixture write failed: {}", e);
    }
    tracing::info!("Seeded fixture week: {}/{} writes succeeded", succeeded, submitted);
    Ok(succeeded)
}
