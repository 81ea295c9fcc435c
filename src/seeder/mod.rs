//! Turns seed requests into health records and submits them to a [`HealthDataSink`].
//!
//! Every operation reads a fresh reference instant from the injected [`Clock`], builds
//! new immutable records, and spawns exactly one write task. The caller gets the records
//! back immediately together with a completion handle; dropping the handle leaves the
//! write running unobserved. Writes are never retried.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::task::JoinHandle;

use crate::models::{
    ActivityKind, CategoryTable, DataCategory, HealthRecord, Quantity, Sample, SampleValue,
    SeedError, SeedRequest, SleepState, Unit, WorkoutRecord,
};
use crate::sink::HealthDataSink;

pub mod clock;
pub mod fixtures;
pub mod heart_rate;

use clock::{days_before, seconds, CalendarZone, Clock, SystemClock, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use heart_rate::HeartRateBatchPolicy;

/// Aggregate values stamped onto every seeded workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutTemplate {
    pub activity: ActivityKind,
    pub total_energy_kcal: f64,
    pub total_distance_miles: f64,
}

impl Default for WorkoutTemplate {
    fn default() -> Self {
        Self {
            activity: ActivityKind::Running,
            total_energy_kcal: 200.0,
            total_distance_miles: 4.0,
        }
    }
}

/// A record that has been built and handed to the sink, plus its pending write.
#[derive(Debug)]
pub struct Seeded<T> {
    pub record: T,
    completion: JoinHandle<Result<(), SeedError>>,
}

impl<T> Seeded<T> {
    /// Waits for the write to finish.
    pub async fn completion(self) -> Result<(), SeedError> {
        match self.completion.await {
            Ok(result) => result,
            Err(e) => Err(SeedError::SinkWriteFailed(format!("write task did not finish: {}", e))),
        }
    }

    pub fn into_parts(self) -> (T, JoinHandle<Result<(), SeedError>>) {
        (self.record, self.completion)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Seeded<U> {
        Seeded {
            record: f(self.record),
            completion: self.completion,
        }
    }
}

/// Awaits every pending write of a batch, preserving order.
pub async fn await_all<T>(batch: Vec<Seeded<T>>) -> Vec<Result<(), SeedError>> {
    join_all(batch.into_iter().map(Seeded::completion)).await
}

pub struct SampleSeeder {
    sink: Arc<dyn HealthDataSink>,
    categories: Arc<CategoryTable>,
    clock: Arc<dyn Clock>,
    calendar: CalendarZone,
    workout: WorkoutTemplate,
    heart_rate: HeartRateBatchPolicy,
}

impl SampleSeeder {
    pub fn new(sink: Arc<dyn HealthDataSink>, categories: Arc<CategoryTable>) -> Self {
        Self {
            sink,
            categories,
            clock: Arc::new(SystemClock),
            calendar: CalendarZone::default(),
            workout: WorkoutTemplate::default(),
            heart_rate: HeartRateBatchPolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_calendar(mut self, calendar: CalendarZone) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_workout_template(mut self, workout: WorkoutTemplate) -> Self {
        self.workout = workout;
        self
    }

    pub fn with_heart_rate_policy(mut self, policy: HeartRateBatchPolicy) -> Self {
        self.heart_rate = policy;
        self
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Point step-count sample at `now - days_prior` days.
    #[tracing::instrument(name = "Seed steps", skip(self))]
    pub fn seed_steps(&self, days_prior: f64, steps: f64) -> Result<Seeded<Sample>, SeedError> {
        let sample = self.build_steps(self.clock.now(), days_prior, steps)?;
        Ok(self.submit_sample(sample))
    }

    /// In-bed interval starting at the calendar day start `days_prior` days ago.
    #[tracing::instrument(name = "Seed sleep", skip(self))]
    pub fn seed_sleep(&self, days_prior: f64, hours_slept: f64) -> Result<Seeded<Sample>, SeedError> {
        let sample = self.build_sleep(self.clock.now(), days_prior, hours_slept)?;
        Ok(self.submit_sample(sample))
    }

    /// Workout ending `days_prior` days ago, lasting `exercise_minutes`, with a synthetic
    /// heart-rate batch attached after the workout itself is saved.
    #[tracing::instrument(name = "Seed exercise time", skip(self))]
    pub fn seed_exercise_time(
        &self,
        days_prior: f64,
        exercise_minutes: f64,
    ) -> Result<Seeded<WorkoutRecord>, SeedError> {
        let workout = self.build_workout(self.clock.now(), days_prior, exercise_minutes)?;
        Ok(self.submit_workout(workout))
    }

    /// Dispatches a generic request by category.
    ///
    /// Workouts last `duration_minutes` when given, otherwise `magnitude` minutes.
    pub fn seed(&self, request: &SeedRequest) -> Result<Seeded<HealthRecord>, SeedError> {
        if let Some(minutes) = request.duration_minutes {
            validate("duration_minutes", minutes)?;
        }
        match request.category {
            DataCategory::StepCount => Ok(self
                .seed_steps(request.days_prior, request.magnitude)?
                .map(HealthRecord::Sample)),
            DataCategory::SleepAnalysis => Ok(self
                .seed_sleep(request.days_prior, request.magnitude)?
                .map(HealthRecord::Sample)),
            DataCategory::Workout => {
                let minutes = request.duration_minutes.unwrap_or(request.magnitude);
                Ok(self
                    .seed_exercise_time(request.days_prior, minutes)?
                    .map(HealthRecord::Workout))
            }
            DataCategory::HeartRate => Err(SeedError::InvalidRequest(
                "heart-rate samples are only seeded as part of a workout".to_string(),
            )),
            other => {
                self.categories.resolve_writable(other)?;
                Err(SeedError::InvalidRequest(format!("{} cannot be seeded", other)))
            }
        }
    }

    /// One step sample per value, `days_prior` running from 0.
    ///
    /// The whole batch is built before the first write, so a bad value writes nothing.
    pub fn seed_week_of_steps(&self, values: &[f64]) -> Result<Vec<Seeded<Sample>>, SeedError> {
        let now = self.clock.now();
        let samples = values
            .iter()
            .enumerate()
            .map(|(days_prior, steps)| self.build_steps(now, days_prior as f64, *steps))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(samples.into_iter().map(|sample| self.submit_sample(sample)).collect())
    }

    pub fn seed_week_of_sleep(&self, values: &[f64]) -> Result<Vec<Seeded<Sample>>, SeedError> {
        let now = self.clock.now();
        let samples = values
            .iter()
            .enumerate()
            .map(|(days_prior, hours)| self.build_sleep(now, days_prior as f64, *hours))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(samples.into_iter().map(|sample| self.submit_sample(sample)).collect())
    }

    pub fn seed_week_of_exercise(&self, values: &[f64]) -> Result<Vec<Seeded<WorkoutRecord>>, SeedError> {
        let now = self.clock.now();
        let workouts = values
            .iter()
            .enumerate()
            .map(|(days_prior, minutes)| self.build_workout(now, days_prior as f64, *minutes))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(workouts.into_iter().map(|workout| self.submit_workout(workout)).collect())
    }

    fn build_steps(&self, now: DateTime<Utc>, days_prior: f64, steps: f64) -> Result<Sample, SeedError> {
        validate("days_prior", days_prior)?;
        validate("steps", steps)?;
        let unit = self
            .categories
            .resolve_writable(DataCategory::StepCount)?
            .unit
            .unwrap_or(Unit::Count);

        let at = days_before(now, days_prior).ok_or_else(|| out_of_range("days_prior", days_prior))?;
        Ok(Sample::point(DataCategory::StepCount, Quantity::new(steps, unit), at))
    }

    fn build_sleep(&self, now: DateTime<Utc>, days_prior: f64, hours_slept: f64) -> Result<Sample, SeedError> {
        validate("days_prior", days_prior)?;
        validate("hours_slept", hours_slept)?;
        self.categories.resolve_writable(DataCategory::SleepAnalysis)?;

        let start = days_before(now, days_prior)
            .and_then(|day| self.calendar.start_of_day(day))
            .ok_or_else(|| out_of_range("days_prior", days_prior))?;
        let end = seconds(hours_slept * SECONDS_PER_HOUR)
            .and_then(|slept| start.checked_add_signed(slept))
            .ok_or_else(|| out_of_range("hours_slept", hours_slept))?;
        Sample::interval(
            DataCategory::SleepAnalysis,
            SampleValue::Sleep { state: SleepState::InBed },
            start,
            end,
        )
    }

    fn build_workout(
        &self,
        now: DateTime<Utc>,
        days_prior: f64,
        exercise_minutes: f64,
    ) -> Result<WorkoutRecord, SeedError> {
        validate("days_prior", days_prior)?;
        validate("exercise_minutes", exercise_minutes)?;
        self.categories.resolve_writable(DataCategory::Workout)?;
        self.categories.resolve_writable(DataCategory::HeartRate)?;

        let end = days_before(now, days_prior).ok_or_else(|| out_of_range("days_prior", days_prior))?;
        let start = seconds(exercise_minutes * SECONDS_PER_MINUTE)
            .and_then(|length| end.checked_sub_signed(length))
            .ok_or_else(|| out_of_range("exercise_minutes", exercise_minutes))?;
        let children = self.heart_rate.generate(start, end);
        WorkoutRecord::new(
            self.workout.activity,
            start,
            end,
            Quantity::new(self.workout.total_energy_kcal, Unit::Kilocalories),
            Quantity::new(self.workout.total_distance_miles, Unit::Miles),
            children,
        )
    }

    fn submit_sample(&self, sample: Sample) -> Seeded<Sample> {
        let completion = self.spawn_write(HealthRecord::Sample(sample.clone()));
        Seeded { record: sample, completion }
    }

    fn submit_workout(&self, workout: WorkoutRecord) -> Seeded<WorkoutRecord> {
        let completion = self.spawn_write(HealthRecord::Workout(workout.clone()));
        Seeded { record: workout, completion }
    }

    fn spawn_write(&self, record: HealthRecord) -> JoinHandle<Result<(), SeedError>> {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move { write_record(sink.as_ref(), record).await })
    }
}

/// Saves `record`; for workouts, attaches the heart-rate batch once the save succeeded.
///
/// A failed save skips the attach. A failed attach leaves the saved workout in place.
async fn write_record(sink: &dyn HealthDataSink, record: HealthRecord) -> Result<(), SeedError> {
    let category = record.category();
    if let Err(e) = sink.save(&record).await {
        tracing::error!("Error saving {} record {}: {}", category, record.id(), e);
        return Err(e.into());
    }
    tracing::info!("Successfully saved {} record {}", category, record.id());

    if let HealthRecord::Workout(workout) = &record {
        if workout.heart_rate().is_empty() {
            return Ok(());
        }
        if let Err(e) = sink.attach(workout.heart_rate(), workout).await {
            tracing::error!("Can't save heart rate for workout {}: {}", workout.id(), e);
            return Err(e.into());
        }
        tracing::info!(
            "Saved {} heart rate samples for workout {}",
            workout.heart_rate().len(),
            workout.id()
        );
    }
    Ok(())
}

fn validate(name: &str, value: f64) -> Result<(), SeedError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SeedError::InvalidRequest(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

fn out_of_range(name: &str, value: f64) -> SeedError {
    SeedError::InvalidRequest(format!("{} of {} falls outside the supported date range", name, value))
}
