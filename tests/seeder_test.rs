use chrono::{Duration, TimeZone, Utc};

use health_seeder::models::{DataCategory, SampleValue, SeedError, SleepState, Unit};
use health_seeder::seeder::fixtures::{seed_fixture_week, WEEK_OF_EXERCISE_MINUTES, WEEK_OF_SLEEP_HOURS, WEEK_OF_STEPS};
use health_seeder::seeder::await_all;

mod common;
use common::utils::{reference_now, seeder_at};

#[tokio::test]
async fn seed_steps_fixture_scenario() {
    let now = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
    let (sink, seeder) = seeder_at(now);

    let seeded = seeder.seed_steps(0.0, 5540.0).expect("Failed to seed steps");
    let sample = seeded.record.clone();
    seeded.completion().await.expect("Step write failed");

    assert_eq!(sample.category(), DataCategory::StepCount);
    assert_eq!(sample.quantity().map(|q| q.value), Some(5540.0));
    assert_eq!(sample.quantity().map(|q| q.unit), Some(Unit::Count));
    assert_eq!(sample.start(), now);
    assert_eq!(sample.end(), now);

    let stored = sink.records().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id(), sample.id());
}

#[tokio::test]
async fn seed_steps_is_a_point_sample_days_before_now() {
    let now = reference_now();
    let (_sink, seeder) = seeder_at(now);

    for (days_prior, steps) in WEEK_OF_STEPS.iter().enumerate() {
        let sample = seeder.seed_steps(days_prior as f64, *steps).unwrap().record;
        let expected = now - Duration::seconds(days_prior as i64 * 86_400);
        assert!(sample.is_point());
        assert_eq!(sample.start(), expected);
    }
}

#[tokio::test]
async fn seed_sleep_fixture_scenario() {
    let (sink, seeder) = seeder_at(reference_now());

    let seeded = seeder.seed_sleep(1.0, 8.0).expect("Failed to seed sleep");
    let sample = seeded.record.clone();
    seeded.completion().await.expect("Sleep write failed");

    assert_eq!(sample.category(), DataCategory::SleepAnalysis);
    assert_eq!(sample.value(), &SampleValue::Sleep { state: SleepState::InBed });
    assert_eq!(sample.start(), Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap());
    assert_eq!(sample.end(), Utc.with_ymd_and_hms(2024, 1, 7, 8, 0, 0).unwrap());
    assert_eq!(sink.record_count().await, 1);
}

#[tokio::test]
async fn seed_sleep_spans_hours_from_start_of_day() {
    let now = reference_now();
    let (_sink, seeder) = seeder_at(now);

    for (days_prior, hours) in WEEK_OF_SLEEP_HOURS.iter().enumerate() {
        let sample = seeder.seed_sleep(days_prior as f64, *hours).unwrap().record;
        let day = now.date_naive() - Duration::days(days_prior as i64);
        let expected_start = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(sample.start(), expected_start);
        assert_eq!(
            sample.end() - sample.start(),
            Duration::milliseconds((hours * 3_600_000.0).round() as i64)
        );
    }
}

#[tokio::test]
async fn seed_exercise_fixture_scenario() {
    let (sink, seeder) = seeder_at(reference_now());

    let seeded = seeder.seed_exercise_time(0.0, 10.0).expect("Failed to seed exercise");
    let workout = seeded.record.clone();
    seeded.completion().await.expect("Workout write failed");

    assert_eq!(workout.end(), reference_now());
    assert_eq!(workout.duration(), Duration::seconds(600));
    assert_eq!(workout.total_energy().value, 200.0);
    assert_eq!(workout.total_energy().unit, Unit::Kilocalories);
    assert_eq!(workout.total_distance().value, 4.0);
    assert_eq!(workout.total_distance().unit, Unit::Miles);
    assert!(!workout.heart_rate().is_empty());

    let attached = sink.attachments_for(workout.id()).await;
    assert_eq!(attached.len(), workout.heart_rate().len());
    assert!(attached.iter().all(|s| s.category() == DataCategory::HeartRate));
}

#[tokio::test]
async fn every_heart_rate_child_starts_within_the_workout() {
    let (_sink, seeder) = seeder_at(reference_now());

    for (days_prior, minutes) in WEEK_OF_EXERCISE_MINUTES.iter().enumerate() {
        let workout = seeder.seed_exercise_time(days_prior as f64, *minutes).unwrap().record;
        assert_eq!(workout.duration(), Duration::seconds((*minutes as i64) * 60));
        assert!(!workout.heart_rate().is_empty());
        for child in workout.heart_rate() {
            assert!(child.start() >= workout.start());
            assert!(child.start() <= child.end());
            let bpm = child.quantity().map(|q| q.value).unwrap();
            assert!((94.0..=97.0).contains(&bpm));
        }
        let starts: Vec<_> = workout.heart_rate().iter().map(|s| s.start()).collect();
        assert!(starts.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[tokio::test]
async fn identical_calls_write_two_distinct_records() {
    let (sink, seeder) = seeder_at(reference_now());

    let first = seeder.seed_steps(2.0, 9000.0).unwrap();
    let second = seeder.seed_steps(2.0, 9000.0).unwrap();
    assert_ne!(first.record.id(), second.record.id());

    let outcomes = await_all(vec![first, second]).await;
    assert!(outcomes.iter().all(Result::is_ok));
    assert_eq!(sink.record_count().await, 2);
}

#[tokio::test]
async fn failed_workout_save_skips_heart_rate_attach() {
    let (sink, seeder) = seeder_at(reference_now());
    sink.fail_saves(true);

    let seeded = seeder.seed_exercise_time(0.0, 20.0).unwrap();
    let result = seeded.completion().await;

    assert!(matches!(result, Err(SeedError::SinkWriteFailed(_))));
    assert_eq!(sink.record_count().await, 0);
    assert_eq!(sink.attachment_count().await, 0);
}

#[tokio::test]
async fn failed_attach_leaves_saved_workout_in_place() {
    let (sink, seeder) = seeder_at(reference_now());
    sink.fail_attaches(true);

    let seeded = seeder.seed_exercise_time(0.0, 20.0).unwrap();
    let workout_id = seeded.record.id();
    let result = seeded.completion().await;

    assert!(matches!(result, Err(SeedError::SinkWriteFailed(_))));
    let stored = sink.records().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id(), workout_id);
    assert!(sink.attachments_for(workout_id).await.is_empty());
}

#[tokio::test]
async fn unavailable_store_reports_write_failure() {
    let (sink, seeder) = seeder_at(reference_now());
    sink.set_available(false);

    let result = seeder.seed_steps(0.0, 100.0).unwrap().completion().await;
    assert!(matches!(result, Err(SeedError::SinkWriteFailed(ref msg)) if msg.contains("unavailable")));
}

#[tokio::test]
async fn fixture_week_writes_every_record() {
    let (sink, seeder) = seeder_at(reference_now());

    let succeeded = seed_fixture_week(&seeder).await.expect("Failed to seed fixture week");

    assert_eq!(succeeded, 21);
    assert_eq!(sink.record_count().await, 21);
    // every workout, including the zero-minute one, gets the default batch of seven
    assert_eq!(sink.attachment_count().await, 7 * 7);
}
