use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use health_seeder::models::CategoryTable;
use health_seeder::run;
use health_seeder::seeder::clock::{CalendarZone, FixedClock};
use health_seeder::seeder::SampleSeeder;
use health_seeder::services::{AuthorizationState, StoreAuthorizer};
use health_seeder::sink::{HealthDataSink, InMemorySink};
use health_seeder::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 8, 15, 0, 0).unwrap()
}

pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Seeder over a fresh in-memory store, pinned to `now` on the UTC calendar.
pub fn seeder_at(now: DateTime<Utc>) -> (Arc<InMemorySink>, SampleSeeder) {
    init_tracing();
    let sink = Arc::new(InMemorySink::new());
    let seeder = SampleSeeder::new(sink.clone(), Arc::new(CategoryTable::standard()))
        .with_clock(Arc::new(FixedClock(now)))
        .with_calendar(CalendarZone::Utc);
    (sink, seeder)
}

pub struct TestApp {
    pub address: String,
    pub sink: Arc<InMemorySink>,
    pub authorization: Arc<AuthorizationState>,
}

pub async fn spawn_app() -> TestApp {
    let app = spawn_unauthorized_app().await;
    app.authorization
        .authorize()
        .await
        .expect("Failed to authorize the in-memory store.");
    app
}

pub async fn spawn_unauthorized_app() -> TestApp {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let (sink, seeder) = seeder_at(reference_now());
    let categories = Arc::new(CategoryTable::standard());
    let authorizer = Arc::new(StoreAuthorizer::new(
        Some(sink.clone() as Arc<dyn HealthDataSink>),
        categories.clone(),
    ));
    let authorization = Arc::new(AuthorizationState::new(authorizer, categories));

    let server = run(listener, Arc::new(seeder), authorization.clone())
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);
    TestApp {
        address,
        sink,
        authorization,
    }
}

/// Polls the store until it holds `expected` records or five seconds pass.
pub async fn wait_for_records(sink: &InMemorySink, expected: usize) -> usize {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let count = sink.record_count().await;
        if count >= expected || tokio::time::Instant::now() >= deadline {
            return count;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Like [`wait_for_records`] for attached heart-rate samples.
pub async fn wait_for_attachments(sink: &InMemorySink, expected: usize) -> usize {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let count = sink.attachment_count().await;
        if count >= expected || tokio::time::Instant::now() >= deadline {
            return count;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
