use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use health_seeder::run;
use health_seeder::config::settings::{get_config, Settings, SinkBackend};
use health_seeder::models::CategoryTable;
use health_seeder::seeder::fixtures::seed_fixture_week;
use health_seeder::seeder::SampleSeeder;
use health_seeder::services::{AuthorizationState, StoreAuthorizer};
use health_seeder::sink::{HealthDataSink, InMemorySink, PostgresSink};
use health_seeder::telemetry::{get_subscriber, init_subscriber};

async fn build_sink(config: &Settings) -> Result<Arc<dyn HealthDataSink>, sqlx::Error> {
    match config.sink.backend {
        SinkBackend::Memory => {
            tracing::info!("Using in-memory health data store");
            Ok(Arc::new(InMemorySink::new()))
        }
        SinkBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(16)
                .acquire_timeout(Duration::from_secs(10))
                .connect_lazy(config.database.connection_string().expose_secret())?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Using Postgres health data store");
            Ok(Arc::new(PostgresSink::new(pool)))
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "health-seeder".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let sink = match build_sink(&config).await {
        Ok(sink) => sink,
        Err(e) => {
            tracing::error!("Failed to set up health data store: {}", e);
            std::process::exit(1);
        }
    };

    let categories = Arc::new(CategoryTable::standard());
    let heart_rate_policy = match config.seeding.heart_rate.policy() {
        Ok(policy) => policy,
        Err(e) => {
            tracing::error!("Invalid heart rate configuration: {}", e);
            std::process::exit(1);
        }
    };

    let authorizer = Arc::new(StoreAuthorizer::new(Some(sink.clone()), categories.clone()));
    let authorization = Arc::new(AuthorizationState::new(authorizer, categories.clone()));
    match authorization.authorize().await {
        Ok(_) => tracing::info!("Health data store successfully authorized."),
        Err(e) => tracing::error!("Health data authorization failed. Reason: {}", e),
    }

    let seeder = Arc::new(
        SampleSeeder::new(sink, categories)
            .with_calendar(config.seeding.calendar)
            .with_workout_template(config.seeding.workout.template())
            .with_heart_rate_policy(heart_rate_policy),
    );

    if config.application.seed_on_startup && authorization.is_granted() {
        if let Err(e) = seed_fixture_week(&seeder).await {
            tracing::error!("Failed to seed fixture week: {}", e);
        }
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(listener, seeder, authorization)?.await
}
