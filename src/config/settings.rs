use std::env;
use config::{Config, File, ConfigError};
use dotenv::dotenv;
use secrecy::{ExposeSecret, SecretString};

use crate::models::{ActivityKind, SeedError};
use crate::seeder::clock::CalendarZone;
use crate::seeder::heart_rate::HeartRateBatchPolicy;
use crate::seeder::WorkoutTemplate;

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub sink: SinkSettings,
    pub seeding: SeedingSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    pub log_level: String,
    /// Seed the fixture week of steps, sleep and exercise once the store is authorized.
    #[serde(default)]
    pub seed_on_startup: bool,
}

#[derive(serde::Deserialize, Debug)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub db_name: String,
    #[serde(default)]
    pub db_url: Option<SecretString>,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> SecretString {
        match &self.db_url {
            Some(db_url) => db_url.clone(),
            None => {
                SecretString::new(format!(
                    "postgres://{}:{}@{}:{}/{}",
                    self.user, self.password.expose_secret(), self.host, self.port, self.db_name
                ).into_boxed_str())
            }
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkBackend {
    Memory,
    Postgres,
}

#[derive(serde::Deserialize, Debug)]
pub struct SinkSettings {
    pub backend: SinkBackend,
}

#[derive(serde::Deserialize, Debug)]
pub struct SeedingSettings {
    #[serde(default)]
    pub calendar: CalendarZone,
    pub workout: WorkoutSettings,
    pub heart_rate: HeartRateSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct WorkoutSettings {
    pub activity: ActivityKind,
    pub total_energy_kcal: f64,
    pub total_distance_miles: f64,
}

impl WorkoutSettings {
    pub fn template(&self) -> WorkoutTemplate {
        WorkoutTemplate {
            activity: self.activity,
            total_energy_kcal: self.total_energy_kcal,
            total_distance_miles: self.total_distance_miles,
        }
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct HeartRateSettings {
    pub count: usize,
    pub values: Vec<f64>,
}

impl HeartRateSettings {
    pub fn policy(&self) -> Result<HeartRateBatchPolicy, SeedError> {
        HeartRateBatchPolicy::new(self.count, self.values.clone())
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)))
        .add_source(
            config::Environment::default()
                .prefix("POSTGRES")
                .prefix_separator("__")
                .separator("__")
        )
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__")
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;

    // A full connection string in the environment wins over the composed one
    if let Ok(db_url) = env::var("DATABASE_URL") {
        settings.database.db_url = Some(SecretString::new(db_url.into_boxed_str()));
    }

    Ok(settings)
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}
