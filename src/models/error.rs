use uuid::Uuid;

use crate::models::category::DataCategory;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Health data store is not available")]
    AuthorizationUnavailable,

    #[error("Health data categories unavailable: {}", join_categories(.0))]
    CategoryUnavailable(Vec<DataCategory>),

    #[error("Failed to write to health data store: {0}")]
    SinkWriteFailed(String),

    #[error("Invalid seed request: {0}")]
    InvalidRequest(String),
}

impl From<SinkError> for SeedError {
    fn from(e: SinkError) -> Self {
        SeedError::SinkWriteFailed(e.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Health data store is unavailable")]
    Unavailable,

    #[error("Record rejected by store: {0}")]
    Rejected(String),

    #[error("Parent workout {0} has not been saved")]
    UnknownParent(Uuid),
}

fn join_categories(categories: &[DataCategory]) -> String {
    categories
        .iter()
        .map(|c| c.identifier())
        .collect::<Vec<_>>()
        .join(", ")
}
