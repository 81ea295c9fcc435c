use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{CategoryTable, DataCategory, SeedError};
use crate::sink::HealthDataSink;

/// Grants read and write access to health data categories.
#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    async fn request_authorization(
        &self,
        read: &BTreeSet<DataCategory>,
        write: &BTreeSet<DataCategory>,
    ) -> Result<bool, SeedError>;
}

/// Authorizes against a configured store and the category table.
pub struct StoreAuthorizer {
    sink: Option<Arc<dyn HealthDataSink>>,
    categories: Arc<CategoryTable>,
}

impl StoreAuthorizer {
    pub fn new(sink: Option<Arc<dyn HealthDataSink>>, categories: Arc<CategoryTable>) -> Self {
        Self { sink, categories }
    }
}

#[async_trait]
impl AuthorizationGate for StoreAuthorizer {
    #[tracing::instrument(
        name = "Request health data authorization",
        skip(self),
        fields(read_count = read.len(), write_count = write.len())
    )]
    async fn request_authorization(
        &self,
        read: &BTreeSet<DataCategory>,
        write: &BTreeSet<DataCategory>,
    ) -> Result<bool, SeedError> {
        let sink = match &self.sink {
            Some(sink) => sink,
            None => {
                tracing::warn!("No health data store configured");
                return Err(SeedError::AuthorizationUnavailable);
            }
        };
        if !sink.is_available().await {
            return Err(SeedError::AuthorizationUnavailable);
        }

        let unavailable: BTreeSet<DataCategory> = read
            .iter()
            .filter(|c| self.categories.resolve(**c).is_err())
            .chain(write.iter().filter(|c| self.categories.resolve_writable(**c).is_err()))
            .copied()
            .collect();
        if !unavailable.is_empty() {
            return Err(SeedError::CategoryUnavailable(unavailable.into_iter().collect()));
        }

        Ok(true)
    }
}

/// Last authorization outcome, consulted by the HTTP layer before seeding.
pub struct AuthorizationState {
    gate: Arc<dyn AuthorizationGate>,
    categories: Arc<CategoryTable>,
    granted: AtomicBool,
}

impl AuthorizationState {
    pub fn new(gate: Arc<dyn AuthorizationGate>, categories: Arc<CategoryTable>) -> Self {
        Self {
            gate,
            categories,
            granted: AtomicBool::new(false),
        }
    }

    pub fn is_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    pub fn read_set(&self) -> BTreeSet<DataCategory> {
        self.categories.read_set()
    }

    pub fn write_set(&self) -> BTreeSet<DataCategory> {
        self.categories.write_set()
    }

    /// Requests the default read and write sets and records the outcome.
    pub async fn authorize(&self) -> Result<bool, SeedError> {
        let result = self
            .gate
            .request_authorization(&self.read_set(), &self.write_set())
            .await;
        let granted = matches!(result, Ok(true));
        self.granted.store(granted, Ordering::SeqCst);
        result
    }
}
