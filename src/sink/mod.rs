use async_trait::async_trait;

use crate::models::{HealthRecord, Sample, SinkError, WorkoutRecord};

pub mod memory;
pub mod postgres;

pub use memory::InMemorySink;
pub use postgres::PostgresSink;

/// Durable store for seeded health records.
///
/// Calls may be in flight concurrently; implementations give no ordering guarantee
/// between them.
#[async_trait]
pub trait HealthDataSink: Send + Sync {
    /// Whether the backing store can currently accept writes.
    async fn is_available(&self) -> bool;

    async fn save(&self, record: &HealthRecord) -> Result<(), SinkError>;

    /// Associates `children` with an already saved workout.
    async fn attach(&self, children: &[Sample], parent: &WorkoutRecord) -> Result<(), SinkError>;
}
