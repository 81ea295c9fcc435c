pub mod category;
pub mod error;
pub mod sample;
pub mod seed_request;

pub use category::{Access, CategorySpec, CategoryTable, DataCategory, RecordShape, Unit};
pub use error::{SeedError, SinkError};
pub use sample::{ActivityKind, HealthRecord, Quantity, Sample, SampleValue, SleepState, WorkoutRecord};
pub use seed_request::SeedRequest;
