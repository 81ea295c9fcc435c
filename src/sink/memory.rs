use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{HealthRecord, Sample, SinkError, WorkoutRecord};
use crate::sink::HealthDataSink;

/// Process-local store used by the demo mode and the test suite.
#[derive(Debug)]
pub struct InMemorySink {
    records: Mutex<Vec<HealthRecord>>,
    attachments: Mutex<HashMap<Uuid, Vec<Sample>>>,
    available: AtomicBool,
    fail_saves: AtomicBool,
    fail_attaches: AtomicBool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            attachments: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            fail_saves: AtomicBool::new(false),
            fail_attaches: AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_attaches(&self, fail: bool) {
        self.fail_attaches.store(fail, Ordering::SeqCst);
    }

    pub async fn records(&self) -> Vec<HealthRecord> {
        self.records.lock().await.clone()
    }

    pub async fn record_count(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn attachments_for(&self, workout_id: Uuid) -> Vec<Sample> {
        self.attachments
            .lock()
            .await
            .get(&workout_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn attachment_count(&self) -> usize {
        self.attachments.lock().await.values().map(Vec::len).sum()
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthDataSink for InMemorySink {
    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn save(&self, record: &HealthRecord) -> Result<(), SinkError> {
        if !self.is_available().await {
            return Err(SinkError::Unavailable);
        }
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(SinkError::Rejected(format!("save of {} refused", record.id())));
        }
        self.records.lock().await.push(record.clone());
        Ok(())
    }

    async fn attach(&self, children: &[Sample], parent: &WorkoutRecord) -> Result<(), SinkError> {
        if !self.is_available().await {
            return Err(SinkError::Unavailable);
        }
        if self.fail_attaches.load(Ordering::SeqCst) {
            return Err(SinkError::Rejected(format!("attach to {} refused", parent.id())));
        }
        let saved = self
            .records
            .lock()
            .await
            .iter()
            .any(|record| record.id() == parent.id());
        if !saved {
            return Err(SinkError::UnknownParent(parent.id()));
        }
        self.attachments
            .lock()
            .await
            .entry(parent.id())
            .or_default()
            .extend(children.iter().cloned());
        Ok(())
    }
}
