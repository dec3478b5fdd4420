use crate::history::record::{ClassificationRecord, HistoryLog};
use crate::library::logger::interface::Logger;
use crate::storage::interface::{KeyValueStorage, StorageError};
use std::sync::Arc;
use thiserror::Error;

pub const HISTORY_STORAGE_KEY: &str = "classificationHistory";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("could not persist history: {0}")]
    Storage(#[from] StorageError),

    #[error("could not serialize history: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Owns the history log and mirrors it into key-value storage on every append.
pub struct HistoryStore {
    storage: Arc<dyn KeyValueStorage + Send + Sync>,
    key: String,
    log: HistoryLog,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl HistoryStore {
    pub fn new(
        storage: Arc<dyn KeyValueStorage + Send + Sync>,
        key: impl Into<String>,
        capacity: usize,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            storage,
            key: key.into(),
            log: HistoryLog::new(capacity),
            logger: logger.with_namespace("history"),
        }
    }

    /// Replaces the in-memory log with the persisted one. Anything unreadable
    /// leaves the log empty.
    pub fn load(&mut self) {
        let capacity = self.log.capacity();
        self.log = HistoryLog::new(capacity);

        let stored = match self.storage.get(&self.key) {
            Ok(Some(stored)) => stored,
            Ok(None) => return,
            Err(e) => {
                let _ = self
                    .logger
                    .warn(&format!("reading stored history failed: {}", e));
                return;
            }
        };

        match serde_json::from_str::<Vec<ClassificationRecord>>(&stored) {
            Ok(records) => {
                self.log = HistoryLog::from_records(records, capacity);
                let _ = self
                    .logger
                    .info(&format!("loaded {} history records", self.log.len()));
            }
            Err(e) => {
                let _ = self
                    .logger
                    .warn(&format!("stored history is unreadable, starting empty: {}", e));
            }
        }
    }

    /// The in-memory log keeps the record even when writing it out fails.
    pub fn append(&mut self, record: ClassificationRecord) -> Result<(), HistoryError> {
        self.log.push(record);
        self.persist()
    }

    #[cfg(test)]
    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    pub fn records(&self) -> Vec<ClassificationRecord> {
        self.log.to_vec()
    }

    fn persist(&self) -> Result<(), HistoryError> {
        let serialized = serde_json::to_string(&self.log.to_vec())?;
        self.storage.set(&self.key, &serialized)?;
        Ok(())
    }
}
