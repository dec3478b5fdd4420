use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// One completed classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub class: String,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl ClassificationRecord {
    pub fn new(class: impl Into<String>, confidence: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            class: class.into(),
            confidence,
            timestamp,
        }
    }
}

/// Chronological log holding at most `capacity` records; the oldest go first.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    records: VecDeque<ClassificationRecord>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Keeps only the most recent `capacity` entries of `records`.
    pub fn from_records(records: Vec<ClassificationRecord>, capacity: usize) -> Self {
        let mut log = Self::new(capacity);
        for record in records {
            log.push(record);
        }
        log
    }

    pub fn push(&mut self, record: ClassificationRecord) {
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &ClassificationRecord> {
        self.records.iter()
    }

    pub fn to_vec(&self) -> Vec<ClassificationRecord> {
        self.records.iter().cloned().collect()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
