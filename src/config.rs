use crate::history::record::DEFAULT_HISTORY_CAPACITY;
use crate::history::store::HISTORY_STORAGE_KEY;
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Initial value of the editable API URL; every request reads the current one.
    pub api_base_url: String,
    pub data_dir: PathBuf,
    pub history_key: String,
    pub history_capacity: usize,
    /// Celebrate when the top confidence is strictly above this.
    pub celebrate_min_confidence: f64,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: default_data_dir(),
            history_key: HISTORY_STORAGE_KEY.to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            celebrate_min_confidence: 0.8,
            logger_timezone: local_timezone(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("waste-classifier")
}

fn local_timezone() -> chrono::FixedOffset {
    *chrono::Local::now().offset()
}
