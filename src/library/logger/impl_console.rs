use crate::library::logger::interface::{LogLevel, Logger};
use chrono::Utc;
use std::io::Write;
use std::sync::Arc;

/// Writes timestamped lines to stderr so they never interleave with the
/// console display on stdout.
#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
    min_level: LogLevel,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset, verbose: bool) -> Self {
        Self {
            namespace: None,
            timezone,
            min_level: if verbose {
                LogLevel::Info
            } else {
                LogLevel::Warn
            },
        }
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        let utc_now = Utc::now();
        let local_time = utc_now.with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %I:%M:%S%.3f %p");
        match &self.namespace {
            Some(namespace) => format!(
                "[{}] {} {}: {}",
                formatted,
                level.as_str(),
                namespace,
                message
            ),
            None => format!("[{}] {} {}", formatted, level.as_str(), message),
        }
    }
}

impl Logger for LoggerConsole {
    fn log(
        &self,
        level: LogLevel,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if level < self.min_level {
            return Ok(());
        }
        let line = self.format_line(level, message);
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", line)?;
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerConsole {
            namespace: Some(new_namespace),
            timezone: self.timezone,
            min_level: self.min_level,
        })
    }
}
