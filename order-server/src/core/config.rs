//! Server configuration
//!
//! # Environment variables
//!
//! All settings can be overridden via environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | WORK_DIR | /var/lib/order-server | Working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | TIMEZONE | UTC | Business timezone (IANA name) |
//! | REQUEST_TIMEOUT_MS | 30000 | Per-operation store deadline (ms) |
//! | SEQUENCE_MAX_RETRIES | 3 | Order number generation retry budget |
//! | LOG_DIR | (unset) | Daily-rolling log file directory |
//!
//! # Example
//!
//! ```ignore
//! WORK_DIR=/data/orders HTTP_PORT=8080 TIMEZONE=Asia/Jakarta cargo run
//! ```

use std::path::PathBuf;

use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Business timezone for order dating and daily sequence reset
    pub timezone: Tz,
    /// Deadline for each store operation (milliseconds)
    pub request_timeout_ms: u64,
    /// Retry budget for order number generation
    pub sequence_max_retries: u32,
    /// Optional log file directory
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/order-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::UTC),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            sequence_max_retries: std::env::var("SEQUENCE_MAX_RETRIES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override the work dir and port — mainly for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory holding the embedded database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Create the work directory structure if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        if let Some(dir) = &self.log_dir {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_dir_is_under_work_dir() {
        let config = Config::with_overrides("/tmp/order-server-test", 0);
        assert_eq!(
            config.database_dir(),
            PathBuf::from("/tmp/order-server-test/database")
        );
    }
}
