//! Logging and observability
//!
//! Structured logging with JSON output, configurable log levels, and local
//! file rotation.
//!
//! # Example
//!
//! ```no_run
//! use vigil::logging::init_logging;
//! use vigil::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a file analysis
///
/// # Example
///
/// ```no_run
/// use vigil::log_scan_start;
///
/// log_scan_start!("reports/q3.txt", 4);
/// ```
#[macro_export]
macro_rules! log_scan_start {
    ($file_id:expr, $chunks:expr) => {
        tracing::info!(
            file = %$file_id,
            chunks = $chunks,
            "Starting analysis"
        );
    };
}

/// Log the completion of a scan run
///
/// # Example
///
/// ```no_run
/// use vigil::log_scan_complete;
/// use std::time::Duration;
///
/// log_scan_complete!(42, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_scan_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis(),
            "Scan completed"
        );
    };
}
