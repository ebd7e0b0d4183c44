use thiserror::Error;

/// Top-level error type used across the application.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("metric error: {0}")]
    Metric(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = MonitorError> = std::result::Result<T, E>;
