//! sysmon — a live terminal monitor for a single system metric.
//!
//! A background thread samples the metric on a fixed interval and
//! feeds a sliding window; the terminal UI redraws a line chart and a
//! one-row summary table from each window snapshot.

pub mod app;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod sampler;
pub mod ui;
pub mod util;
pub mod window;

pub use error::{MonitorError, Result};
