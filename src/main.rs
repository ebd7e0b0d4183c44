//! Run with:  `RUST_LOG=info sysmon`

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    time::Duration,
};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use sysmon::{
    app::App,
    constants::{TICK_RATE_MS, WINDOW_POINTS},
    metrics::Tag,
    sampler, ui,
};

/// Which metric this process samples. Fixed for the process lifetime.
const MONITOR_TAG: Tag = Tag::CpuPercent;

fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("sysmon v{} starting", env!("CARGO_PKG_VERSION"));

    // SIGINT/SIGTERM unwind the terminal cleanly instead of leaving raw
    // mode behind.
    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))?;

    let (tx, rx) = mpsc::channel();
    let _sampler = sampler::spawn(MONITOR_TAG, Duration::from_millis(TICK_RATE_MS), tx);

    let app = App::new(MONITOR_TAG, WINDOW_POINTS);
    ui::run(app, rx, running)?;

    tracing::info!("sysmon shutting down");
    Ok(())
}
