/// Milliseconds between sampling ticks, measured from source start.
pub const TICK_RATE_MS: u64 = 100;

/// Number of readings kept in the sliding display window.
pub const WINDOW_POINTS: usize = 10;

/// Artificial pacing delay inside every metric read, additive to the
/// tick interval.
pub const READ_DELAY_MS: u64 = 200;
