use std::{
    sync::mpsc::Sender,
    thread,
    time::{Duration, Instant},
};

use tracing::debug;

use crate::metrics::{MetricSource, Reading, Tag};

/// Start the background sampling thread: one [`Reading`] per tick, sent
/// through `tx`. Tick n is due at `start + n * interval`, measured from
/// thread start rather than from completion of the previous read.
///
/// The source is non-restartable and stops only when the receiver is
/// dropped. The sender is cloneable, but this program keeps a single
/// consumer.
pub fn spawn(tag: Tag, interval: Duration, tx: Sender<Reading>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut source = MetricSource::new();
        let start = Instant::now();
        let mut tick: u32 = 0;

        loop {
            let due = start + interval * tick;
            if let Some(wait) = due.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }

            // The read itself includes the pacing delay, so it can
            // overrun the interval.
            let reading = source.read(tag);
            if tx.send(reading).is_err() {
                debug!("receiver dropped, sampler stopping");
                break;
            }

            let next = next_tick(start.elapsed(), interval, tick);
            if next > tick + 1 {
                debug!(skipped = next - tick - 1, "read overran interval");
            }
            tick = next;
        }
    })
}

/// Index of the next tick still in the future. Reads are serialized:
/// ticks that passed while a read was in flight are dropped rather than
/// replayed as a burst.
fn next_tick(elapsed: Duration, interval: Duration, current: u32) -> u32 {
    let completed = (elapsed.as_micros() / interval.as_micros()) as u32;
    completed.max(current) + 1
}
