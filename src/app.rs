use std::{sync::mpsc::Receiver, time::Instant};

use crate::metrics::{Reading, Tag};
use crate::window::SlidingWindow;

/// Main application state: the sliding window of readings plus the
/// latest emitted snapshot the UI renders from.
pub struct App {
    pub tag: Tag,
    window: SlidingWindow<Reading>,
    pub snapshot: Vec<Reading>,
    pub last_tick: Instant,
}

impl App {
    pub fn new(tag: Tag, window_points: usize) -> App {
        App {
            tag,
            window: SlidingWindow::new(window_points),
            snapshot: Vec::new(),
            last_tick: Instant::now(),
        }
    }

    /// Push one reading through the windowing stage and keep the
    /// emitted snapshot for rendering.
    pub fn on_reading(&mut self, reading: Reading) {
        self.snapshot = self.window.push(reading);
    }

    /// Drain every reading currently queued on the channel. Returns how
    /// many arrived, so the caller knows whether a redraw shows new data.
    pub fn drain(&mut self, rx: &Receiver<Reading>) -> usize {
        let mut received = 0;
        for reading in rx.try_iter() {
            self.on_reading(reading);
            received += 1;
        }
        received
    }

    /// Plottable points from the current snapshot: x = window position,
    /// y = value. Failed readings are skipped and leave a gap in the
    /// series; positions of the surviving points stay aligned.
    pub fn series(&self) -> Vec<(f64, f64)> {
        self.snapshot
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.value.map(|v| (i as f64, v)))
            .collect()
    }

    /// Value of the most recent reading in the window, if it succeeded.
    pub fn latest_value(&self) -> Option<f64> {
        self.snapshot.last().and_then(|r| r.value)
    }
}
