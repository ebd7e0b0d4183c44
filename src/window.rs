use std::collections::VecDeque;

/// Fixed-capacity, most-recent-N sliding window.
///
/// Every push emits an owned snapshot of the whole window (stride 1,
/// partial windows from the very first element). Later pushes never
/// alter a snapshot already handed out.
#[derive(Debug, Clone)]
pub struct SlidingWindow<T> {
    buf: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> SlidingWindow<T> {
    /// `capacity` must be at least 1.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "window capacity must be at least 1");
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `item`, evicting the oldest entry when full, and return a
    /// snapshot of the window contents, oldest first.
    pub fn push(&mut self, item: T) -> Vec<T> {
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(item);
        self.buf.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kth_snapshot_is_last_min_k_n_inputs() {
        for capacity in 1..=5usize {
            let mut window = SlidingWindow::new(capacity);
            let input: Vec<i32> = (1..=12).collect();

            for (k, &item) in input.iter().enumerate() {
                let snapshot = window.push(item);
                let expected_len = (k + 1).min(capacity);
                assert_eq!(snapshot.len(), expected_len);

                let expected: Vec<i32> = input[..=k]
                    .iter()
                    .rev()
                    .take(expected_len)
                    .rev()
                    .cloned()
                    .collect();
                assert_eq!(snapshot, expected, "N={capacity} k={}", k + 1);
            }
        }
    }

    #[test]
    fn partial_windows_emitted_from_first_push() {
        let mut window = SlidingWindow::new(10);
        assert_eq!(window.push(7), vec![7]);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn snapshots_are_immune_to_later_pushes() {
        let mut window = SlidingWindow::new(3);
        window.push(1);
        let snapshot = window.push(2);
        window.push(3);
        window.push(4);
        assert_eq!(snapshot, vec![1, 2]);
    }

    #[test]
    #[should_panic]
    fn zero_capacity_rejected() {
        let _ = SlidingWindow::<i32>::new(0);
    }
}
