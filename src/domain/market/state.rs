//! Live sample state — app-owned, engine-provided update logic.

use std::collections::VecDeque;

/// Bounded FIFO of locally observed prices.
///
/// The upstream provider's native resolution is too coarse for very short
/// deltas when polling every few minutes, so each successful poll appends the
/// observed spot price here. The buffer starts empty on every process start
/// and is never persisted; short-window deltas stay `None` until enough
/// samples accumulate.
#[derive(Debug, Clone)]
pub struct LiveSampleBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl LiveSampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest when at capacity.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Samples in observation order, oldest first.
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    /// Percentage change across the last `k` samples.
    ///
    /// Uses the last `min(k, len)` values; `None` with fewer than 2 samples
    /// or a zero first value.
    pub fn change_pct_over_last(&self, k: usize) -> Option<f64> {
        let len = self.samples.len();
        let take = k.min(len);
        if take < 2 {
            return None;
        }
        let first = *self.samples.get(len - take)?;
        let last = *self.samples.back()?;
        if !first.is_finite() || !last.is_finite() || first == 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
