use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

/// Struct to allow the tracking of how often something happens within a trailing window.
///
/// For example, can be used to determine how many times a user ran a command in the last five
/// seconds. Samples outside of the window are only dropped when [`RateTracker::evict`] is called,
/// so the tracker never needs a background task.
#[derive(Debug)]
pub struct RateTracker {
    tracking_length: Duration,
    samples: VecDeque<Instant>,
}
impl RateTracker {
    pub fn new(tracking_length: Duration) -> RateTracker {
        RateTracker {
            tracking_length,
            samples: VecDeque::new(),
        }
    }

    /// Drops every sample that is at least `tracking_length` old, relative to `now`.
    pub fn evict(&mut self, now: Instant) {
        while let Some(&oldest) = self.samples.front() {
            if now.saturating_duration_since(oldest) >= self.tracking_length {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn add_sample(&mut self, at: Instant) {
        self.samples.push_back(at);
    }

    pub fn oldest(&self) -> Option<Instant> {
        self.samples.front().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
