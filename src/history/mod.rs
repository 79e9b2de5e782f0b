//! Bounded history of process snapshots and the life-and-death diff over it

mod life_and_death;
mod snapshot;

pub use life_and_death::{LifeAndDeath, Status};
pub use snapshot::Snapshot;

use std::collections::VecDeque;
use std::time::Duration;

/// Number of snapshots needed to keep changes highlighted for `highlight` when polling every
/// `interval`. Never less than one, so the latest snapshot is always kept.
pub fn window_capacity(highlight: Duration, interval: Duration) -> usize {
    let ratio = highlight.as_secs_f64() / interval.as_secs_f64();
    if !ratio.is_finite() {
        return 1;
    }
    (ratio.round() as usize).max(1)
}

/// Fixed-capacity FIFO of snapshots, oldest first.
///
/// Pushing into a full window evicts the oldest snapshot, which is the only thing bounding memory
/// over arbitrarily long runs.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl HistoryWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        while self.snapshots.len() >= self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    pub fn oldest(&self) -> Option<&Snapshot> {
        self.snapshots.front()
    }

    pub fn newest(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    /// Snapshots from oldest to newest
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn life_and_death(&self) -> LifeAndDeath {
        LifeAndDeath::compute(self)
    }
}
