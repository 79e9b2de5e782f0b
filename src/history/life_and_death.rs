use super::HistoryWindow;
use crate::process::Pid;
use std::collections::{HashMap, HashSet};

/// Lifecycle of a pid relative to the edges of the history window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Not in the oldest snapshot but present in the newest one
    New,
    /// Missing from the newest snapshot. Wins over `New`.
    Dead,
    Steady,
}

/// First and last snapshot index a pid was seen at, oldest snapshot being 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub first: usize,
    pub last: usize,
}

/// Which pids appeared and disappeared over the window.
///
/// Computed in a single pass over the window: a pid has appeared when it was first seen after the
/// oldest snapshot, and has disappeared when it was last seen before the newest one.
#[derive(Debug, Clone, Default)]
pub struct LifeAndDeath {
    spans: HashMap<Pid, Span>,
    newest: usize,
}

impl LifeAndDeath {
    pub(crate) fn compute(window: &HistoryWindow) -> Self {
        let mut spans: HashMap<Pid, Span> = HashMap::new();
        for (index, snapshot) in window.iter().enumerate() {
            for descriptor in snapshot {
                spans
                    .entry(descriptor.pid)
                    .and_modify(|span| span.last = index)
                    .or_insert(Span {
                        first: index,
                        last: index,
                    });
            }
        }
        Self {
            spans,
            newest: window.len().saturating_sub(1),
        }
    }

    pub(crate) fn span(&self, pid: Pid) -> Option<Span> {
        self.spans.get(&pid).copied()
    }

    /// Status of a pid seen in the window, `None` for pids the window never saw
    pub fn status_of(&self, pid: Pid) -> Option<Status> {
        let span = self.span(pid)?;
        let status = if span.last != self.newest {
            Status::Dead
        } else if span.first != 0 {
            Status::New
        } else {
            Status::Steady
        };
        Some(status)
    }

    pub fn is_new(&self, pid: Pid) -> bool {
        self.span(pid).is_some_and(|span| span.first != 0)
    }

    pub fn is_dead(&self, pid: Pid) -> bool {
        self.span(pid).is_some_and(|span| span.last != self.newest)
    }

    /// Every pid seen anywhere in the window
    pub fn all(&self) -> HashSet<Pid> {
        self.spans.keys().copied().collect()
    }

    /// Pids missing from the oldest snapshot, whether or not they died since
    pub fn appeared(&self) -> HashSet<Pid> {
        self.spans
            .keys()
            .copied()
            .filter(|&pid| self.is_new(pid))
            .collect()
    }

    /// Pids missing from the newest snapshot
    pub fn disappeared(&self) -> HashSet<Pid> {
        self.spans
            .keys()
            .copied()
            .filter(|&pid| self.is_dead(pid))
            .collect()
    }
}
