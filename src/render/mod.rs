//! Turns the history window into display rows, and rows into terminal output

pub mod presenter;
pub mod screen;

pub use crate::history::Status;
pub use presenter::Presenter;

use crate::history::HistoryWindow;
use crate::process::{Pid, ProcessDescriptor};

/// One line of the display: a pid, its latest known descriptor, and its lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRow<'a> {
    pub pid: Pid,
    pub descriptor: &'a ProcessDescriptor,
    pub status: Status,
}

/// Build one row per pid seen in the window.
///
/// Rows follow the window from the newest snapshot back to the oldest, keeping each snapshot's own
/// order, and a pid is only emitted at the newest snapshot it appears in. Live processes therefore
/// come first, followed by dead ones carrying their last known descriptor.
pub fn build_rows(window: &HistoryWindow) -> Vec<DisplayRow<'_>> {
    let changes = window.life_and_death();

    window
        .iter()
        .enumerate()
        .rev()
        .flat_map(|(index, snapshot)| snapshot.iter().map(move |descriptor| (index, descriptor)))
        .filter_map(|(index, descriptor)| {
            let span = changes.span(descriptor.pid)?;
            if span.last != index {
                return None;
            }
            Some(DisplayRow {
                pid: descriptor.pid,
                descriptor,
                status: changes.status_of(descriptor.pid)?,
            })
        })
        .collect()
}
