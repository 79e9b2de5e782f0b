//! The polling loop: scan, push into the window, render

use crate::history::{HistoryWindow, window_capacity};
use crate::prelude::*;
use crate::process::{Pid, ProcessTable, collect, related_pids};
use crate::query::Query;
use crate::render::{DisplayRow, Presenter, build_rows, screen};
use console::Term;
use std::collections::HashSet;
use std::time::Duration;

/// Everything the monitor needs to know, once command line and config file are merged
#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub query: Query,
    pub interval: Duration,
    pub highlight: Duration,
    /// Process names to ignore, compared exactly
    pub excluded_names: Vec<String>,
}

pub struct Monitor<T> {
    table: T,
    query: Query,
    excluded_names: HashSet<String>,
    title: String,
    window: HistoryWindow,
    own_pid: Pid,
    colors: bool,
}

impl<T: ProcessTable> Monitor<T> {
    pub fn new(table: T, settings: WatchSettings, colors: bool) -> Self {
        let capacity = window_capacity(settings.highlight, settings.interval);
        debug!("History window holds {capacity} snapshots");
        Self {
            table,
            title: screen::title_line(&settings.query, &settings.excluded_names),
            query: settings.query,
            excluded_names: settings.excluded_names.into_iter().collect(),
            window: HistoryWindow::new(capacity),
            own_pid: std::process::id(),
            colors,
        }
    }

    /// Hide the tree rooted at `pid` instead of the current process
    pub fn with_own_pid(mut self, pid: Pid) -> Self {
        self.own_pid = pid;
        self
    }

    /// Scan the process table once and push the result into the window
    pub fn scan(&mut self) {
        let entries = self.table.list_processes();
        let excluded_pids = related_pids(&entries, self.own_pid);
        let scanned = entries.len();
        let snapshot = collect(entries, &self.query, &self.excluded_names, &excluded_pids);
        trace!(
            "Scanned {scanned} processes, {} matching, {} excluded as our own",
            snapshot.len(),
            excluded_pids.len()
        );
        self.window.push(snapshot);
    }

    pub fn rows(&self) -> Vec<DisplayRow<'_>> {
        build_rows(&self.window)
    }

    pub fn frame(&self) -> String {
        let presenter = Presenter::new(&self.query, self.colors);
        let lines: Vec<String> = self
            .rows()
            .iter()
            .map(|row| presenter.format_row(row))
            .collect();
        screen::compose_frame(&self.title, &lines)
    }

    /// One poll tick: scan, then render the whole frame
    pub fn tick(&mut self) -> String {
        self.scan();
        self.frame()
    }

    pub fn window(&self) -> &HistoryWindow {
        &self.window
    }
}

/// Repaint `term` every `interval` until interrupted with Ctrl-C
pub async fn watch<T: ProcessTable>(
    mut monitor: Monitor<T>,
    interval: Duration,
    term: &Term,
) -> Result<()> {
    // Pinned once so a Ctrl-C arriving mid-scan is still seen at the next await
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        let frame = monitor.tick();
        screen::repaint(term, &frame)?;

        tokio::select! {
            res = &mut interrupted => {
                res.context("Failed to listen for Ctrl-C")?;
                debug!("Interrupted, stopping");
                return Ok(());
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
