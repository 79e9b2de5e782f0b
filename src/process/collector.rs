use super::{Pid, ProcessDescriptor, ProcessEntry};
use crate::history::Snapshot;
use crate::prelude::*;
use crate::query::Query;
use std::collections::{HashMap, HashSet, VecDeque};

/// Collect `root` and every process descending from it.
///
/// Used to keep the monitor and whatever it spawned out of its own view. Must be recomputed on
/// every scan since children come and go between ticks.
pub fn related_pids(entries: &[ProcessEntry], root: Pid) -> HashSet<Pid> {
    let mut children: HashMap<Pid, Vec<Pid>> = HashMap::new();
    for entry in entries {
        if let Some(parent) = entry.parent {
            children.entry(parent).or_default().push(entry.pid);
        }
    }

    let mut related = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);
    while let Some(pid) = queue.pop_front() {
        for &child in children.get(&pid).into_iter().flatten() {
            // `insert` refuses pids already seen, which also stops on stale parent cycles
            if related.insert(child) {
                queue.push_back(child);
            }
        }
    }
    related
}

/// Build the snapshot of processes matching `query` out of one scan of the process table.
///
/// A process is kept when its pid is not excluded, it could be read, its name is not excluded,
/// and the query matches its name, one of its arguments, or its working directory. Processes that
/// could not be read are skipped without failing the scan.
pub fn collect(
    entries: Vec<ProcessEntry>,
    query: &Query,
    excluded_names: &HashSet<String>,
    excluded_pids: &HashSet<Pid>,
) -> Snapshot {
    entries
        .into_iter()
        .filter(|entry| !excluded_pids.contains(&entry.pid))
        .filter_map(|entry| match entry.descriptor {
            Ok(descriptor) => Some(descriptor),
            Err(err) => {
                trace!("Skipping pid {}: {err}", entry.pid);
                None
            }
        })
        .filter(|descriptor| !excluded_names.contains(&descriptor.name))
        .filter(|descriptor| matches(descriptor, query))
        .collect()
}

fn matches(descriptor: &ProcessDescriptor, query: &Query) -> bool {
    query.is_match(&descriptor.name)
        || descriptor.command_line.iter().any(|arg| query.is_match(arg))
        || query.is_match(&descriptor.working_directory)
}
