use crate::process::{Pid, ProcessDescriptor};
use std::collections::HashSet;

/// The matching processes seen at one poll tick, in scan order.
///
/// No two descriptors share a pid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    descriptors: Vec<ProcessDescriptor>,
    pids: HashSet<Pid>,
}

impl Snapshot {
    /// Build a snapshot, keeping the first descriptor of any duplicated pid
    pub fn new(descriptors: impl IntoIterator<Item = ProcessDescriptor>) -> Self {
        let mut pids = HashSet::new();
        let descriptors = descriptors
            .into_iter()
            .filter(|descriptor| pids.insert(descriptor.pid))
            .collect();
        Self { descriptors, pids }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.pids.contains(&pid)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessDescriptor> {
        self.descriptors.iter()
    }

    pub fn pids(&self) -> &HashSet<Pid> {
        &self.pids
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl FromIterator<ProcessDescriptor> for Snapshot {
    fn from_iter<I: IntoIterator<Item = ProcessDescriptor>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ProcessDescriptor;
    type IntoIter = std::slice::Iter<'a, ProcessDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::tests::descriptor;

    #[test]
    fn test_duplicate_pids_keep_the_first_descriptor() {
        let mut late = descriptor(7);
        late.name = "late".to_string();
        let snapshot = Snapshot::new([descriptor(7), descriptor(8), late]);

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains(7));
        assert!(snapshot.contains(8));
        assert_eq!(snapshot.iter().next().unwrap().name, "proc7");
    }

    #[test]
    fn test_scan_order_is_kept() {
        let snapshot: Snapshot = [3, 1, 2].into_iter().map(descriptor).collect();
        let order: Vec<Pid> = snapshot.iter().map(|d| d.pid).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
