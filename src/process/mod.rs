//! Process descriptors and the process table they are read from

pub mod collector;
pub mod system;

pub use collector::{collect, related_pids};
pub use system::SystemProcessTable;

use std::fmt;

pub type Pid = u32;

/// What a process looked like at one poll tick.
///
/// Pids are only unique within a single scan: the OS reuses them, so two descriptors with the
/// same pid taken at different ticks may describe different processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDescriptor {
    pub pid: Pid,
    pub name: String,
    pub command_line: Vec<String>,
    pub working_directory: String,
}

/// Why a process could not be described during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    Zombie,
    /// The field vanished with the process or is not readable by us
    Unreadable(&'static str),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Zombie => write!(f, "zombie process"),
            ReadError::Unreadable(field) => write!(f, "{field} is not readable"),
        }
    }
}

/// One row of the process table.
///
/// The parent link is kept apart from the descriptor so that descendants can be tracked even for
/// processes whose details could not be read.
#[derive(Debug, Clone)]
pub struct ProcessEntry {
    pub pid: Pid,
    pub parent: Option<Pid>,
    pub descriptor: Result<ProcessDescriptor, ReadError>,
}

pub trait ProcessTable {
    /// Refresh the table and list every live process, ordered by pid
    fn list_processes(&mut self) -> Vec<ProcessEntry>;
}
