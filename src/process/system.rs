use super::{ProcessDescriptor, ProcessEntry, ProcessTable, ReadError};
use sysinfo::{Process, ProcessRefreshKind, ProcessStatus, RefreshKind, System, UpdateKind};

/// Process table backed by `sysinfo`.
///
/// Every scan reads a fresh `System`: sysinfo does not re-read the name of a pid it already knows,
/// so a cached one would keep reporting a process under its name from before `exec`.
pub struct SystemProcessTable {
    refresh_kind: ProcessRefreshKind,
}

impl SystemProcessTable {
    pub fn new() -> Self {
        Self {
            refresh_kind: ProcessRefreshKind::nothing()
                .with_cmd(UpdateKind::Always)
                .with_cwd(UpdateKind::Always),
        }
    }
}

impl Default for SystemProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for SystemProcessTable {
    fn list_processes(&mut self) -> Vec<ProcessEntry> {
        let system =
            System::new_with_specifics(RefreshKind::nothing().with_processes(self.refresh_kind));

        let mut entries: Vec<ProcessEntry> = system
            .processes()
            .values()
            // Threads show up as tasks on Linux, they are not processes of their own
            .filter(|process| process.thread_kind().is_none())
            .map(|process| ProcessEntry {
                pid: process.pid().as_u32(),
                parent: process.parent().map(|ppid| ppid.as_u32()),
                descriptor: describe(process),
            })
            .collect();
        entries.sort_by_key(|entry| entry.pid);
        entries
    }
}

fn describe(process: &Process) -> Result<ProcessDescriptor, ReadError> {
    if process.status() == ProcessStatus::Zombie {
        return Err(ReadError::Zombie);
    }

    // An unreadable cwd means either the process is gone or it belongs to someone else
    let working_directory = process
        .cwd()
        .ok_or(ReadError::Unreadable("cwd"))?
        .to_string_lossy()
        .into_owned();

    Ok(ProcessDescriptor {
        pid: process.pid().as_u32(),
        name: process.name().to_string_lossy().into_owned(),
        command_line: process
            .cmd()
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect(),
        working_directory,
    })
}
