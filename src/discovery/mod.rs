/// Host discovery of component binaries, config files and cluster version
pub mod binaries;
pub mod config_files;
pub mod kube_version;

pub use binaries::{find_executable, get_binaries, verify_bin};
pub use config_files::{find_config_file, get_config_files};
pub use kube_version::get_kube_version;

use crate::utils::execute_command;
use procfs::process::all_processes;
use std::io;
use tracing::debug;

/// Longest command name the kernel keeps in /proc/<pid>/stat
const TASK_COMM_LEN: usize = 15;

/// Source of process listings.
///
/// `list` returns one line per process whose command name is `name`, each
/// line being that process's full command line.
pub trait ProcessLister {
    fn list(&self, name: &str) -> String;
}

impl<F> ProcessLister for F
where
    F: Fn(&str) -> String,
{
    fn list(&self, name: &str) -> String {
        self(name)
    }
}

/// Existence check for candidate files
pub trait FileProbe {
    fn stat(&self, path: &str) -> io::Result<()>;
}

impl<F> FileProbe for F
where
    F: Fn(&str) -> io::Result<()>,
{
    fn stat(&self, path: &str) -> io::Result<()> {
        self(path)
    }
}

/// Lists processes from /proc, falling back to `ps` when /proc is unreadable
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProcesses;

impl HostProcesses {
    fn list_procfs(&self, name: &str) -> procfs::ProcResult<String> {
        let mut lines = Vec::new();

        for process in all_processes()?.flatten() {
            let Ok(stat) = process.stat() else {
                continue;
            };
            if !comm_matches(&stat.comm, name) {
                continue;
            }
            match process.cmdline() {
                Ok(args) if !args.is_empty() => lines.push(args.join(" ")),
                // Kernel threads have no command line
                _ => lines.push(format!("[{}]", stat.comm)),
            }
        }

        Ok(lines.join("\n"))
    }

    fn list_ps(&self, name: &str) -> String {
        // ps exits non-zero when nothing matches
        execute_command("ps", &["-C", name, "-o", "cmd", "--no-headers"]).unwrap_or_default()
    }
}

impl ProcessLister for HostProcesses {
    fn list(&self, name: &str) -> String {
        match self.list_procfs(name) {
            Ok(out) => out,
            Err(e) => {
                debug!("Failed to read processes from /proc: {}, trying ps", e);
                self.list_ps(name)
            }
        }
    }
}

/// Stats files on the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFiles;

impl FileProbe for HostFiles {
    fn stat(&self, path: &str) -> io::Result<()> {
        std::fs::metadata(path).map(|_| ())
    }
}

/// Compare a /proc command name with a requested name, allowing for the
/// kernel truncating long names
fn comm_matches(comm: &str, name: &str) -> bool {
    if comm == name {
        return true;
    }
    name.len() > TASK_COMM_LEN && name.is_char_boundary(TASK_COMM_LEN) && comm == &name[..TASK_COMM_LEN]
}
