use nix::unistd::{geteuid, Uid};
use tracing::warn;

/// Whether the process runs with an effective uid of root
pub fn is_root() -> bool {
    geteuid() == Uid::from_raw(0)
}

/// Component config files are usually readable by root only; a non-root
/// run fails when it can't stat one
pub fn warn_if_unprivileged() {
    if !is_root() {
        warn!("Not running as root, discovery fails on config files that only root can read");
    }
}
