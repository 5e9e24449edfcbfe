//! Locates the binaries and config files of cluster components running on a
//! host so benchmark checks can be pointed at the right files.

pub mod config;
pub mod discovery;
pub mod error;
pub mod models;
pub mod output;
pub mod substitution;
pub mod utils;

pub use config::ConfigTree;
pub use discovery::{FileProbe, HostFiles, HostProcesses, ProcessLister};
pub use error::{ConfigError, DiscoveryError, VersionError};
