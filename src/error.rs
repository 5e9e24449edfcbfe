use std::io;
use thiserror::Error;

/// Errors raised while locating component binaries and config files
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("no candidates running")]
    NoCandidatesRunning,

    #[error("need {component} executable but none of the candidates are running")]
    MissingExecutable { component: String },

    #[error("error looking for file {path}: {source}")]
    StatFailed {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while loading the component configuration tree
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config section '{0}' not found")]
    MissingSection(String),

    #[error("config has no top-level components; pass --target with one of: {}", .sections.join(", "))]
    NoComponents { sections: Vec<String> },
}

/// Outcome of comparing a reported kubectl version against the expected one
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionError {
    #[error("Couldn't find {kind} version from kubectl output '{output}'")]
    NotFound { kind: String, output: String },

    #[error("Unexpected {kind} version {major}.{minor}")]
    Unexpected {
        kind: String,
        major: String,
        minor: String,
    },
}
