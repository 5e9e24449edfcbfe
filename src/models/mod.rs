use crate::error::VersionError;
use crate::utils::version::check_version;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum OutputStyle {
    /// Standard terminal output
    Terminal,
    /// JSON output for automation
    Json,
}

/// Discovery settings for a single component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentSpec {
    /// Executable names to look for among running processes
    pub bins: Vec<String>,

    /// Config file paths to look for on disk
    pub confs: Vec<String>,

    /// Config path to assume when none of `confs` exist
    pub default_conf: Option<String>,

    /// Whether the component may legitimately be absent
    pub optional: bool,
}

/// Client and server versions reported by kubectl, as "major.minor"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubeVersion {
    pub client: Option<String>,
    pub server: Option<String>,

    /// `kubectl version` output the versions were read from
    #[serde(skip)]
    pub raw: String,
}

impl KubeVersion {
    /// Check both client and server against `major.minor`
    pub fn check(&self, major: &str, minor: &str) -> Vec<VersionError> {
        ["Client", "Server"]
            .into_iter()
            .filter_map(|kind| check_version(kind, &self.raw, major, minor).err())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    pub timestamp: DateTime<Utc>,

    /// Config section the components were read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Component name to running binary
    pub binaries: BTreeMap<String, String>,

    /// Component name to config file
    pub configs: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kube_version: Option<KubeVersion>,

    /// Version check failures, empty when versions matched or were not checked
    pub version_problems: Vec<String>,
}

impl DiscoveryReport {
    pub fn new(
        target: Option<String>,
        binaries: BTreeMap<String, String>,
        configs: BTreeMap<String, String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            target,
            binaries,
            configs,
            kube_version: None,
            version_problems: Vec::new(),
        }
    }

    pub fn with_kube_version(mut self, version: KubeVersion) -> Self {
        self.kube_version = Some(version);
        self
    }

    pub fn with_version_problems(mut self, problems: Vec<String>) -> Self {
        self.version_problems = problems;
        self
    }

    /// Components that have a binary or a config entry, in name order
    pub fn component_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .binaries
            .keys()
            .chain(self.configs.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn is_healthy(&self) -> bool {
        self.version_problems.is_empty()
    }
}
