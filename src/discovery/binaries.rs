use super::ProcessLister;
use crate::config::ConfigTree;
use crate::error::DiscoveryError;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Check that `bin` is running.
///
/// `bin` may be quoted and may hold several words ("hyperkube apiserver").
/// Processes are looked up by the first word, then some line of the listing
/// must start with the whole of `bin`, optionally behind a path:
/// `/usr/bin/kubelet` matches `kubelet` but `kube-apiserver` does not match
/// `apiserver`.
pub fn verify_bin(ps: &dyn ProcessLister, bin: &str) -> bool {
    let bin = bin.trim_matches(|c: char| c == '\'' || c == '"');
    let Some(proc_name) = bin.split_whitespace().next() else {
        return false;
    };

    let out = ps.list(proc_name);

    let re_first_word = match Regex::new(&format!(r"^(\S*/)*{}", regex::escape(bin))) {
        Ok(re) => re,
        Err(e) => {
            debug!("Invalid binary pattern '{}': {}", bin, e);
            return false;
        }
    };

    out.lines().any(|line| re_first_word.is_match(line))
}

/// Return the first candidate executable that is running
pub fn find_executable(
    ps: &dyn ProcessLister,
    candidates: &[String],
) -> Result<String, DiscoveryError> {
    for candidate in candidates {
        if verify_bin(ps, candidate) {
            return Ok(candidate.clone());
        }
        debug!("executable '{}' not running", candidate);
    }

    Err(DiscoveryError::NoCandidatesRunning)
}

/// Map each configured component to the binary it runs as.
///
/// Components without a definition or without `bins` are skipped. An
/// optional component that isn't running maps to its own name so that
/// substitutions still produce something readable.
pub fn get_binaries(
    config: &ConfigTree,
    ps: &dyn ProcessLister,
) -> Result<BTreeMap<String, String>, DiscoveryError> {
    let mut binmap = BTreeMap::new();

    for component in config.components() {
        let Some(spec) = config.component(&component) else {
            debug!("Component {} has no definition", component);
            continue;
        };
        if spec.bins.is_empty() {
            continue;
        }

        let bin = match find_executable(ps, &spec.bins) {
            Ok(bin) => {
                info!("Component {} uses running binary {}", component, bin);
                bin
            }
            Err(_) if spec.optional => {
                debug!("Component {} not running", component);
                component.clone()
            }
            Err(_) => return Err(DiscoveryError::MissingExecutable { component }),
        };

        binmap.insert(component, bin);
    }

    Ok(binmap)
}
