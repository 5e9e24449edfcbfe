use super::FileProbe;
use crate::config::ConfigTree;
use crate::error::DiscoveryError;
use std::collections::BTreeMap;
use std::io;
use tracing::{debug, info};

/// Return the first candidate file that exists.
///
/// A candidate that doesn't exist is skipped; any other stat failure is
/// reported, since the file may be there but unreadable.
pub fn find_config_file(
    stat: &dyn FileProbe,
    candidates: &[String],
) -> Result<Option<String>, DiscoveryError> {
    for candidate in candidates {
        match stat.stat(candidate) {
            Ok(()) => return Ok(Some(candidate.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("config file '{}' not found", candidate);
            }
            Err(source) => {
                return Err(DiscoveryError::StatFailed {
                    path: candidate.clone(),
                    source,
                })
            }
        }
    }

    Ok(None)
}

/// Map each configured component to its config file.
///
/// Resolution order: first existing candidate, then `defaultconf`, then
/// the component name itself.
pub fn get_config_files(
    config: &ConfigTree,
    stat: &dyn FileProbe,
) -> Result<BTreeMap<String, String>, DiscoveryError> {
    let mut confmap = BTreeMap::new();

    for component in config.components() {
        let Some(spec) = config.component(&component) else {
            continue;
        };

        let conf = match find_config_file(stat, &spec.confs)? {
            Some(conf) => {
                info!("Component {} uses config file '{}'", component, conf);
                conf
            }
            None => match spec.default_conf {
                Some(default_conf) => {
                    debug!(
                        "Using default config file name '{}' for component {}",
                        default_conf, component
                    );
                    default_conf
                }
                None => {
                    debug!("Missing config file for {}", component);
                    component.clone()
                }
            },
        };

        confmap.insert(component, conf);
    }

    Ok(confmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Stat stand-in where only `existing` paths are present
    fn fake_stat(existing: &[&str]) -> impl Fn(&str) -> io::Result<()> {
        let existing: HashSet<String> = existing.iter().map(|s| s.to_string()).collect();
        move |path: &str| {
            if existing.contains(path) {
                Ok(())
            } else {
                Err(io::Error::from(io::ErrorKind::NotFound))
            }
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn map(items: &[(&str, &str)]) -> BTreeMap<String, String> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_find_config_file() {
        let cases = vec![
            (vec!["myfile"], vec!["myfile"], Some("myfile")),
            (vec!["thisfile", "thatfile"], vec!["thatfile"], Some("thatfile")),
            (vec!["thisfile", "thatfile"], vec![], None),
            (vec!["thisfile", "thatfile"], vec!["thisfile", "thatfile"], Some("thisfile")),
            (vec![], vec!["thisfile"], None),
        ];

        for (candidates, existing, expected) in cases {
            let found = find_config_file(&fake_stat(&existing), &strings(&candidates)).unwrap();
            assert_eq!(found.as_deref(), expected, "candidates {:?}", candidates);
        }
    }

    #[test]
    fn test_find_config_file_stat_error() {
        let stat = |path: &str| -> io::Result<()> {
            if path == "locked" {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            } else {
                Err(io::Error::from(io::ErrorKind::NotFound))
            }
        };

        let err = find_config_file(&stat, &strings(&["missing", "locked", "other"])).unwrap_err();
        match err {
            DiscoveryError::StatFailed { path, source } => {
                assert_eq!(path, "locked");
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_get_config_files() {
        let apiserver = "apiserver:\n  confs: [apiserver, kube-apiserver]\n";
        let thing = "thing:\n  confs: [/my/file/thing]\n";
        let thing_with_default =
            "thing:\n  confs: [/my/file/thing]\n  defaultconf: another/thing\n";

        let cases = vec![
            (
                format!("components: [apiserver]\n{}", apiserver),
                vec!["kube-apiserver"],
                map(&[("apiserver", "kube-apiserver")]),
            ),
            // "thing" isn't in the list of components
            (
                format!("components: [apiserver]\n{}{}", apiserver, thing),
                vec!["kube-apiserver", "/my/file/thing"],
                map(&[("apiserver", "kube-apiserver")]),
            ),
            // more than one component
            (
                format!("components: [apiserver, thing]\n{}{}", apiserver, thing),
                vec!["kube-apiserver", "/my/file/thing"],
                map(&[("apiserver", "kube-apiserver"), ("thing", "/my/file/thing")]),
            ),
            // falls back to the declared default
            (
                format!("components: [apiserver, thing]\n{}{}", apiserver, thing_with_default),
                vec!["kube-apiserver"],
                map(&[("apiserver", "kube-apiserver"), ("thing", "another/thing")]),
            ),
            // falls back to the component name
            (
                format!("components: [apiserver, thing]\n{}{}", apiserver, thing),
                vec!["kube-apiserver"],
                map(&[("apiserver", "kube-apiserver"), ("thing", "thing")]),
            ),
        ];

        for (yaml, existing, expected) in cases {
            let cfg = ConfigTree::from_yaml_str(&yaml).unwrap();
            let confs = get_config_files(&cfg, &fake_stat(&existing)).unwrap();
            assert_eq!(confs, expected, "config:\n{}", yaml);
        }
    }

    #[test]
    fn test_get_config_files_component_without_confs() {
        let cfg = ConfigTree::from_yaml_str(
            "components: [kubelet]\nkubelet:\n  defaultconf: /etc/kubernetes/kubelet.conf\n",
        )
        .unwrap();
        let confs = get_config_files(&cfg, &fake_stat(&[])).unwrap();
        assert_eq!(confs, map(&[("kubelet", "/etc/kubernetes/kubelet.conf")]));
    }

    #[test]
    fn test_get_config_files_propagates_stat_error() {
        let cfg = ConfigTree::from_yaml_str("components: [etcd]\netcd:\n  confs: [/etc/etcd]\n")
            .unwrap();
        let stat = |_: &str| -> io::Result<()> { Err(io::Error::from(io::ErrorKind::PermissionDenied)) };
        assert!(matches!(
            get_config_files(&cfg, &stat),
            Err(DiscoveryError::StatFailed { .. })
        ));
    }
}
