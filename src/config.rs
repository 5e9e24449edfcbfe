/// Hierarchical key/value configuration describing the components to discover
use crate::error::ConfigError;
use crate::models::ComponentSpec;
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

/// A YAML tree read with loose, lookup-style accessors.
///
/// Missing keys never fail: they read as empty lists, `false` or `None`,
/// which is what the discovery code expects from a partially filled config.
#[derive(Debug, Clone, Default)]
pub struct ConfigTree {
    root: Value,
}

impl ConfigTree {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_yaml::from_str(text)?;
        Ok(Self { root })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_yaml_str(&text)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        match &self.root {
            Value::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Subtree under `key`, if it exists and is itself a mapping
    pub fn sub(&self, key: &str) -> Option<ConfigTree> {
        match self.get(key)? {
            v @ Value::Mapping(_) => Some(ConfigTree { root: v.clone() }),
            _ => None,
        }
    }

    /// Like [`sub`](Self::sub) but a missing section is an error
    pub fn section(&self, key: &str) -> Result<ConfigTree, ConfigError> {
        self.sub(key)
            .ok_or_else(|| ConfigError::MissingSection(key.to_string()))
    }

    pub fn is_set(&self, key: &str) -> bool {
        !matches!(self.get(key), None | Some(Value::Null))
    }

    /// A sequence of scalars, or a single whitespace-separated string
    pub fn get_string_slice(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(Value::String(s)) => s.split_whitespace().map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_to_string)
    }

    /// Booleans, non-zero numbers, and the strings `1`, `t`, `T`, `true`,
    /// `True` and `TRUE` read as true
    pub fn get_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => matches!(s.as_str(), "1" | "t" | "T" | "true" | "True" | "TRUE"),
            _ => false,
        }
    }

    /// Top-level keys whose values are subtrees
    pub fn sections(&self) -> Vec<String> {
        match &self.root {
            Value::Mapping(map) => map
                .iter()
                .filter(|(_, v)| v.is_mapping())
                .filter_map(|(k, _)| k.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The tree holding `components`: the `target` section if given, else
    /// this tree, which must then list components itself
    pub fn component_root(&self, target: Option<&str>) -> Result<ConfigTree, ConfigError> {
        if let Some(target) = target {
            return self.section(target);
        }
        if self.is_set("components") {
            return Ok(self.clone());
        }
        Err(ConfigError::NoComponents {
            sections: self.sections(),
        })
    }

    /// Component names listed under `components`
    pub fn components(&self) -> Vec<String> {
        self.get_string_slice("components")
    }

    /// Typed view of one component's subtree
    pub fn component(&self, name: &str) -> Option<ComponentSpec> {
        let sub = self.sub(name)?;
        Some(ComponentSpec {
            bins: sub.get_string_slice("bins"),
            confs: sub.get_string_slice("confs"),
            default_conf: if sub.is_set("defaultconf") {
                sub.get_string("defaultconf")
            } else {
                None
            },
            optional: sub.get_bool("optional"),
        })
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
