//! Values files → [`ValueNode`].
//!
//! Everything YAML can express that the value tree cannot is normalized here,
//! so inference only ever sees the seven plain variants:
//! - non-string keys become strings;
//! - tagged values (`!!binary`, custom tags) lose their tag;
//! - merge keys (`<<: *anchor`) are applied.
use std::fs;
use std::path::Path;

use ordered_float::OrderedFloat;
use serde_yaml::Value as Yaml;
use tracing::debug;

use crate::error::{Error, Result};
use crate::value::{Object, ValueNode};

/// Read and normalize a YAML or JSON values file.
pub fn load_values(path: &Path) -> Result<ValueNode> {
    let source = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = parse_values(&source).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), depth = value.depth(), "loaded values");
    Ok(value)
}

/// An empty document is an empty values map, not null.
///
/// Documents nested past the parser's recursion limit (128 levels) fail
/// here, before any `max_depth` check.
pub fn parse_values(source: &str) -> std::result::Result<ValueNode, serde_yaml::Error> {
    if source.trim().is_empty() {
        return Ok(ValueNode::Object(Object::new()));
    }
    let mut raw: Yaml = serde_yaml::from_str(source)?;
    raw.apply_merge()?;
    Ok(match from_yaml(raw) {
        ValueNode::Null => ValueNode::Object(Object::new()),
        value => value,
    })
}

pub fn from_yaml(v: Yaml) -> ValueNode {
    match v {
        Yaml::Null => ValueNode::Null,
        Yaml::Bool(b) => ValueNode::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                ValueNode::Integer(i as i128)
            } else if let Some(u) = n.as_u64() {
                ValueNode::Integer(u as i128)
            } else if let Some(f) = n.as_f64() {
                ValueNode::Float(OrderedFloat(f))
            } else {
                ValueNode::String(n.to_string())
            }
        }
        Yaml::String(s) => ValueNode::String(s),
        Yaml::Sequence(xs) => ValueNode::Array(xs.into_iter().map(from_yaml).collect()),
        Yaml::Mapping(m) => ValueNode::Object(
            m.into_iter().map(|(k, v)| (key_string(k), from_yaml(v))).collect()
        ),
        Yaml::Tagged(tagged) => from_yaml(tagged.value),
    }
}

/// Render a mapping key as a string. Scalars use their plain spelling;
/// composite keys fall back to compact JSON.
fn key_string(k: Yaml) -> String {
    match k {
        Yaml::String(s) => s,
        Yaml::Null => "null".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Tagged(tagged) => key_string(tagged.value),
        composite @ (Yaml::Sequence(_) | Yaml::Mapping(_)) => {
            let node = from_yaml(composite);
            serde_json::to_string(&node).unwrap_or_else(|_| format!("{node:?}"))
        }
    }
}
