// src/config/document.rs

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// A node of the loaded configuration tree.
///
/// ```json
/// {
///   "paths": { "to": { "scr": "build/js/" } },
///   "files": { "in": { "scr": ["${paths.in.scr}a.js", "${paths.in.scr}b.js"] } }
/// }
/// ```
///
/// Numbers and booleans are kept as their JSON text so that every leaf is a
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
    Scalar(String),
    Sequence(Vec<String>),
    Mapping(BTreeMap<String, ConfigNode>),
}

impl ConfigNode {
    fn kind(&self) -> &'static str {
        match self {
            ConfigNode::Scalar(_) => "scalar",
            ConfigNode::Sequence(_) => "sequence",
            ConfigNode::Mapping(_) => "mapping",
        }
    }
}

/// Errors raised while walking a dotted key through the document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Resolution error for index ({key}) at fragment {fragment}")]
    MissingFragment { key: String, fragment: String },

    #[error("Resolution error for index ({key}) at fragment {fragment}: expected mapping, found {found}")]
    NotAMapping {
        key: String,
        fragment: String,
        found: &'static str,
    },

    #[error("Value at index ({key}) is a mapping where a string or list was expected")]
    UnexpectedMapping { key: String },
}

impl LookupError {
    /// The key fragment that could not be resolved, if any.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            LookupError::MissingFragment { fragment, .. }
            | LookupError::NotAMapping { fragment, .. } => Some(fragment),
            LookupError::UnexpectedMapping { .. } => None,
        }
    }
}

/// Why a JSON text could not become a [`ConfigDocument`].
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top-level value must be an object")]
    NotAnObject,

    #[error("unsupported value at {path}: {reason}")]
    Unsupported { path: String, reason: &'static str },
}

/// The immutable configuration tree owned by a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    root: BTreeMap<String, ConfigNode>,
}

impl ConfigDocument {
    /// Parse JSON text into a document.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Convert an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Object(map) => match convert(Value::Object(map), "")? {
                Some(ConfigNode::Mapping(root)) => Ok(Self { root }),
                _ => Err(DocumentError::NotAnObject),
            },
            _ => Err(DocumentError::NotAnObject),
        }
    }

    /// Walk `key` one `.`-separated fragment at a time.
    ///
    /// Empty scalars count as absent.
    pub fn walk(&self, key: &str) -> Result<&ConfigNode, LookupError> {
        let mut fragments = key.split('.');
        let first = fragments.next().unwrap_or_default();

        let mut node = self.root.get(first).ok_or_else(|| missing(key, first))?;
        check_present(node, key, first)?;

        for fragment in fragments {
            node = match node {
                ConfigNode::Mapping(map) => {
                    map.get(fragment).ok_or_else(|| missing(key, fragment))?
                }
                other => {
                    return Err(LookupError::NotAMapping {
                        key: key.to_string(),
                        fragment: fragment.to_string(),
                        found: other.kind(),
                    });
                }
            };
            check_present(node, key, fragment)?;
        }

        Ok(node)
    }
}

fn missing(key: &str, fragment: &str) -> LookupError {
    LookupError::MissingFragment {
        key: key.to_string(),
        fragment: fragment.to_string(),
    }
}

fn check_present(node: &ConfigNode, key: &str, fragment: &str) -> Result<(), LookupError> {
    match node {
        ConfigNode::Scalar(s) if s.is_empty() => Err(missing(key, fragment)),
        _ => Ok(()),
    }
}

/// `None` means "drop this entry" (JSON `null`).
fn convert(value: Value, path: &str) -> Result<Option<ConfigNode>, DocumentError> {
    let node = match value {
        Value::Null => return Ok(None),
        Value::Object(map) => {
            let mut out = BTreeMap::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                if let Some(node) = convert(v, &child_path)? {
                    out.insert(k, node);
                }
            }
            ConfigNode::Mapping(out)
        }
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                match scalar_text(item) {
                    Some(s) => out.push(s),
                    None => {
                        return Err(DocumentError::Unsupported {
                            path: format!("{path}[{i}]"),
                            reason: "lists may only contain strings, numbers or booleans",
                        });
                    }
                }
            }
            ConfigNode::Sequence(out)
        }
        scalar => match scalar_text(scalar) {
            Some(s) => ConfigNode::Scalar(s),
            None => {
                return Err(DocumentError::Unsupported {
                    path: path.to_string(),
                    reason: "not a scalar",
                });
            }
        },
    };
    Ok(Some(node))
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> ConfigDocument {
        ConfigDocument::from_json_str(
            r#"{
                "paths": { "to": { "scr": "build/js/" }, "empty": "" },
                "files": { "a": ["x.js", "y.js"] },
                "options": { "precision": 9, "map": true, "unset": null }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn walks_nested_mappings() {
        let d = doc();
        assert_eq!(
            d.walk("paths.to.scr").unwrap(),
            &ConfigNode::Scalar("build/js/".into())
        );
        assert_eq!(
            d.walk("files.a").unwrap(),
            &ConfigNode::Sequence(vec!["x.js".into(), "y.js".into()])
        );
        assert!(matches!(d.walk("paths.to").unwrap(), ConfigNode::Mapping(_)));
    }

    #[test]
    fn numbers_and_bools_become_text() {
        let d = doc();
        assert_eq!(d.walk("options.precision").unwrap(), &ConfigNode::Scalar("9".into()));
        assert_eq!(d.walk("options.map").unwrap(), &ConfigNode::Scalar("true".into()));
    }

    #[test]
    fn missing_fragment_is_reported() {
        let err = doc().walk("paths.nonexistent.deep").unwrap_err();
        assert_eq!(err.fragment(), Some("nonexistent"));
        assert!(err.to_string().contains("paths.nonexistent.deep"));
    }

    #[test]
    fn null_and_empty_values_count_as_missing() {
        let d = doc();
        assert_eq!(d.walk("options.unset").unwrap_err().fragment(), Some("unset"));
        assert_eq!(d.walk("paths.empty").unwrap_err().fragment(), Some("empty"));
    }

    #[test]
    fn descending_into_a_leaf_is_a_typed_error() {
        let err = doc().walk("paths.to.scr.deeper").unwrap_err();
        assert_eq!(
            err,
            LookupError::NotAMapping {
                key: "paths.to.scr.deeper".into(),
                fragment: "deeper".into(),
                found: "scalar",
            }
        );
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(matches!(
            ConfigDocument::from_json_str("[1, 2]"),
            Err(DocumentError::NotAnObject)
        ));
        assert!(matches!(
            ConfigDocument::from_json_str("{ not json"),
            Err(DocumentError::Json(_))
        ));
        assert!(matches!(
            ConfigDocument::from_json_str(r#"{"files": {"a": [{"x": 1}]}}"#),
            Err(DocumentError::Unsupported { .. })
        ));
    }
}
