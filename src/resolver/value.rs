// src/resolver/value.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{ConfigNode, LookupError};

/// Top-level namespace every accessor key lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Paths,
    Files,
    Options,
    Tasks,
    Templates,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Paths,
        Category::Files,
        Category::Options,
        Category::Tasks,
        Category::Templates,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Paths => "paths",
            Category::Files => "files",
            Category::Options => "options",
            Category::Tasks => "tasks",
            Category::Templates => "templates",
        }
    }

    /// `paths` + `to.scr` -> `paths.to.scr`.
    pub fn full_key(self, key: &str) -> String {
        format!("{}.{}", self.as_str(), key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paths" | "path" => Ok(Category::Paths),
            "files" | "file" => Ok(Category::Files),
            "options" | "option" => Ok(Category::Options),
            "tasks" | "task" => Ok(Category::Tasks),
            "templates" | "template" => Ok(Category::Templates),
            other => Err(format!(
                "unknown category: {other} (expected paths, files, options, tasks or templates)"
            )),
        }
    }
}

/// Optional text glued around every resolved string.
///
/// Part of the memoization key: the same lookup with a different decoration
/// is cached separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Decoration {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl Decoration {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            suffix: None,
        }
    }

    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self {
            prefix: None,
            suffix: Some(suffix.into()),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none()
    }

    fn apply(&self, value: &str) -> String {
        let prefix = self.prefix.as_deref().unwrap_or_default();
        let suffix = self.suffix.as_deref().unwrap_or_default();
        format!("{prefix}{value}{suffix}")
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.prefix, &self.suffix) {
            (None, None) => f.write_str("no options"),
            (Some(p), None) => write!(f, "pre={p:?}"),
            (None, Some(s)) => write!(f, "post={s:?}"),
            (Some(p), Some(s)) => write!(f, "pre={p:?}, post={s:?}"),
        }
    }
}

/// A fully substituted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    Scalar(String),
    Sequence(Vec<String>),
    Mapping(BTreeMap<String, ResolvedValue>),
}

impl ResolvedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ResolvedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Flatten one level: a scalar becomes a one-element list.
    ///
    /// `key` is only used for the error when the value is a mapping.
    pub fn into_list(self, key: &str) -> Result<Vec<String>, LookupError> {
        match self {
            ResolvedValue::Scalar(s) => Ok(vec![s]),
            ResolvedValue::Sequence(items) => Ok(items),
            ResolvedValue::Mapping(_) => Err(LookupError::UnexpectedMapping {
                key: key.to_string(),
            }),
        }
    }

    /// Apply `decoration` to every string, recursively.
    pub fn decorate(self, decoration: &Decoration) -> Self {
        if decoration.is_empty() {
            return self;
        }
        match self {
            ResolvedValue::Scalar(s) => ResolvedValue::Scalar(decoration.apply(&s)),
            ResolvedValue::Sequence(items) => {
                ResolvedValue::Sequence(items.iter().map(|s| decoration.apply(s)).collect())
            }
            ResolvedValue::Mapping(map) => ResolvedValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, v.decorate(decoration)))
                    .collect(),
            ),
        }
    }

    /// Collect the values of every entry named `name`, depth-first in key
    /// order. Matching entries are not searched further.
    ///
    /// Given `{"a": {"img": "a/img/"}, "b": {"img": ["b/1/", "b/2/"]}}`,
    /// `find_inner("img")` yields `["a/img/", "b/1/", "b/2/"]`.
    pub fn find_inner(&self, name: &str) -> Vec<String> {
        let mut found = Vec::new();
        if let ResolvedValue::Mapping(map) = self {
            for (key, value) in map {
                if key == name {
                    match value {
                        ResolvedValue::Scalar(s) => found.push(s.clone()),
                        ResolvedValue::Sequence(items) => found.extend(items.iter().cloned()),
                        ResolvedValue::Mapping(_) => {}
                    }
                } else {
                    found.extend(value.find_inner(name));
                }
            }
        }
        found
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Scalar(s) => f.write_str(s),
            ResolvedValue::Sequence(items) => f.write_str(&items.join(",")),
            ResolvedValue::Mapping(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&ConfigNode> for ResolvedValue {
    /// Raw copy, placeholders untouched.
    fn from(node: &ConfigNode) -> Self {
        match node {
            ConfigNode::Scalar(s) => ResolvedValue::Scalar(s.clone()),
            ConfigNode::Sequence(items) => ResolvedValue::Sequence(items.clone()),
            ConfigNode::Mapping(map) => ResolvedValue::Mapping(
                map.iter().map(|(k, v)| (k.clone(), v.into())).collect(),
            ),
        }
    }
}
