// src/tasks/aliases.rs

use std::collections::{BTreeMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::config::LookupError;
use crate::errors::{GruntCfgError, Result};
use crate::resolver::{Category, ConfigResolver, ResolvedValue};

/// Named task lists, e.g.
///
/// ```json
/// {
///   "tasks": {
///     "default": ["cleanup", "compile"],
///     "compile": ["copy", "compile-sty", "compile-scr"],
///     "compile-scr": ["concat:scr", "commonjs"]
///   }
/// }
/// ```
///
/// Names that are not aliases are leaf tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskAliases {
    aliases: BTreeMap<String, Vec<String>>,
}

impl TaskAliases {
    /// Build from the `tasks` category. A missing category means no aliases.
    pub fn from_resolver(resolver: &mut ConfigResolver) -> Result<Self> {
        let tasks = match resolver.category(Category::Tasks) {
            Ok(value) => value,
            Err(LookupError::MissingFragment { fragment, .. }) if fragment == "tasks" => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        let mut table = BTreeMap::new();
        if let ResolvedValue::Mapping(map) = tasks {
            for (name, value) in map {
                if let ResolvedValue::Sequence(members) = value {
                    table.insert(name, members);
                }
            }
        }

        Self::from_table(table)
    }

    /// Build from an explicit table, rejecting cycles.
    pub fn from_table(aliases: BTreeMap<String, Vec<String>>) -> Result<Self> {
        validate_acyclic(&aliases)?;
        Ok(Self { aliases })
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(|s| s.as_str())
    }

    /// Direct members of an alias.
    pub fn members_of(&self, name: &str) -> &[String] {
        self.aliases
            .get(name)
            .map(|m| m.as_slice())
            .unwrap_or(&[])
    }

    /// Ordered leaf tasks reached from `name`; each leaf appears once, at its
    /// first position. A non-alias expands to itself.
    pub fn expand(&self, name: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        self.expand_into(name, &mut out, &mut seen);
        debug!(alias = %name, tasks = ?out, "expanded task alias");
        out
    }

    fn expand_into(&self, name: &str, out: &mut Vec<String>, seen: &mut HashSet<String>) {
        match self.aliases.get(name) {
            Some(members) => {
                for member in members {
                    self.expand_into(member, out, seen);
                }
            }
            None => {
                if seen.insert(name.to_string()) {
                    out.push(name.to_string());
                }
            }
        }
    }
}

fn validate_acyclic(aliases: &BTreeMap<String, Vec<String>>) -> Result<()> {
    // Edge direction: alias -> member
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for (name, members) in aliases {
        graph.add_node(name.as_str());
        for member in members {
            graph.add_edge(name.as_str(), member.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(GruntCfgError::TaskGraph(format!(
            "cycle detected in task aliases involving '{}'",
            cycle.node_id()
        ))),
    }
}
