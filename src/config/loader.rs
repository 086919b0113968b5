// src/config/loader.rs

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::config::document::ConfigDocument;
use crate::diagnostics::Diagnostics;
use crate::errors::{GruntCfgError, Result};
use crate::fs::FileSystem;

/// Locations tried after any caller-supplied paths, relative to the working
/// directory.
pub const DEFAULT_CANDIDATES: [&str; 2] = [".grunt.json", ".grunt/config.json"];

/// A document together with the candidate it came from.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub document: ConfigDocument,
}

/// Effective candidate list: caller paths first, in order, then the defaults.
pub fn candidate_paths(user_paths: &[PathBuf]) -> Vec<PathBuf> {
    user_paths
        .iter()
        .cloned()
        .chain(DEFAULT_CANDIDATES.iter().map(PathBuf::from))
        .collect()
}

/// Read and parse a single candidate.
///
/// This only performs JSON parsing and tree conversion; it never looks at the
/// other candidates. Use [`load_first`] for the full search.
pub fn load_from_path(fs: &dyn FileSystem, path: &Path) -> anyhow::Result<ConfigDocument> {
    let contents = fs.read_to_string(path)?;
    let document = ConfigDocument::from_json_str(&contents)
        .with_context(|| format!("parsing {:?}", path))?;
    Ok(document)
}

/// Try every candidate in order and keep the first one that parses.
///
/// Candidates after the winner are reported as skipped and never read.
/// Failing candidates are reported and skipped. If nothing parses, the whole
/// load fails with [`GruntCfgError::ConfigLoad`].
pub fn load_first(
    fs: &dyn FileSystem,
    diagnostics: &dyn Diagnostics,
    candidates: &[PathBuf],
) -> Result<LoadedDocument> {
    diagnostics.title("Loading Grunt Configuration");

    let mut loaded: Option<LoadedDocument> = None;

    for path in candidates {
        if loaded.is_some() {
            diagnostics.line(&format!("Skipping {} (already resolved config)", path.display()));
            continue;
        }

        match load_from_path(fs, path) {
            Ok(document) => {
                diagnostics.success(&format!("Loaded configuration file: {}", path.display()));
                info!(path = ?path, "configuration loaded");
                loaded = Some(LoadedDocument {
                    path: path.clone(),
                    document,
                });
            }
            Err(err) => {
                debug!(path = ?path, error = %err, "candidate rejected");
                diagnostics.failure(
                    &format!("Could not load {}", path.display()),
                    Some(&format!("{err:#}")),
                );
            }
        }
    }

    match loaded {
        Some(doc) => {
            diagnostics.action("JSON configuration object initialized!");
            Ok(doc)
        }
        None => {
            let tried: Vec<String> = candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            diagnostics.failure(
                "Could not load any configuration files!",
                Some(&format!("Paths tried: {}", tried.join(", "))),
            );
            Err(GruntCfgError::ConfigLoad { tried })
        }
    }
}
