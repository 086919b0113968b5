// src/generate/expand.rs

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;

use crate::errors::{GruntCfgError, Result};
use crate::fs::FileSystem;

/// Expand grunt-style `src` patterns against the files under `root`.
///
/// Patterns are applied in order: a positive pattern appends its matches
/// (sorted, skipping files already selected), a `!`-prefixed pattern removes
/// matches selected so far. Patterns without glob metacharacters are taken
/// literally, whether or not the file exists, so explicit lists keep their
/// order. Every returned path is `root.join(relative)`.
pub fn expand_patterns<S: AsRef<str>>(
    fs: &dyn FileSystem,
    root: &Path,
    patterns: &[S],
) -> Result<Vec<PathBuf>> {
    let mut selected: Vec<String> = Vec::new();
    let mut tree: Option<Vec<String>> = None;

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let (negated, body) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        let body = body.trim_start_matches("./");

        if is_literal(body) {
            if negated {
                selected.retain(|rel| rel != body);
            } else if !selected.iter().any(|rel| rel == body) {
                selected.push(body.to_string());
            }
            continue;
        }

        let matcher = compile(body)?;
        if negated {
            selected.retain(|rel| !matcher.is_match(rel));
            continue;
        }

        if tree.is_none() {
            tree = Some(walk(fs, root)?);
        }
        for rel in tree.iter().flatten() {
            if matcher.is_match(rel) && !selected.contains(rel) {
                selected.push(rel.clone());
            }
        }
    }

    debug!(root = ?root, count = selected.len(), "expanded file patterns");
    Ok(selected.into_iter().map(|rel| root.join(rel)).collect())
}

fn is_literal(pattern: &str) -> bool {
    !pattern.contains(['*', '?', '[', '{'])
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| GruntCfgError::Pattern(format!("{pattern}: {e}")))?;
    Ok(glob.compile_matcher())
}

/// Every file under `root`, as sorted `/`-separated relative paths.
fn walk(fs: &dyn FileSystem, root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) {
                if let Ok(rel) = path.strip_prefix(root) {
                    files.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }
    }

    files.sort();
    Ok(files)
}
