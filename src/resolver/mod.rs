// src/resolver/mod.rs

//! Typed lookups against the loaded configuration document.
//!
//! A [`ConfigResolver`] owns exactly one [`ConfigDocument`] and a memo cache.
//! Every accessor goes through the same pipeline:
//!
//! 1. build the full key (`files` + `in.scr` -> `files.in.scr`),
//! 2. return the cached value for `(full key, decoration)` if present,
//! 3. walk the document,
//! 4. expand `${...}` placeholders (see [`substitute`]),
//! 5. apply the decoration and cache the result.
//!
//! The resolver is built once by the caller and passed around explicitly.

pub mod cache;
pub mod substitute;
pub mod value;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{load_first, candidate_paths, ConfigDocument, LookupError};
use crate::diagnostics::Diagnostics;
use crate::errors::Result;
use crate::fs::FileSystem;

pub use cache::{CacheKey, CacheStats, ValueCache};
pub use substitute::{MAX_PLACEHOLDER_DEPTH, MAX_SUBSTITUTION_ROUNDS};
pub use value::{Category, Decoration, ResolvedValue};

use substitute::{Expanded, ResolutionStack};

pub struct ConfigResolver {
    document: ConfigDocument,
    source: Option<PathBuf>,
    cache: ValueCache,
    diagnostics: Box<dyn Diagnostics>,
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("source", &self.source)
            .field("cache", &self.cache.stats())
            .finish_non_exhaustive()
    }
}

impl ConfigResolver {
    /// Load the first usable candidate and build a resolver around it.
    ///
    /// `user_paths` are tried before [`crate::config::DEFAULT_CANDIDATES`].
    /// Fails with [`crate::errors::GruntCfgError::ConfigLoad`] when nothing
    /// parses.
    pub fn create(
        diagnostics: impl Diagnostics + 'static,
        fs: &dyn FileSystem,
        user_paths: Option<&[PathBuf]>,
    ) -> Result<Self> {
        diagnostics.title("Initializing Configuration Manager");
        let candidates = candidate_paths(user_paths.unwrap_or_default());
        let loaded = load_first(fs, &diagnostics, &candidates)?;

        let mut resolver = Self::from_document(loaded.document, diagnostics);
        resolver.source = Some(loaded.path);
        Ok(resolver)
    }

    /// Wrap an already loaded document.
    pub fn from_document(document: ConfigDocument, diagnostics: impl Diagnostics + 'static) -> Self {
        Self {
            document,
            source: None,
            cache: ValueCache::new(),
            diagnostics: Box::new(diagnostics),
        }
    }

    /// The candidate file the document was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn get_path(
        &mut self,
        key: &str,
        decoration: Option<&Decoration>,
    ) -> std::result::Result<ResolvedValue, LookupError> {
        self.lookup(Some(Category::Paths), key, decoration)
    }

    pub fn get_files(
        &mut self,
        key: &str,
        decoration: Option<&Decoration>,
    ) -> std::result::Result<ResolvedValue, LookupError> {
        self.lookup(Some(Category::Files), key, decoration)
    }

    pub fn get_option(
        &mut self,
        key: &str,
        decoration: Option<&Decoration>,
    ) -> std::result::Result<ResolvedValue, LookupError> {
        self.lookup(Some(Category::Options), key, decoration)
    }

    pub fn get_task(
        &mut self,
        key: &str,
        decoration: Option<&Decoration>,
    ) -> std::result::Result<ResolvedValue, LookupError> {
        self.lookup(Some(Category::Tasks), key, decoration)
    }

    pub fn get_template(
        &mut self,
        key: &str,
        decoration: Option<&Decoration>,
    ) -> std::result::Result<ResolvedValue, LookupError> {
        self.lookup(Some(Category::Templates), key, decoration)
    }

    /// `get_files` for each key, concatenated in order.
    pub fn get_files_merged<I, S>(&mut self, keys: I) -> std::result::Result<Vec<String>, LookupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.merged(Category::Files, keys)
    }

    /// `get_path` for each key, concatenated in order.
    pub fn get_paths_merged<I, S>(&mut self, keys: I) -> std::result::Result<Vec<String>, LookupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.merged(Category::Paths, keys)
    }

    /// Resolve a whole category as a mapping.
    pub fn category(&mut self, category: Category) -> std::result::Result<ResolvedValue, LookupError> {
        self.lookup(None, category.as_str(), None)
    }

    fn merged<I, S>(&mut self, category: Category, keys: I) -> std::result::Result<Vec<String>, LookupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for key in keys {
            let key = key.as_ref();
            let value = self.lookup(Some(category), key, None)?;
            out.extend(value.into_list(&category.full_key(key))?);
        }
        Ok(out)
    }

    /// Generic lookup. With `category = None` the key is used as-is, which is
    /// also how placeholders are resolved.
    pub fn lookup(
        &mut self,
        category: Option<Category>,
        key: &str,
        decoration: Option<&Decoration>,
    ) -> std::result::Result<ResolvedValue, LookupError> {
        let full_key = match category {
            Some(category) => category.full_key(key),
            None => key.to_string(),
        };
        let decoration = decoration.cloned().unwrap_or_default();

        let mut stack = ResolutionStack::new();
        match self.resolve_full_key(&full_key, &decoration, &mut stack) {
            Ok(resolved) => Ok(resolved.value),
            Err(err) => {
                self.diagnostics.failure(
                    &format!("Value failed : {full_key}"),
                    Some(&err.to_string()),
                );
                Err(err)
            }
        }
    }

    /// Cache check, walk, expand, decorate, store.
    pub(crate) fn resolve_full_key(
        &mut self,
        full_key: &str,
        decoration: &Decoration,
        stack: &mut ResolutionStack,
    ) -> std::result::Result<Expanded<ResolvedValue>, LookupError> {
        let cache_key = CacheKey::new(full_key, decoration);
        if let Some(value) = self.cache.get(&cache_key) {
            self.diagnostics
                .action(&format!("Value cached : {full_key} ({decoration})"));
            return Ok(Expanded { value, clean: true });
        }

        let raw = ResolvedValue::from(self.document.walk(full_key)?);

        stack.push(full_key.to_string());
        let expanded = self.expand_value(raw, stack);
        stack.pop();
        let expanded = expanded?;

        let value = expanded.value.decorate(decoration);

        if expanded.clean {
            self.cache.insert(cache_key, value.clone());
        } else {
            debug!(key = %full_key, "not caching value resolved under a cycle guard");
        }

        self.diagnostics
            .action(&format!("Value lookup : {full_key} ({decoration}) = {value}"));

        Ok(Expanded {
            value,
            clean: expanded.clean,
        })
    }
}
