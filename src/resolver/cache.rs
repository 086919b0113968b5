// src/resolver/cache.rs

use std::collections::HashMap;

use tracing::trace;

use crate::resolver::value::{Decoration, ResolvedValue};

/// Memoization key: full dotted key plus the decoration that was applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub full_key: String,
    pub decoration: Decoration,
}

impl CacheKey {
    pub fn new(full_key: impl Into<String>, decoration: &Decoration) -> Self {
        Self {
            full_key: full_key.into(),
            decoration: decoration.clone(),
        }
    }
}

/// Counters exposed for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Append-only map of resolved values.
///
/// The document never changes after load, so entries are never invalidated.
#[derive(Debug, Default)]
pub struct ValueCache {
    values: HashMap<CacheKey, ResolvedValue>,
    hits: u64,
    misses: u64,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value, counting the hit or miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<ResolvedValue> {
        match self.values.get(key) {
            Some(value) => {
                self.hits += 1;
                trace!(key = %key.full_key, "cache hit");
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: CacheKey, value: ResolvedValue) {
        self.values.insert(key, value);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.values.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoration_is_part_of_the_key() {
        let mut cache = ValueCache::new();
        let plain = CacheKey::new("paths.a", &Decoration::default());
        let post = CacheKey::new("paths.a", &Decoration::suffix("x"));

        cache.insert(plain.clone(), ResolvedValue::Scalar("a".into()));

        assert_eq!(cache.get(&plain), Some(ResolvedValue::Scalar("a".into())));
        assert_eq!(cache.get(&post), None);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }
}
