// src/resolver/substitute.rs

//! `${dotted.key}` placeholder expansion.
//!
//! One placeholder is handled per round: the first match in the string is
//! resolved and every literal occurrence of that exact token is replaced.
//! Rounds stop when no placeholder is left or after
//! [`MAX_SUBSTITUTION_ROUNDS`]. Placeholders that cannot be expanded (empty
//! replacement, cycle, too deep) are left in the text as-is.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::LookupError;
use crate::resolver::value::{Decoration, ResolvedValue};
use crate::resolver::ConfigResolver;

/// Upper bound on substitution rounds for a single string.
pub const MAX_SUBSTITUTION_ROUNDS: usize = 20;

/// Upper bound on nested placeholder lookups.
pub const MAX_PLACEHOLDER_DEPTH: usize = 20;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z.-]+)\}").expect("placeholder pattern is a valid regex")
});

/// Keys currently being resolved, outermost first.
pub(crate) type ResolutionStack = Vec<String>;

/// Result of expanding something; `clean` is false when a cycle or depth
/// guard fired somewhere below, in which case the value must not be cached.
pub(crate) struct Expanded<T> {
    pub value: T,
    pub clean: bool,
}

/// First placeholder in `text`: `(token, identifier)`.
pub fn first_placeholder(text: &str) -> Option<(&str, &str)> {
    let caps = PLACEHOLDER.captures(text)?;
    let token = caps.get(0)?.as_str();
    let ident = caps.get(1)?.as_str();
    Some((token, ident))
}

impl ConfigResolver {
    /// Expand every string leaf of `value`.
    pub(crate) fn expand_value(
        &mut self,
        value: ResolvedValue,
        stack: &mut ResolutionStack,
    ) -> Result<Expanded<ResolvedValue>, LookupError> {
        match value {
            ResolvedValue::Scalar(s) => {
                let e = self.expand_str(&s, stack)?;
                Ok(Expanded {
                    value: ResolvedValue::Scalar(e.value),
                    clean: e.clean,
                })
            }
            ResolvedValue::Sequence(items) => {
                let mut clean = true;
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    let e = self.expand_str(&item, stack)?;
                    clean &= e.clean;
                    out.push(e.value);
                }
                Ok(Expanded {
                    value: ResolvedValue::Sequence(out),
                    clean,
                })
            }
            ResolvedValue::Mapping(map) => {
                let mut clean = true;
                let mut out = std::collections::BTreeMap::new();
                for (k, v) in map {
                    let e = self.expand_value(v, stack)?;
                    clean &= e.clean;
                    out.insert(k, e.value);
                }
                Ok(Expanded {
                    value: ResolvedValue::Mapping(out),
                    clean,
                })
            }
        }
    }

    /// Expand placeholders in a single string.
    pub(crate) fn expand_str(
        &mut self,
        text: &str,
        stack: &mut ResolutionStack,
    ) -> Result<Expanded<String>, LookupError> {
        let mut parsed = text.to_string();
        let mut clean = true;

        for _ in 0..MAX_SUBSTITUTION_ROUNDS {
            let Some((token, ident)) = first_placeholder(&parsed) else {
                break;
            };
            let (token, ident) = (token.to_string(), ident.to_string());

            let replacement = self.placeholder_text(&ident, stack)?;
            clean &= replacement.clean;

            match replacement.value {
                Some(text) if !text.is_empty() => {
                    parsed = parsed.replace(&token, &text);
                }
                _ => {
                    debug!(placeholder = %token, "placeholder left unexpanded");
                }
            }
        }

        Ok(Expanded {
            value: parsed,
            clean,
        })
    }

    /// Text a placeholder expands to, or `None` when a guard fired.
    fn placeholder_text(
        &mut self,
        ident: &str,
        stack: &mut ResolutionStack,
    ) -> Result<Expanded<Option<String>>, LookupError> {
        if stack.iter().any(|k| k == ident) || stack.len() >= MAX_PLACEHOLDER_DEPTH {
            debug!(key = %ident, depth = stack.len(), "placeholder cycle or depth guard");
            return Ok(Expanded {
                value: None,
                clean: false,
            });
        }

        let resolved = self.resolve_full_key(ident, &Decoration::default(), stack)?;
        let text = match resolved.value {
            ResolvedValue::Scalar(s) => s,
            ResolvedValue::Sequence(items) => items.join(","),
            ResolvedValue::Mapping(_) => {
                return Err(LookupError::UnexpectedMapping {
                    key: ident.to_string(),
                });
            }
        };

        Ok(Expanded {
            value: Some(text),
            clean: resolved.clean,
        })
    }
}
