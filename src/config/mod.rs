// src/config/mod.rs

//! Configuration document loading.
//!
//! Responsibilities:
//! - Define the JSON-backed tree model (`document.rs`).
//! - Find and load the first usable candidate file (`loader.rs`).

pub mod document;
pub mod loader;

pub use document::{ConfigDocument, ConfigNode, DocumentError, LookupError};
pub use loader::{candidate_paths, load_first, load_from_path, LoadedDocument, DEFAULT_CANDIDATES};
