// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::LookupError;

#[derive(Error, Debug)]
pub enum GruntCfgError {
    #[error("Failed to load configuration; paths tried: {}", tried.join(", "))]
    ConfigLoad { tried: Vec<String> },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Task alias error: {0}")]
    TaskGraph(String),

    #[error("Invalid file pattern: {0}")]
    Pattern(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GruntCfgError>;
