// src/generate/mod.rs

//! Generated build artifacts.
//!
//! - [`expand`] turns grunt-style `src` pattern lists into concrete files.
//! - [`commonjs`] writes the CommonJS entry module listing those files.

pub mod commonjs;
pub mod expand;

pub use commonjs::{relative_path, require_line, CommonJsGenerator};
pub use expand::expand_patterns;
