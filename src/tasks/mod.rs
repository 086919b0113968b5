// src/tasks/mod.rs

//! Task alias tables read from the `tasks` category.

pub mod aliases;

pub use aliases::TaskAliases;
