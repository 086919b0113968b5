// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::resolver::Category;

/// Command-line arguments for `gruntcfg`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gruntcfg",
    version,
    about = "Resolve values from a grunt JSON configuration file.",
    long_about = None
)]
pub struct CliArgs {
    /// Extra configuration file to try (repeatable).
    ///
    /// These are tried in order before `.grunt.json` and `.grunt/config.json`.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Vec<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GRUNTCFG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Print resolved values as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve one value (or a whole category when KEY is omitted).
    Get {
        #[arg(value_enum)]
        category: CategoryArg,

        /// Dotted key inside the category, e.g. `to.scr`.
        key: Option<String>,

        /// Text prepended to every resolved string.
        #[arg(long)]
        prefix: Option<String>,

        /// Text appended to every resolved string.
        #[arg(long)]
        suffix: Option<String>,
    },

    /// Resolve several keys and concatenate the results.
    Merged {
        #[arg(value_enum)]
        category: MergeCategory,

        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Write a CommonJS module that requires every file of the given lists.
    Commonjs {
        /// `files` keys whose patterns are expanded, in order.
        #[arg(long = "src", value_name = "FILES_KEY", required = true)]
        src: Vec<String>,

        /// `paths` key of the output directory.
        #[arg(long, value_name = "PATH_KEY", default_value = "to.scr")]
        dest: String,

        /// File name appended to the output directory.
        #[arg(long, value_name = "NAME", default_value = "npm.js")]
        dest_suffix: String,

        /// Directory patterns are expanded against.
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,

        /// Print the module instead of writing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// List task aliases, or expand one into its leaf tasks.
    Tasks { alias: Option<String> },

    /// Print host facts.
    Info,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum CategoryArg {
    Paths,
    Files,
    Options,
    Tasks,
    Templates,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Paths => Category::Paths,
            CategoryArg::Files => Category::Files,
            CategoryArg::Options => Category::Options,
            CategoryArg::Tasks => Category::Tasks,
            CategoryArg::Templates => Category::Templates,
        }
    }
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum MergeCategory {
    Paths,
    Files,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
