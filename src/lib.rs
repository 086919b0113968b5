// src/lib.rs

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod fs;
pub mod generate;
pub mod host;
pub mod logging;
pub mod resolver;
pub mod tasks;

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::cli::{CliArgs, Command, MergeCategory};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::fs::{FileSystem, RealFileSystem};
use crate::generate::{expand_patterns, CommonJsGenerator};
use crate::host::HostFacts;
use crate::resolver::{Category, ConfigResolver, Decoration, ResolvedValue};
use crate::tasks::TaskAliases;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config discovery and loading
/// - the resolver
/// - the requested subcommand
pub fn run(args: CliArgs) -> Result<()> {
    let fs = RealFileSystem;
    let mut out = std::io::stdout().lock();

    if let Command::Info = args.command {
        let facts = HostFacts::collect();
        facts.report(&TracingDiagnostics);
        return print_json_or(&mut out, args.json, &facts, |out| {
            writeln!(out, "hostname={}", facts.hostname)?;
            writeln!(out, "platform={}", facts.platform)?;
            writeln!(out, "kernel-v={}", facts.kernel)?;
            Ok(())
        });
    }

    let mut resolver = ConfigResolver::create(TracingDiagnostics, &fs, Some(args.config.as_slice()))?;
    debug!(source = ?resolver.source(), "resolver ready");

    match args.command {
        Command::Get {
            category,
            key,
            prefix,
            suffix,
        } => {
            let category = Category::from(category);
            let decoration = Decoration { prefix, suffix };
            let value = match key {
                Some(key) => resolver.lookup(Some(category), &key, Some(&decoration))?,
                None => resolver.category(category)?.decorate(&decoration),
            };
            print_value(&mut out, args.json, &value)
        }
        Command::Merged { category, keys } => {
            let values = match category {
                MergeCategory::Paths => resolver.get_paths_merged(&keys)?,
                MergeCategory::Files => resolver.get_files_merged(&keys)?,
            };
            print_value(&mut out, args.json, &ResolvedValue::Sequence(values))
        }
        Command::Commonjs {
            src,
            dest,
            dest_suffix,
            root,
            dry_run,
        } => {
            let text = write_commonjs(
                &mut resolver,
                &fs,
                &root,
                &src,
                &dest,
                &dest_suffix,
                dry_run,
            )?;
            if dry_run {
                writeln!(out, "{text}")?;
            }
            Ok(())
        }
        Command::Tasks { alias } => {
            let aliases = TaskAliases::from_resolver(&mut resolver)?;
            match alias {
                Some(alias) => {
                    let tasks = aliases.expand(&alias);
                    print_value(&mut out, args.json, &ResolvedValue::Sequence(tasks))
                }
                None => {
                    for name in aliases.names() {
                        writeln!(out, "{name}: {}", aliases.members_of(name).join(", "))?;
                    }
                    Ok(())
                }
            }
        }
        Command::Info => Ok(()),
    }
}

/// Resolve the source lists and output path, expand the patterns and write
/// (or just render) the CommonJS entry module. Returns the module text.
pub fn write_commonjs(
    resolver: &mut ConfigResolver,
    fs: &dyn FileSystem,
    root: &Path,
    src_keys: &[String],
    dest_key: &str,
    dest_suffix: &str,
    dry_run: bool,
) -> Result<String> {
    let patterns = resolver.get_files_merged(src_keys)?;
    let sources = expand_patterns(fs, root, &patterns)?;

    let dest = resolver.get_path(dest_key, Some(&Decoration::suffix(dest_suffix)))?;
    let dest = dest
        .as_str()
        .ok_or_else(|| anyhow!("paths.{dest_key} must resolve to a single path"))?
        .to_string();

    let diagnostics: &dyn Diagnostics = resolver.diagnostics();
    let generator = CommonJsGenerator::new(fs, diagnostics);
    let text = if dry_run {
        generator.render(&sources, Path::new(&dest))
    } else {
        generator.write(&sources, Path::new(&dest))?
    };
    Ok(text)
}

fn print_value(out: &mut impl Write, json: bool, value: &ResolvedValue) -> Result<()> {
    print_json_or(out, json, value, |out| {
        match value {
            ResolvedValue::Scalar(s) => writeln!(out, "{s}")?,
            ResolvedValue::Sequence(items) => {
                for item in items {
                    writeln!(out, "{item}")?;
                }
            }
            ResolvedValue::Mapping(_) => {
                writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
            }
        }
        Ok(())
    })
}

fn print_json_or<W, T, F>(out: &mut W, json: bool, value: &T, text: F) -> Result<()>
where
    W: Write,
    T: serde::Serialize,
    F: FnOnce(&mut W) -> Result<()>,
{
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    } else {
        text(out)
    }
}
