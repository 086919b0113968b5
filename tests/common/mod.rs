#![allow(dead_code)]

use std::path::{Path, PathBuf};

use gruntcfg_test_utils::builders::DocumentBuilder;

/// Write `builder` as JSON to `dir/name` on the real filesystem.
pub fn write_config(dir: &Path, name: &str, builder: &DocumentBuilder) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, builder.to_json()).unwrap();
    path
}

/// Create `dir/rel` with some content.
pub fn touch(dir: &Path, rel: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, format!("// {rel}\n")).unwrap();
    path
}

/// The layout used by most tests: sources under `web/`, output under `build/`.
pub fn web_project() -> DocumentBuilder {
    DocumentBuilder::new()
        .path("root", "web/")
        .path("in.scr", "${paths.root}js/")
        .path("to.scr", "build/js/")
        .files("in.scr", &["${paths.in.scr}**/*.js", "!${paths.in.scr}vendor/**"])
        .files("in.vendor", &["${paths.in.scr}vendor/v.js"])
        .option("banner", "/* ${options.name} */")
        .option("name", "demo")
}
