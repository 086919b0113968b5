mod common;

use std::path::Path;

use gruntcfg::fs::RealFileSystem;
use gruntcfg::resolver::ConfigResolver;
use gruntcfg::write_commonjs;
use gruntcfg_test_utils::builders::DocumentBuilder;
use gruntcfg_test_utils::init_tracing;
use gruntcfg_test_utils::recording::RecordingDiagnostics;

#[test]
fn explicit_file_list_is_written_next_to_the_output_dir() {
    init_tracing();
    let fs = DocumentBuilder::new()
        .files("a", &["x.js", "y.js"])
        .path("to.scr", "build/")
        .mock_fs(".grunt.json");

    let diagnostics = RecordingDiagnostics::new();
    let mut resolver = ConfigResolver::create(diagnostics.clone(), &fs, None).unwrap();

    let text = write_commonjs(
        &mut resolver,
        &fs,
        Path::new("."),
        &["a".to_string()],
        "to.scr",
        "npm.js",
        false,
    )
    .unwrap();

    assert_eq!(text, "require('../x.js');\nrequire('../y.js');");
    assert_eq!(fs.contents("build/npm.js").as_deref(), Some(text.as_str()));
    assert!(diagnostics.contains("Wrote 2 require statements"));
}

#[test]
fn glob_patterns_are_expanded_in_order() {
    let fs = common::web_project().mock_fs(".grunt.json");
    fs.add_file("./web/js/b.js", "b");
    fs.add_file("./web/js/a.js", "a");
    fs.add_file("./web/js/vendor/v.js", "v");

    let mut resolver = ConfigResolver::create(RecordingDiagnostics::new(), &fs, None).unwrap();
    let text = write_commonjs(
        &mut resolver,
        &fs,
        Path::new("."),
        &["in.scr".to_string(), "in.vendor".to_string()],
        "to.scr",
        "npm.js",
        false,
    )
    .unwrap();

    assert_eq!(
        text,
        "require('../../web/js/a.js');\n\
         require('../../web/js/b.js');\n\
         require('../../web/js/vendor/v.js');"
    );
    assert!(fs.contents("build/js/npm.js").is_some());
}

#[test]
fn dry_run_does_not_write() {
    let fs = DocumentBuilder::new()
        .files("a", &["x.js"])
        .path("to.scr", "build/")
        .mock_fs(".grunt.json");

    let mut resolver = ConfigResolver::create(RecordingDiagnostics::new(), &fs, None).unwrap();
    let text = write_commonjs(
        &mut resolver,
        &fs,
        Path::new("."),
        &["a".to_string()],
        "to.scr",
        "npm.js",
        true,
    )
    .unwrap();

    assert_eq!(text, "require('../x.js');");
    assert_eq!(fs.contents("build/npm.js"), None);
}

#[test]
fn write_failure_surfaces_as_an_error() {
    let fs = DocumentBuilder::new()
        .files("a", &["x.js"])
        .path("to.scr", "build/")
        .mock_fs(".grunt.json");
    fs.deny_writes("build/npm.js");

    let diagnostics = RecordingDiagnostics::new();
    let mut resolver = ConfigResolver::create(diagnostics.clone(), &fs, None).unwrap();
    let err = write_commonjs(
        &mut resolver,
        &fs,
        Path::new("."),
        &["a".to_string()],
        "to.scr",
        "npm.js",
        false,
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("build/npm.js"));
    assert!(
        diagnostics
            .failures()
            .iter()
            .any(|e| e.message() == "Generating CommonJS file")
    );
}

#[test]
fn writes_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    common::touch(dir.path(), "src/x.js");
    common::touch(dir.path(), "src/y.js");

    let out_dir = format!("{}/build/", dir.path().display());
    let builder = DocumentBuilder::new()
        .files("a", &["src/*.js"])
        .path("to.scr", &out_dir);
    let config = common::write_config(dir.path(), "grunt.json", &builder);

    let mut resolver = ConfigResolver::create(
        RecordingDiagnostics::new(),
        &RealFileSystem,
        Some(std::slice::from_ref(&config)),
    )
    .unwrap();

    write_commonjs(
        &mut resolver,
        &RealFileSystem,
        dir.path(),
        &["a".to_string()],
        "to.scr",
        "npm.js",
        false,
    )
    .unwrap();

    let written = std::fs::read_to_string(dir.path().join("build/npm.js")).unwrap();
    assert_eq!(written, "require('../src/x.js');\nrequire('../src/y.js');");
}
