mod common;

use gruntcfg::config::LookupError;
use gruntcfg::resolver::{Category, Decoration, ResolvedValue};
use gruntcfg_test_utils::builders::DocumentBuilder;
use gruntcfg_test_utils::recording::RecordingDiagnostics;

#[test]
fn repeated_lookups_are_served_from_the_cache() {
    let diagnostics = RecordingDiagnostics::new();
    let mut resolver = common::web_project().resolver_with(diagnostics.clone());

    let first = resolver.get_path("in.scr", None).unwrap();
    let second = resolver.get_path("in.scr", None).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.as_str(), Some("web/js/"));
    assert!(diagnostics.contains("Value cached : paths.in.scr (no options)"));
    assert_eq!(resolver.cache_stats().hits, 1);
}

#[test]
fn decorations_are_cached_separately() {
    let mut resolver = common::web_project().resolver();

    let plain = resolver.get_path("to.scr", None).unwrap();
    let decorated = resolver
        .get_path("to.scr", Some(&Decoration::suffix("npm.js")))
        .unwrap();

    assert_eq!(plain.as_str(), Some("build/js/"));
    assert_eq!(decorated.as_str(), Some("build/js/npm.js"));
    assert_eq!(resolver.cache_stats().entries, 2);
}

#[test]
fn prefix_and_suffix_wrap_every_list_element() {
    let mut resolver = DocumentBuilder::new()
        .files("names", &["a", "b"])
        .resolver();

    let value = resolver
        .get_files("names", Some(&Decoration::prefix("src/").with_suffix(".js")))
        .unwrap();
    assert_eq!(value.as_list().unwrap(), ["src/a.js", "src/b.js"]);
}

#[test]
fn missing_fragment_is_reported() {
    let diagnostics = RecordingDiagnostics::new();
    let mut resolver = common::web_project().resolver_with(diagnostics.clone());

    let err = resolver.get_path("nonexistent", None).unwrap_err();
    assert_eq!(
        err,
        LookupError::MissingFragment {
            key: "paths.nonexistent".into(),
            fragment: "nonexistent".into(),
        }
    );
    assert_eq!(err.fragment(), Some("nonexistent"));
    assert_eq!(diagnostics.failures().len(), 1);
    assert!(diagnostics.contains("Value failed : paths.nonexistent"));
}

#[test]
fn missing_placeholder_target_is_an_error() {
    let mut resolver = DocumentBuilder::new()
        .path("a", "${paths.nowhere}/x")
        .resolver();

    let err = resolver.get_path("a", None).unwrap_err();
    assert_eq!(err.fragment(), Some("nowhere"));
}

#[test]
fn descending_into_a_string_is_an_error() {
    let mut resolver = DocumentBuilder::new().path("a", "x").resolver();
    let err = resolver.get_path("a.b", None).unwrap_err();
    assert!(matches!(err, LookupError::NotAMapping { found: "scalar", .. }));
}

#[test]
fn empty_strings_count_as_missing() {
    let mut resolver = DocumentBuilder::new().option("blank", "").resolver();
    assert!(matches!(
        resolver.get_option("blank", None),
        Err(LookupError::MissingFragment { .. })
    ));
}

#[test]
fn merged_lookup_equals_concatenation() {
    let mut resolver = DocumentBuilder::new()
        .path("js", "web/js/")
        .files("a", &["${paths.js}a.js", "${paths.js}b.js"])
        .files("b", &["${paths.js}c.js"])
        .resolver();

    let merged = resolver.get_files_merged(["a", "b"]).unwrap();
    let mut expected = resolver.get_files("a", None).unwrap().as_list().unwrap().to_vec();
    expected.extend(resolver.get_files("b", None).unwrap().as_list().unwrap().iter().cloned());

    assert_eq!(merged, expected);
    assert_eq!(merged, vec!["web/js/a.js", "web/js/b.js", "web/js/c.js"]);
}

#[test]
fn merged_paths_flatten_scalars() {
    let mut resolver = DocumentBuilder::new()
        .path("a", "one/")
        .path("b", "two/")
        .resolver();
    assert_eq!(resolver.get_paths_merged(["a", "b"]).unwrap(), vec!["one/", "two/"]);
}

#[test]
fn merged_lookup_rejects_mappings() {
    let mut resolver = DocumentBuilder::new()
        .path("to.scr", "build/")
        .resolver();
    let err = resolver.get_paths_merged(["to"]).unwrap_err();
    assert_eq!(err, LookupError::UnexpectedMapping { key: "paths.to".into() });
}

#[test]
fn placeholders_chain_across_categories() {
    let mut resolver = common::web_project().resolver();

    assert_eq!(resolver.get_option("banner", None).unwrap().as_str(), Some("/* demo */"));
    assert_eq!(
        resolver.get_files("in.scr", None).unwrap(),
        ResolvedValue::Sequence(vec!["web/js/**/*.js".into(), "!web/js/vendor/**".into()])
    );
}

#[test]
fn templates_and_tasks_have_accessors() {
    let mut resolver = DocumentBuilder::new()
        .template("header", "<h1>${options.title}</h1>")
        .option("title", "Hi")
        .task("default", &["clean", "build"])
        .resolver();

    assert_eq!(resolver.get_template("header", None).unwrap().as_str(), Some("<h1>Hi</h1>"));
    assert_eq!(
        resolver.get_task("default", None).unwrap().as_list().unwrap(),
        ["clean", "build"]
    );
}

#[test]
fn whole_category_lookup_supports_find_inner() {
    let mut resolver = DocumentBuilder::new()
        .path("root", "web/")
        .path("plugins.gallery.img", "${paths.root}gallery/img/")
        .path("plugins.slider.img", "${paths.root}slider/img/")
        .path("plugins.slider.scr", "${paths.root}slider/js/")
        .resolver();

    let paths = resolver.category(Category::Paths).unwrap();
    assert_eq!(
        paths.find_inner("img"),
        vec!["web/gallery/img/", "web/slider/img/"]
    );
}
