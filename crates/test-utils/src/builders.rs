#![allow(dead_code)]

use gruntcfg::config::ConfigDocument;
use gruntcfg::diagnostics::{Diagnostics, NullDiagnostics};
use gruntcfg::fs::mock::MockFileSystem;
use gruntcfg::resolver::{Category, ConfigResolver};
use serde_json::{Map, Value};

/// Builder for grunt configuration documents.
///
/// Keys are dotted paths inside a category, so
/// `.path("to.scr", "build/js/")` produces
/// `{"paths": {"to": {"scr": "build/js/"}}}`.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    root: Map<String, Value>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self { root: Map::new() }
    }

    pub fn path(self, key: &str, value: &str) -> Self {
        self.set(Category::Paths, key, Value::from(value))
    }

    pub fn files(self, key: &str, values: &[&str]) -> Self {
        self.set(Category::Files, key, Value::from(values.to_vec()))
    }

    pub fn option(self, key: &str, value: impl Into<Value>) -> Self {
        self.set(Category::Options, key, value.into())
    }

    pub fn task(self, alias: &str, members: &[&str]) -> Self {
        self.set(Category::Tasks, alias, Value::from(members.to_vec()))
    }

    pub fn template(self, key: &str, value: &str) -> Self {
        self.set(Category::Templates, key, Value::from(value))
    }

    /// Insert `value` at `category.key`, creating intermediate objects.
    pub fn set(mut self, category: Category, key: &str, value: Value) -> Self {
        let full_key = category.full_key(key);
        let mut parts: Vec<&str> = full_key.split('.').collect();
        let last = parts.pop().expect("full key has at least one fragment");

        let mut current = &mut self.root;
        for part in parts {
            let entry = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = entry.as_object_mut().expect("just made this an object");
        }
        current.insert(last.to_string(), value);
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&Value::Object(self.root.clone()))
            .expect("serialising a JSON map cannot fail")
    }

    pub fn document(&self) -> ConfigDocument {
        ConfigDocument::from_value(Value::Object(self.root.clone()))
            .expect("builder always produces an object")
    }

    pub fn resolver(&self) -> ConfigResolver {
        self.resolver_with(NullDiagnostics)
    }

    pub fn resolver_with(&self, diagnostics: impl Diagnostics + 'static) -> ConfigResolver {
        ConfigResolver::from_document(self.document(), diagnostics)
    }

    /// Write the document to `path` inside a fresh mock filesystem.
    pub fn mock_fs(&self, path: &str) -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_file(path, self.to_json());
        fs
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
