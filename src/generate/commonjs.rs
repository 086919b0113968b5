// src/generate/commonjs.rs

use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::diagnostics::Diagnostics;
use crate::errors::{GruntCfgError, Result};
use crate::fs::FileSystem;

/// Writes an entry module that `require`s every source file, e.g. for
/// `build/npm.js`:
///
/// ```text
/// require('../web/js/a.js');
/// require('../web/js/b.js');
/// ```
pub struct CommonJsGenerator<'a> {
    fs: &'a dyn FileSystem,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> CommonJsGenerator<'a> {
    pub fn new(fs: &'a dyn FileSystem, diagnostics: &'a dyn Diagnostics) -> Self {
        Self { fs, diagnostics }
    }

    /// Module text for `sources`, relative to the directory of `dest`.
    pub fn render<P: AsRef<Path>>(&self, sources: &[P], dest: &Path) -> String {
        let base = parent_dir(dest);
        sources
            .iter()
            .map(|src| require_line(&base, src.as_ref()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render and write to `dest`. Returns the written text.
    pub fn write<P: AsRef<Path>>(&self, sources: &[P], dest: &Path) -> Result<String> {
        self.diagnostics.title("Generating CommonJS file");
        self.diagnostics
            .action(&format!("Writing {}...", dest.display()));

        let contents = self.render(sources, dest);

        if let Err(err) = self.fs.write(dest, contents.as_bytes()) {
            self.diagnostics
                .failure("Generating CommonJS file", Some(&format!("{err:#}")));
            return Err(GruntCfgError::Write {
                path: dest.to_path_buf(),
                source: err,
            });
        }

        info!(dest = ?dest, modules = sources.len(), "wrote CommonJS entry module");
        self.diagnostics
            .success(&format!("Wrote {} require statements", sources.len()));
        Ok(contents)
    }
}

/// `require('<relative>');` with forward slashes.
pub fn require_line(base_dir: &Path, source: &Path) -> String {
    let rel = relative_path(base_dir, source);
    format!("require('{}');", rel.to_string_lossy().replace('\\', "/"))
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Relative path from directory `from` to `to`.
///
/// Both sides are resolved against the working directory and `.`/`..` are
/// folded before comparing, so `../dist` to `src/a.js` walks back into the
/// working directory by name. The filesystem is never consulted.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let from = normalize(&cwd.join(from));
    let to = normalize(&cwd.join(to));

    let from_parts: Vec<Component<'_>> = from.components().collect();
    let to_parts: Vec<Component<'_>> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from_parts.len() {
        rel.push("..");
    }
    for part in &to_parts[common..] {
        rel.push(part.as_os_str());
    }
    rel
}

/// Fold `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullDiagnostics;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn relative_paths_walk_up_and_down() {
        assert_eq!(
            relative_path(Path::new("build"), Path::new("x.js")),
            PathBuf::from("../x.js")
        );
        assert_eq!(
            relative_path(Path::new("build/js"), Path::new("./web/js/a.js")),
            PathBuf::from("../../web/js/a.js")
        );
        assert_eq!(
            relative_path(Path::new("."), Path::new("x.js")),
            PathBuf::from("x.js")
        );
        assert_eq!(
            relative_path(Path::new("/srv/app/build"), Path::new("/srv/app/src/a.js")),
            PathBuf::from("../src/a.js")
        );
    }

    #[test]
    fn output_dir_above_the_working_directory() {
        let cwd = std::env::current_dir().unwrap();
        let name = cwd.file_name().unwrap();

        assert_eq!(
            relative_path(Path::new("../dist"), Path::new("src/a.js")),
            Path::new("..").join(name).join("src/a.js")
        );

        let fs = MockFileSystem::new();
        let generator = CommonJsGenerator::new(&fs, &NullDiagnostics);
        let text = generator.render(&["src/a.js"], Path::new("../dist/npm.js"));
        assert_eq!(
            text,
            format!("require('../{}/src/a.js');", name.to_string_lossy())
        );
    }

    #[test]
    fn renders_one_require_per_source() {
        let fs = MockFileSystem::new();
        let generator = CommonJsGenerator::new(&fs, &NullDiagnostics);
        let text = generator.render(&["x.js", "y.js"], Path::new("build/npm.js"));
        assert_eq!(text, "require('../x.js');\nrequire('../y.js');");
    }

    #[test]
    fn write_failure_is_reported() {
        let fs = MockFileSystem::new();
        fs.deny_writes("build/npm.js");
        let generator = CommonJsGenerator::new(&fs, &NullDiagnostics);

        let err = generator
            .write(&["x.js"], Path::new("build/npm.js"))
            .unwrap_err();
        assert!(matches!(err, GruntCfgError::Write { .. }));
        assert_eq!(fs.contents("build/npm.js"), None);
    }
}
