//! Unified diff of what `jst build` would write, for `jst diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::driver::{relative_to, render_target, BuildTarget};
use crate::error::{io_err, BuildError};
use crate::unit::Toolchain;

/// A single destination diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Diff result for a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTargetResult {
    pub target_name: String,
    /// At most one entry; empty when the destination is current.
    pub diffs: Vec<FileDiff>,
}

/// Render `target` and compare it to the destination on disk.
///
/// No files are written. Targets that compile to nothing produce no diff.
pub fn diff_target(target: &BuildTarget, toolchain: &Toolchain) -> Result<DiffTargetResult, BuildError> {
    let rendered = render_target(target, toolchain)?;
    let mut diffs = Vec::new();

    if let Some(text) = rendered.text {
        let existing = read_existing_or_empty(&target.dest)?;
        if existing != text {
            let relative = relative_to(&target.dest, &target.base_dir);
            let old_header = format!("a/{}", relative.display());
            let new_header = format!("b/{}", relative.display());
            let unified = TextDiff::from_lines(&existing, &text)
                .unified_diff()
                .header(&old_header, &new_header)
                .context_radius(3)
                .to_string();
            diffs.push(FileDiff {
                path: target.dest.clone(),
                unified_diff: unified,
            });
        }
    }

    Ok(DiffTargetResult {
        target_name: target.name.clone(),
        diffs,
    })
}

fn read_existing_or_empty(path: &Path) -> Result<String, BuildError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use jst_core::JstOptions;
    use tempfile::TempDir;

    use crate::driver::build_target;

    use super::*;

    fn fixture() -> (TempDir, BuildTarget) {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("hello.html"), "Hello <%= name %>").expect("write");
        let target = BuildTarget {
            name: "app".to_string(),
            dest: dir.path().join("build").join("templates.js"),
            base_dir: dir.path().to_path_buf(),
            sources: vec!["hello.html".to_string()],
            options: JstOptions::default(),
        };
        (dir, target)
    }

    #[test]
    fn no_diffs_after_clean_build() {
        let (_dir, target) = fixture();
        build_target(&target, &Toolchain::default(), false).expect("build");

        let diff = diff_target(&target, &Toolchain::default()).expect("diff");
        assert!(diff.diffs.is_empty(), "built target should have no diff");
    }

    #[test]
    fn missing_destination_diffs_against_empty() {
        let (_dir, target) = fixture();
        let diff = diff_target(&target, &Toolchain::default()).expect("diff");
        assert_eq!(diff.diffs.len(), 1);
        assert!(diff.diffs[0].unified_diff.contains("+this[\"JST\"]"));
        assert!(!target.dest.exists(), "diff must not write");
    }

    #[test]
    fn template_edit_produces_unified_diff() {
        let (dir, target) = fixture();
        build_target(&target, &Toolchain::default(), false).expect("build");
        fs::write(dir.path().join("hello.html"), "Bye <%= name %>").expect("edit");

        let diff = diff_target(&target, &Toolchain::default()).expect("diff");
        let file = &diff.diffs[0];
        assert!(file.unified_diff.contains("--- a/build/templates.js"));
        assert!(file.unified_diff.contains("+++ b/build/templates.js"));
        assert!(file.unified_diff.contains("@@"));
        assert!(file.unified_diff.contains("Bye"));
    }
}
