//! Build driver: one target from source list to destination file.
//!
//! Per target the driver validates options, expands the source list, drops
//! (and reports) missing files, compiles the rest in order, assembles, and
//! hands the text to the writer. Any hard failure abandons the destination
//! before anything touches disk.

use std::path::{Path, PathBuf};

use serde::Serialize;

use jst_core::{config, JstOptions, Project, TargetConfig};

use crate::assembler::assemble;
use crate::error::{io_err, BuildError};
use crate::unit::{compile_file, CompilationTask, Mode, Toolchain};
use crate::writer::{atomic_write, WriteOutcome};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A resolved build target, independent of where it was configured.
#[derive(Debug, Clone)]
pub struct BuildTarget {
    pub name: String,
    /// Destination path; relative paths resolve against the working directory.
    pub dest: PathBuf,
    /// Directory that `sources` resolve against.
    pub base_dir: PathBuf,
    /// Source paths and glob patterns, in order.
    pub sources: Vec<String>,
    pub options: JstOptions,
}

impl BuildTarget {
    /// Resolve a configured target of `project`.
    pub fn from_config(project: &Project, target: &TargetConfig) -> Self {
        BuildTarget {
            name: target.name.0.clone(),
            dest: project.dest_path(target),
            base_dir: project.base_dir.clone(),
            sources: target.src.clone(),
            options: target.options.to_options(),
        }
    }
}

/// Assembled text for a target, before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Listed sources that did not exist.
    pub missing: Vec<PathBuf>,
    /// Number of compiled templates that made it into `text`.
    pub templates: usize,
    /// `None` when nothing compiled.
    pub text: Option<String>,
}

/// Result of building one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub name: String,
    pub dest: PathBuf,
    pub missing: Vec<PathBuf>,
    pub templates: usize,
    pub outcome: WriteOutcome,
}

// ---------------------------------------------------------------------------
// render / build
// ---------------------------------------------------------------------------

/// Compile and assemble `target` without writing.
pub fn render_target(target: &BuildTarget, toolchain: &Toolchain) -> Result<Rendered, BuildError> {
    let namespace = target.options.validate()?;
    toolchain
        .compiler
        .validate(&target.options.template_settings)
        .map_err(|source| BuildError::Settings {
            target: target.name.clone(),
            source,
        })?;

    let paths = config::expand_sources(&target.base_dir, &target.sources)?;
    let mode = Mode::for_options(&target.options);

    let mut missing = Vec::new();
    let mut outputs = Vec::new();
    for path in paths {
        let full = target.base_dir.join(&path);
        if !full.is_file() {
            tracing::warn!("Source file {} not found.", path.display());
            missing.push(path);
            continue;
        }
        let raw_source = std::fs::read_to_string(&full).map_err(|e| io_err(&full, e))?;
        let task = CompilationTask {
            source_path: path,
            raw_source,
            mode,
        };
        outputs.push(compile_file(&task, &target.options, toolchain)?);
    }

    let text = assemble(&outputs, namespace.as_ref(), &target.options)?;
    let templates = if text.is_some() {
        outputs
            .iter()
            .flat_map(|o| o.templates())
            .filter(|t| !t.function_source.trim().is_empty())
            .count()
    } else {
        0
    };
    Ok(Rendered {
        missing,
        templates,
        text,
    })
}

/// Build `target` and write its destination.
pub fn build_target(
    target: &BuildTarget,
    toolchain: &Toolchain,
    dry_run: bool,
) -> Result<TargetReport, BuildError> {
    tracing::debug!("building target '{}'", target.name);
    let rendered = render_target(target, toolchain)?;

    let outcome = match &rendered.text {
        Some(text) => atomic_write(&target.dest, text, dry_run)?,
        None => {
            tracing::warn!(
                "Destination {} not written because compiled files were empty.",
                target.dest.display()
            );
            WriteOutcome::Empty {
                path: target.dest.clone(),
            }
        }
    };

    Ok(TargetReport {
        name: target.name.clone(),
        dest: target.dest.clone(),
        missing: rendered.missing,
        templates: rendered.templates,
        outcome,
    })
}

/// Build every target of `project` in file order, stopping at the first
/// hard failure.
pub fn build_all(
    project: &Project,
    toolchain: &Toolchain,
    dry_run: bool,
) -> Result<Vec<TargetReport>, BuildError> {
    let mut reports = Vec::new();
    for target in &project.config.targets {
        let target = BuildTarget::from_config(project, target);
        reports.push(build_target(&target, toolchain, dry_run)?);
    }
    Ok(reports)
}

/// Destination path relative to `base`, for display.
pub fn relative_to<'a>(path: &'a Path, base: &Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
