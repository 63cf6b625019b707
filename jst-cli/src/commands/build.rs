//! `jst build [TARGET]` — build targets from the project file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jst_build::pipeline::{self, BuildScope};
use jst_core::config::CONFIG_FILE_NAME;

use super::report::{print_json, print_reports};

/// Arguments for `jst build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Build only this target (default: every target, in file order).
    pub target: Option<String>,

    /// Project file to read.
    #[arg(long, short = 'c', default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        let scope = match self.target.clone() {
            Some(name) => BuildScope::Target(name),
            None => BuildScope::All,
        };
        let reports = pipeline::run(&self.config, scope, self.dry_run)
            .with_context(|| format!("build failed ({})", self.config.display()))?;

        if self.json {
            return print_json(&reports);
        }
        if reports.is_empty() {
            println!("No targets in {}. Add one or run `jst init`.", self.config.display());
            return Ok(());
        }
        print_reports(&reports, self.dry_run);
        Ok(())
    }
}
