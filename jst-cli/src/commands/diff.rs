//! `jst diff [TARGET]` — show unified diffs for what build would write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jst_build::pipeline::{self, BuildScope};
use jst_core::config::CONFIG_FILE_NAME;

/// Arguments for `jst diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Diff only this target.
    pub target: Option<String>,

    /// Project file to read.
    #[arg(long, short = 'c', default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let scope = match self.target.clone() {
            Some(name) => BuildScope::Target(name),
            None => BuildScope::All,
        };
        let results = pipeline::diff(&self.config, scope)
            .with_context(|| format!("diff failed ({})", self.config.display()))?;

        for result in results {
            if result.diffs.is_empty() {
                println!("No differences for '{}'.", result.target_name);
                continue;
            }
            for diff in result.diffs {
                print!("{}", diff.unified_diff);
                if !diff.unified_diff.ends_with('\n') {
                    println!();
                }
            }
        }

        Ok(())
    }
}
