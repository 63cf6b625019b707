//! `jst compile <FILES>... --dest <PATH>` — one-off build without a project file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jst_build::{build_target, BuildTarget, Toolchain};
use jst_core::{types::DEFAULT_NAMESPACE, JstOptions, Namespace};

use super::report::print_reports;

/// Arguments for `jst compile`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Template files or glob patterns, compiled in the order given.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Output file.
    #[arg(long, short = 'd')]
    pub dest: PathBuf,

    /// Dotted namespace the templates are attached to.
    #[arg(long, short = 'n', default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Return the single template from the AMD module instead of a namespace.
    #[arg(long, conflicts_with = "namespace", requires = "amd")]
    pub no_namespace: bool,

    /// Wrap the output in `define(function(){ ... })`.
    #[arg(long)]
    pub amd: bool,

    /// Extract `<script type="text/template" id="...">` regions from each file.
    #[arg(long)]
    pub multiple: bool,

    /// Strip newlines from compiled functions.
    #[arg(long)]
    pub prettify: bool,

    /// Text placed between output entries.
    #[arg(long)]
    pub separator: Option<String>,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl CompileArgs {
    pub fn run(self) -> Result<()> {
        let mut options = JstOptions {
            namespace: if self.no_namespace {
                Namespace::Disabled
            } else {
                Namespace::Named(self.namespace.clone())
            },
            multiple: self.multiple,
            prettify: self.prettify,
            amd: self.amd,
            ..JstOptions::default()
        };
        if let Some(separator) = self.separator {
            options.separator = separator;
        }

        let target = BuildTarget {
            name: self.dest.display().to_string(),
            dest: self.dest.clone(),
            base_dir: PathBuf::new(),
            sources: self.files,
            options,
        };
        let report = build_target(&target, &Toolchain::default(), self.dry_run)
            .with_context(|| format!("failed to compile into '{}'", self.dest.display()))?;
        print_reports(std::slice::from_ref(&report), self.dry_run);
        Ok(())
    }
}
