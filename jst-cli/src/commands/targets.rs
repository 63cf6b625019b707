//! `jst targets` — list the targets of the project file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use jst_core::{config, Namespace, TargetConfig};

/// Arguments for `jst targets`.
#[derive(Args, Debug)]
pub struct TargetsArgs {
    /// Project file to read.
    #[arg(long, short = 'c', default_value = config::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct TargetRow {
    #[tabled(rename = "target")]
    name: String,
    #[tabled(rename = "dest")]
    dest: String,
    #[tabled(rename = "namespace")]
    namespace: String,
    #[tabled(rename = "mode")]
    mode: String,
    #[tabled(rename = "sources")]
    sources: usize,
}

impl TargetsArgs {
    pub fn run(self) -> Result<()> {
        let project = config::load_at(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;

        let mut rows = Vec::new();
        for target in &project.config.targets {
            let sources = config::expand_sources(&project.base_dir, &target.src)
                .with_context(|| format!("bad source list for '{}'", target.name))?;
            rows.push(row(target, sources.len()));
        }

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize targets")?
            );
            return Ok(());
        }
        if rows.is_empty() {
            println!("No targets in {}.", self.config.display());
            return Ok(());
        }

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn row(target: &TargetConfig, sources: usize) -> TargetRow {
    let options = &target.options;
    let namespace = match &options.namespace {
        Namespace::Named(name) => name.clone(),
        Namespace::Disabled => "-".to_string(),
    };
    let mut mode = vec![if options.multiple { "multiple" } else { "single" }];
    if options.amd {
        mode.push("amd");
    }
    if options.prettify {
        mode.push("prettify");
    }
    TargetRow {
        name: target.name.to_string(),
        dest: target.dest.display().to_string(),
        namespace,
        mode: mode.join(", "),
        sources,
    }
}
