//! `jst init [DIR]` — write a starter `jst.yaml`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use jst_core::config::{self, CONFIG_FILE_NAME};

/// Arguments for `jst init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the project file in.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing project file.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE_NAME);
        if path.exists() && !self.force {
            bail!(
                "{} already exists; pass --force to overwrite",
                path.display()
            );
        }

        let starter = config::starter_config();
        config::save_at(&path, &starter)
            .with_context(|| format!("failed to write {}", path.display()))?;

        println!("✓ Wrote {}", path.display());
        for target in &starter.targets {
            println!(
                "  target '{}': {} → {}",
                target.name,
                target.src.join(", "),
                target.dest.display()
            );
        }
        Ok(())
    }
}
