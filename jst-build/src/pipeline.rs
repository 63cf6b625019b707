//! Shared pipeline entrypoint for `jst build` and `jst diff`.

use std::path::Path;

use jst_core::config;

use crate::diff::{diff_target, DiffTargetResult};
use crate::driver::{build_all, build_target, BuildTarget, TargetReport};
use crate::error::BuildError;
use crate::unit::Toolchain;

/// Which targets of a project file a run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildScope {
    /// Every target, in file order.
    All,
    /// A single named target.
    Target(String),
}

/// Load the project file at `config_path` and build `scope`.
pub fn run(config_path: &Path, scope: BuildScope, dry_run: bool) -> Result<Vec<TargetReport>, BuildError> {
    let project = config::load_at(config_path)?;
    let toolchain = Toolchain::default();
    match scope {
        BuildScope::All => build_all(&project, &toolchain, dry_run),
        BuildScope::Target(name) => {
            let target = BuildTarget::from_config(&project, project.target(&name)?);
            Ok(vec![build_target(&target, &toolchain, dry_run)?])
        }
    }
}

/// Load the project file at `config_path` and diff `scope`.
pub fn diff(config_path: &Path, scope: BuildScope) -> Result<Vec<DiffTargetResult>, BuildError> {
    let project = config::load_at(config_path)?;
    let toolchain = Toolchain::default();
    let targets: Vec<BuildTarget> = match scope {
        BuildScope::All => project
            .config
            .targets
            .iter()
            .map(|t| BuildTarget::from_config(&project, t))
            .collect(),
        BuildScope::Target(name) => vec![BuildTarget::from_config(&project, project.target(&name)?)],
    };
    targets
        .iter()
        .map(|t| diff_target(t, &toolchain))
        .collect()
}
