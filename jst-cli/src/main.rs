//! jst — compile underscore/lodash templates into a JST module.
//!
//! # Usage
//!
//! ```text
//! jst build [TARGET] [--config jst.yaml] [--dry-run] [--json]
//! jst compile <FILES>... --dest <PATH> [--namespace NS | --no-namespace] [--amd] [--multiple] [--prettify] [--separator S] [--dry-run]
//! jst diff [TARGET] [--config jst.yaml]
//! jst targets [--config jst.yaml] [--json]
//! jst init [DIR] [--force]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    build::BuildArgs, compile::CompileArgs, diff::DiffArgs, init::InitArgs, targets::TargetsArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "jst",
    version,
    about = "Compile underscore/lodash templates into a single JST file",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build targets from the project file.
    Build(BuildArgs),

    /// Compile the given files into one destination, without a project file.
    Compile(CompileArgs),

    /// Show unified diff of what build would write.
    Diff(DiffArgs),

    /// List the targets in the project file.
    Targets(TargetsArgs),

    /// Write a starter project file.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Build(args) => args.run(),
        Commands::Compile(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Targets(args) => args.run(),
        Commands::Init(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
