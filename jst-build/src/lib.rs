//! # jst-build
//!
//! Turns a target's source files into one JST module on disk.
//!
//! [`build_target`] compiles, assembles and writes one destination;
//! [`pipeline::run`] does the same for targets loaded from `jst.yaml`.
//! A destination is written whole or not at all.

pub mod assembler;
pub mod diff;
pub mod driver;
pub mod error;
pub mod pipeline;
pub mod unit;
pub mod writer;

pub use assembler::assemble;
pub use diff::{diff_target, DiffTargetResult, FileDiff};
pub use driver::{build_all, build_target, render_target, BuildTarget, Rendered, TargetReport};
pub use error::BuildError;
pub use pipeline::BuildScope;
pub use unit::{compile_file, CompilationTask, CompiledTemplate, FileOutput, Mode, Toolchain};
pub use writer::{atomic_write, WriteOutcome};
