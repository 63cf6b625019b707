//! Error types for jst-build.

use std::path::PathBuf;

use thiserror::Error;

use jst_compiler::CompileError;
use jst_core::ConfigError;

/// All hard failures of a build. Soft conditions (missing sources, empty
/// output) are reported in [`crate::TargetReport`] instead.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Invalid options or project file.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The compiler rejected the target's template settings.
    #[error("invalid template settings for target '{target}': {source}")]
    Settings {
        target: String,
        #[source]
        source: CompileError,
    },

    /// A template failed to compile; the whole destination is abandoned.
    #[error("JST \"{}\" failed to compile{}", path.display(), fragment_suffix(fragment))]
    Compile {
        path: PathBuf,
        fragment: Option<String>,
        #[source]
        source: CompileError,
    },

    /// `namespace: false` under AMD can only return a single template.
    #[error("`namespace: false` with AMD needs exactly one template, found {count}")]
    AmbiguousOutput { count: usize },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn fragment_suffix(fragment: &Option<String>) -> String {
    match fragment {
        Some(id) => format!(" (template \"{id}\")"),
        None => String::new(),
    }
}

/// Convenience constructor for [`BuildError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.into(),
        source,
    }
}
