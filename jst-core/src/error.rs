//! Error types for jst-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from option validation and config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Namespace enabled but empty or whitespace-only.
    #[error("namespace must contain at least one segment")]
    EmptyNamespace,

    /// A dotted namespace with an empty segment, e.g. `App..Templates`.
    #[error("namespace '{namespace}' contains an empty segment")]
    EmptyNamespaceSegment { namespace: String },

    /// `namespace` was neither a string nor `false`.
    #[error("invalid namespace {found}; expected a dotted name or `false`")]
    InvalidNamespace { found: String },

    /// `namespace: false` without `amd: true` leaves nothing to assign to.
    #[error("`namespace: false` is only valid together with `amd: true`")]
    NamespaceRequiresAmd,

    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project file did not exist at the expected path.
    #[error("config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// YAML parse error on load, with path and serde_yaml's line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `src` entry is not a valid glob pattern.
    #[error("invalid source pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// No target with this name in the project file.
    #[error("unknown target '{name}'")]
    UnknownTarget { name: String },

    /// Two targets share a name.
    #[error("target '{name}' is defined more than once")]
    DuplicateTarget { name: String },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
