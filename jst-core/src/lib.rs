//! jst core library — option types, namespace resolution, project config.
//!
//! - [`types`] — [`JstOptions`] and its parts
//! - [`namespace`] — dotted namespace → declaration + expression
//! - [`config`] — `jst.yaml` load / save / source expansion
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod namespace;
pub mod types;

pub use config::{Project, ProjectConfig, TargetConfig};
pub use error::ConfigError;
pub use namespace::NamespaceInfo;
pub use types::{
    ContentProcessor, JstOptions, NameProcessor, Namespace, TargetName, TemplateSettings,
};
