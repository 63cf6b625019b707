//! Option types for a single JST destination.
//!
//! [`JstOptions`] is the in-memory form consumed by the build pipeline. Its
//! defaults mirror the documented option table:
//!
//! | option              | default          |
//! |---------------------|------------------|
//! | `namespace`         | `"JST"`          |
//! | `template_settings` | lodash defaults  |
//! | `process_content`   | identity         |
//! | `process_name`      | identity         |
//! | `separator`         | `"\n\n"`         |
//! | `multiple`          | `false`          |
//! | `prettify`          | `false`          |
//! | `amd`               | `false`          |

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::namespace::{self, NamespaceInfo};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "JST";

/// Separator placed between output statements when none is configured.
pub const DEFAULT_SEPARATOR: &str = "\n\n";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a build target in the project file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetName(pub String);

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TargetName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TargetName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Namespace
// ---------------------------------------------------------------------------

/// Where compiled templates are attached.
///
/// Serialized as either a dotted string or the literal `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NamespaceRepr", into = "NamespaceRepr")]
pub enum Namespace {
    /// Dotted object path, e.g. `App.Templates`.
    Named(String),
    /// `namespace: false`: templates are returned from the AMD wrapper.
    Disabled,
}

impl Namespace {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Namespace::Named(_))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Namespace::Named(name) => Some(name),
            Namespace::Disabled => None,
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Namespace::Named(DEFAULT_NAMESPACE.to_string())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Named(name) => name.fmt(f),
            Namespace::Disabled => write!(f, "false"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NamespaceRepr {
    Flag(bool),
    Name(String),
}

impl TryFrom<NamespaceRepr> for Namespace {
    type Error = ConfigError;

    fn try_from(repr: NamespaceRepr) -> Result<Self, Self::Error> {
        match repr {
            NamespaceRepr::Flag(false) => Ok(Namespace::Disabled),
            NamespaceRepr::Flag(true) => Err(ConfigError::InvalidNamespace {
                found: "true".to_string(),
            }),
            NamespaceRepr::Name(name) => Ok(Namespace::Named(name)),
        }
    }
}

impl From<Namespace> for NamespaceRepr {
    fn from(ns: Namespace) -> Self {
        match ns {
            Namespace::Named(name) => NamespaceRepr::Name(name),
            Namespace::Disabled => NamespaceRepr::Flag(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Template settings
// ---------------------------------------------------------------------------

/// Settings forwarded verbatim to the template compiler.
///
/// Delimiters are regular-expression sources with a single capture group.
/// `None` selects the compiler's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolate: Option<String>,
    /// Data object name; when set the compiled body skips the `with` block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
}

impl TemplateSettings {
    pub fn is_default(&self) -> bool {
        self == &TemplateSettings::default()
    }
}

// ---------------------------------------------------------------------------
// Processors
// ---------------------------------------------------------------------------

type TextFn = dyn Fn(&str) -> String + Send + Sync;

/// Transform applied to raw template text before compilation.
#[derive(Clone)]
pub struct ContentProcessor(Arc<TextFn>);

impl ContentProcessor {
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn identity() -> Self {
        Self::new(str::to_owned)
    }

    pub fn apply(&self, src: &str) -> String {
        (self.0)(src)
    }
}

impl Default for ContentProcessor {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for ContentProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentProcessor(..)")
    }
}

/// Maps a source path to the key its template is stored under.
#[derive(Clone)]
pub struct NameProcessor(Arc<TextFn>);

impl NameProcessor {
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn identity() -> Self {
        Self::new(str::to_owned)
    }

    pub fn apply(&self, path: &str) -> String {
        (self.0)(path)
    }
}

impl Default for NameProcessor {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for NameProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NameProcessor(..)")
    }
}

// ---------------------------------------------------------------------------
// JstOptions
// ---------------------------------------------------------------------------

/// Fully-resolved options for one destination.
#[derive(Debug, Clone)]
pub struct JstOptions {
    pub namespace: Namespace,
    pub template_settings: TemplateSettings,
    pub process_content: ContentProcessor,
    pub process_name: NameProcessor,
    pub separator: String,
    /// Extract `<script type="text/template">` fragments instead of
    /// compiling each file as one template.
    pub multiple: bool,
    /// Strip newlines from compiled source and indent AMD output.
    pub prettify: bool,
    /// Wrap output in `define(function(){ ... });`.
    pub amd: bool,
}

impl Default for JstOptions {
    fn default() -> Self {
        Self {
            namespace: Namespace::default(),
            template_settings: TemplateSettings::default(),
            process_content: ContentProcessor::identity(),
            process_name: NameProcessor::identity(),
            separator: DEFAULT_SEPARATOR.to_string(),
            multiple: false,
            prettify: false,
            amd: false,
        }
    }
}

impl JstOptions {
    /// Check the namespace/AMD combination and resolve the namespace.
    ///
    /// Returns `None` when namespacing is disabled (only allowed with AMD).
    pub fn validate(&self) -> Result<Option<NamespaceInfo>, ConfigError> {
        match &self.namespace {
            Namespace::Named(name) => namespace::resolve(name).map(Some),
            Namespace::Disabled if self.amd => Ok(None),
            Namespace::Disabled => Err(ConfigError::NamespaceRequiresAmd),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(TargetName::from("app").to_string(), "app");
        assert_eq!(TargetName::from(String::from("x")), TargetName::from("x"));
    }

    #[test]
    fn defaults_match_option_table() {
        let opts = JstOptions::default();
        assert_eq!(opts.namespace, Namespace::Named("JST".to_string()));
        assert_eq!(opts.separator, "\n\n");
        assert!(!opts.multiple && !opts.prettify && !opts.amd);
        assert!(opts.template_settings.is_default());
        assert_eq!(opts.process_content.apply("<p>"), "<p>");
        assert_eq!(opts.process_name.apply("a/b.html"), "a/b.html");
    }

    #[test]
    fn namespace_yaml_accepts_string_and_false() {
        let named: Namespace = serde_yaml::from_str("App.Templates").unwrap();
        assert_eq!(named, Namespace::Named("App.Templates".to_string()));
        let disabled: Namespace = serde_yaml::from_str("false").unwrap();
        assert_eq!(disabled, Namespace::Disabled);
        assert_eq!(serde_yaml::to_string(&Namespace::Disabled).unwrap().trim(), "false");
    }

    #[test]
    fn namespace_yaml_rejects_true() {
        let err = serde_yaml::from_str::<Namespace>("true").unwrap_err();
        assert!(err.to_string().contains("invalid namespace"), "got: {err}");
    }

    #[test]
    fn disabled_namespace_without_amd_is_rejected() {
        let opts = JstOptions {
            namespace: Namespace::Disabled,
            ..JstOptions::default()
        };
        assert!(matches!(opts.validate(), Err(ConfigError::NamespaceRequiresAmd)));

        let amd = JstOptions {
            namespace: Namespace::Disabled,
            amd: true,
            ..JstOptions::default()
        };
        assert!(amd.validate().unwrap().is_none());
    }

    #[test]
    fn custom_processors_are_applied() {
        let upper = ContentProcessor::new(|s| s.to_uppercase());
        assert_eq!(upper.apply("abc"), "ABC");
        let stem = NameProcessor::new(|p| p.trim_end_matches(".html").to_string());
        assert_eq!(stem.apply("tpl/a.html"), "tpl/a");
    }
}
