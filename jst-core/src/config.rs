//! Project file (`jst.yaml`) loading, saving, and source expansion.
//!
//! # Layout
//!
//! ```text
//! targets:
//!   - name: app
//!     dest: build/templates.js
//!     src: ["templates/**/*.html", "!templates/drafts/*.html"]
//!     options:
//!       namespace: App.Templates
//!       process_name: { strip_prefix: templates/, strip_extension: true }
//! ```
//!
//! Relative `dest` and `src` entries resolve against the directory holding
//! the project file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::types::{
    ContentProcessor, JstOptions, NameProcessor, Namespace, TargetName, TemplateSettings,
    DEFAULT_SEPARATOR,
};

/// Default project file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "jst.yaml";

static BETWEEN_TAGS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());

// ---------------------------------------------------------------------------
// 1. Serializable config
// ---------------------------------------------------------------------------

/// Root of the project file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

/// One destination and the sources compiled into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: TargetName,
    pub dest: PathBuf,
    #[serde(default)]
    pub src: Vec<String>,
    #[serde(default)]
    pub options: OptionsConfig,
}

/// On-disk form of [`JstOptions`]; closures are described declaratively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsConfig {
    pub namespace: Namespace,
    #[serde(skip_serializing_if = "TemplateSettings::is_default")]
    pub template_settings: TemplateSettings,
    #[serde(skip_serializing_if = "NameRules::is_identity")]
    pub process_name: NameRules,
    #[serde(skip_serializing_if = "ContentRules::is_identity")]
    pub process_content: ContentRules,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    pub multiple: bool,
    pub prettify: bool,
    pub amd: bool,
}

impl OptionsConfig {
    /// Build runtime options, turning the declarative rules into processors.
    pub fn to_options(&self) -> JstOptions {
        let process_name = if self.process_name.is_identity() {
            NameProcessor::identity()
        } else {
            let rules = self.process_name.clone();
            NameProcessor::new(move |path| rules.apply(path))
        };
        let process_content = if self.process_content.is_identity() {
            ContentProcessor::identity()
        } else {
            let rules = self.process_content.clone();
            ContentProcessor::new(move |src| rules.apply(src))
        };

        JstOptions {
            namespace: self.namespace.clone(),
            template_settings: self.template_settings.clone(),
            process_content,
            process_name,
            separator: self
                .separator
                .clone()
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            multiple: self.multiple,
            prettify: self.prettify,
            amd: self.amd,
        }
    }
}

/// Declarative `process_name`: path → template key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NameRules {
    /// Removed from the start of the path when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_prefix: Option<String>,
    /// Drop the final `.ext` of the file name.
    pub strip_extension: bool,
    /// Prepended after the other rules run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl NameRules {
    pub fn is_identity(&self) -> bool {
        self == &NameRules::default()
    }

    pub fn apply(&self, path: &str) -> String {
        let mut name = path;
        if let Some(prefix) = self.strip_prefix.as_deref() {
            name = name.strip_prefix(prefix).unwrap_or(name);
        }
        if self.strip_extension {
            let file_start = name.rfind('/').map(|i| i + 1).unwrap_or(0);
            if let Some(dot) = name[file_start..].rfind('.').filter(|&i| i > 0) {
                name = &name[..file_start + dot];
            }
        }
        match self.prefix.as_deref() {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }
}

/// Declarative `process_content`: raw text → raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentRules {
    /// Trim leading and trailing whitespace.
    pub trim: bool,
    /// Collapse whitespace runs between tags (`>\s+<` → `><`).
    pub collapse_whitespace: bool,
}

impl ContentRules {
    pub fn is_identity(&self) -> bool {
        self == &ContentRules::default()
    }

    pub fn apply(&self, src: &str) -> String {
        let mut out = if self.collapse_whitespace {
            BETWEEN_TAGS_RE.replace_all(src, "><").into_owned()
        } else {
            src.to_string()
        };
        if self.trim {
            out = out.trim().to_string();
        }
        out
    }
}

// ---------------------------------------------------------------------------
// 2. Loaded project
// ---------------------------------------------------------------------------

/// A parsed project file together with its location.
#[derive(Debug, Clone)]
pub struct Project {
    /// Path of the project file itself.
    pub path: PathBuf,
    /// Directory that relative `src` / `dest` entries resolve against.
    pub base_dir: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Result<&TargetConfig, ConfigError> {
        self.config
            .targets
            .iter()
            .find(|t| t.name.0 == name)
            .ok_or_else(|| ConfigError::UnknownTarget {
                name: name.to_string(),
            })
    }

    /// Destination path for `target`, resolved against [`Project::base_dir`].
    pub fn dest_path(&self, target: &TargetConfig) -> PathBuf {
        self.base_dir.join(&target.dest)
    }
}

// ---------------------------------------------------------------------------
// 3. Load / save
// ---------------------------------------------------------------------------

/// Load and validate the project file at `path`.
///
/// Returns `ConfigError::ConfigNotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<Project, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let config: ProjectConfig = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut seen = HashSet::new();
    for target in &config.targets {
        if !seen.insert(target.name.0.as_str()) {
            return Err(ConfigError::DuplicateTarget {
                name: target.name.0.clone(),
            });
        }
    }

    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(Project {
        path: path.to_path_buf(),
        base_dir,
        config,
    })
}

/// Atomically save `config` to `path`.
///
/// Write flow: serialize → `<name>.tmp` sibling → `rename`.
pub fn save_at(path: &Path, config: &ProjectConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp, yaml).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

/// A one-target project used by `jst init`.
pub fn starter_config() -> ProjectConfig {
    ProjectConfig {
        targets: vec![TargetConfig {
            name: TargetName::from("templates"),
            dest: PathBuf::from("build/templates.js"),
            src: vec!["templates/**/*.html".to_string()],
            options: OptionsConfig {
                process_name: NameRules {
                    strip_prefix: Some("templates/".to_string()),
                    strip_extension: true,
                    prefix: None,
                },
                ..OptionsConfig::default()
            },
        }],
    }
}

// ---------------------------------------------------------------------------
// 4. Source expansion
// ---------------------------------------------------------------------------

/// Expand a target's `src` list into relative paths, in order.
///
/// - plain entries are kept verbatim, even when the file does not exist
///   (the build reports them as missing);
/// - entries containing `*`, `?` or `[` are globbed and sorted;
/// - `!pattern` removes everything matched so far;
/// - duplicates are dropped, first occurrence wins.
pub fn expand_sources(base_dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, ConfigError> {
    let mut out: Vec<PathBuf> = Vec::new();
    for raw in patterns {
        if let Some(negated) = raw.strip_prefix('!') {
            let pattern = glob::Pattern::new(negated).map_err(|e| ConfigError::InvalidPattern {
                pattern: raw.clone(),
                message: e.to_string(),
            })?;
            out.retain(|p| !pattern.matches_path(p));
            continue;
        }

        if !is_glob(raw) {
            push_unique(&mut out, PathBuf::from(raw));
            continue;
        }

        let full = base_dir.join(raw);
        let full = full.to_string_lossy();
        let entries = glob::glob(&full).map_err(|e| ConfigError::InvalidPattern {
            pattern: raw.clone(),
            message: e.to_string(),
        })?;
        let mut matched = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_err(e.path().to_path_buf(), e.into_error()))?;
            if path.is_file() {
                let rel = path
                    .strip_prefix(base_dir)
                    .map(Path::to_path_buf)
                    .unwrap_or(path);
                matched.push(rel);
            }
        }
        matched.sort();
        for path in matched {
            push_unique(&mut out, path);
        }
    }
    Ok(out)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn push_unique(out: &mut Vec<PathBuf>, path: PathBuf) {
    if !out.contains(&path) {
        out.push(path);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
