//! Namespace resolution.
//!
//! `App.Templates` resolves to
//!
//! ```text
//! this["App"] = this["App"] || {};
//! this["App"]["Templates"] = this["App"]["Templates"] || {};
//! ```
//!
//! with `this["App"]["Templates"]` as the namespace expression. Every segment
//! is guarded with `|| {}` so separate builds targeting sibling namespaces
//! never clobber each other.

use crate::error::ConfigError;

/// Root object that namespaces hang from.
const ROOT: &str = "this";

/// Resolved namespace: declaration statements plus the deepest expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceInfo {
    /// `\n`-joined statements; empty when the namespace is the root itself.
    pub declaration: String,
    /// Expression naming the deepest segment.
    pub namespace_expr: String,
}

/// Resolve a dotted namespace.
///
/// Fails with [`ConfigError::EmptyNamespace`] for blank input and
/// [`ConfigError::EmptyNamespaceSegment`] for `A..B`-style names.
pub fn resolve(namespace: &str) -> Result<NamespaceInfo, ConfigError> {
    let trimmed = namespace.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyNamespace);
    }

    let mut statements = Vec::new();
    let mut path = ROOT.to_string();
    for segment in trimmed.split('.').map(str::trim) {
        if segment.is_empty() {
            return Err(ConfigError::EmptyNamespaceSegment {
                namespace: namespace.to_string(),
            });
        }
        if segment == ROOT {
            continue;
        }
        path.push('[');
        path.push_str(&quote(segment));
        path.push(']');
        statements.push(format!("{path} = {path} || {{}};"));
    }

    Ok(NamespaceInfo {
        declaration: statements.join("\n"),
        namespace_expr: path,
    })
}

/// JSON string literal, which doubles as a JS string literal.
pub fn quote(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment() {
        let info = resolve("JST").unwrap();
        assert_eq!(info.declaration, "this[\"JST\"] = this[\"JST\"] || {};");
        assert_eq!(info.namespace_expr, "this[\"JST\"]");
    }

    #[test]
    fn nested_segments_declared_in_order() {
        let info = resolve("App.Templates").unwrap();
        let lines: Vec<&str> = info.declaration.lines().collect();
        assert_eq!(
            lines,
            vec![
                "this[\"App\"] = this[\"App\"] || {};",
                "this[\"App\"][\"Templates\"] = this[\"App\"][\"Templates\"] || {};",
            ]
        );
        assert_eq!(info.namespace_expr, "this[\"App\"][\"Templates\"]");
    }

    #[test]
    fn explicit_root_is_skipped() {
        let info = resolve("this").unwrap();
        assert!(info.declaration.is_empty());
        assert_eq!(info.namespace_expr, "this");

        let info = resolve("this.JST").unwrap();
        assert_eq!(info.namespace_expr, "this[\"JST\"]");
    }

    #[test]
    fn blank_namespace_fails_fast() {
        assert!(matches!(resolve(""), Err(ConfigError::EmptyNamespace)));
        assert!(matches!(resolve("   "), Err(ConfigError::EmptyNamespace)));
    }

    #[test]
    fn empty_segment_fails_fast() {
        let err = resolve("App..Templates").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyNamespaceSegment { .. }));
        assert!(err.to_string().contains("App..Templates"));
        assert!(resolve(".App").is_err());
    }

    #[test]
    fn segments_are_json_quoted() {
        let info = resolve("my-app.\"q\"").unwrap();
        assert_eq!(info.namespace_expr, "this[\"my-app\"][\"\\\"q\\\"\"]");
    }
}
