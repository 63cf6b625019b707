//! Error types for jst-compiler.

use thiserror::Error;

/// All errors a template compiler can surface.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A delimiter setting is not a valid regular expression.
    #[error("invalid `{name}` delimiter: {source}")]
    InvalidDelimiter {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    /// A delimiter must capture exactly one group: the embedded code.
    #[error("`{name}` delimiter must have exactly one capture group, found {found}")]
    DelimiterGroups { name: &'static str, found: usize },

    /// `variable` is not a plain JavaScript identifier.
    #[error("template variable '{name}' is not a valid identifier")]
    InvalidVariable { name: String },

    /// Generated function source is structurally broken.
    #[error("syntax error on line {line}: {message}")]
    Syntax { message: String, line: usize },
}
