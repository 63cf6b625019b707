//! Template compilers: the [`TemplateCompiler`] capability and
//! [`LodashCompiler`].
//!
//! # Generated source
//!
//! `LodashCompiler` emits the same function source as lodash 2.4's
//! `_.template(text, false, settings).source`:
//!
//! ```text
//! function(obj) {
//! obj || (obj = {});
//! var __t, __p = '', __e = _.escape;
//! with (obj) {
//! __p +=
//! ((__t = ( x )) == null ? '' : __t);
//!
//! }
//! return __p
//! }
//! ```
//!
//! | tag            | emitted                                   |
//! |----------------|-------------------------------------------|
//! | `<%- code %>`  | `' +\n__e(code) +\n'`                      |
//! | `<%= code %>`  | `' +\n((__t = (code)) == null ? '' : __t) +\n'` |
//! | `${code}`      | same as `<%= %>` (default interpolate only) |
//! | `<% code %>`   | `';\ncode;\n__p += '`                     |

use std::sync::LazyLock;

use regex::Regex;

use jst_core::TemplateSettings;

use crate::error::CompileError;
use crate::syntax;

const DEFAULT_ESCAPE: &str = r"<%-([\s\S]+?)%>";
const DEFAULT_EVALUATE: &str = r"<%([\s\S]+?)%>";
const DEFAULT_INTERPOLATE: &str = r"<%=([\s\S]+?)%>";
const ES_TEMPLATE: &str = r"\$\{([^\\}]*(?:\\.[^\\}]*)*)\}";

const DEFAULT_VARIABLE: &str = "obj";

static EMPTY_LEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b__p \+= '';").unwrap());
static EMPTY_MIDDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(__p \+=) '' \+").unwrap());
static EMPTY_TRAILING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(__e\(.*?\)|\b__t\)) \+\n'';").unwrap());
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

// ---------------------------------------------------------------------------
// TemplateCompiler
// ---------------------------------------------------------------------------

/// Turns template text into JavaScript function source.
///
/// Implementations only produce source text; nothing is evaluated.
pub trait TemplateCompiler {
    /// Compile `text` into a free-standing function expression.
    fn compile(&self, text: &str, settings: &TemplateSettings) -> Result<String, CompileError>;

    /// Reject settings up front, before any file is read.
    fn validate(&self, _settings: &TemplateSettings) -> Result<(), CompileError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Delimiters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Escape,
    Interpolate,
    Evaluate,
}

/// All delimiters merged into one alternation; group `i + 1` is `tags[i]`.
struct Delimiters {
    regex: Regex,
    tags: Vec<Tag>,
}

impl Delimiters {
    fn from_settings(settings: &TemplateSettings) -> Result<Self, CompileError> {
        let interpolate = settings.interpolate.as_deref().unwrap_or(DEFAULT_INTERPOLATE);
        let mut parts = vec![
            (
                Tag::Escape,
                "escape",
                settings.escape.as_deref().unwrap_or(DEFAULT_ESCAPE),
            ),
            (Tag::Interpolate, "interpolate", interpolate),
        ];
        if interpolate == DEFAULT_INTERPOLATE {
            parts.push((Tag::Interpolate, "es_template", ES_TEMPLATE));
        }
        parts.push((
            Tag::Evaluate,
            "evaluate",
            settings.evaluate.as_deref().unwrap_or(DEFAULT_EVALUATE),
        ));

        let mut alternatives = Vec::with_capacity(parts.len());
        let mut tags = Vec::with_capacity(parts.len());
        for (tag, name, pattern) in parts {
            let single =
                Regex::new(pattern).map_err(|source| CompileError::InvalidDelimiter { name, source })?;
            let groups = single.captures_len() - 1;
            if groups != 1 {
                return Err(CompileError::DelimiterGroups { name, found: groups });
            }
            alternatives.push(format!("(?:{pattern})"));
            tags.push(tag);
        }

        let regex = Regex::new(&alternatives.join("|")).map_err(|source| {
            CompileError::InvalidDelimiter {
                name: "combined",
                source,
            }
        })?;
        Ok(Delimiters { regex, tags })
    }
}

// ---------------------------------------------------------------------------
// LodashCompiler
// ---------------------------------------------------------------------------

/// Compiler matching lodash 2.4 `_.template` source output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LodashCompiler;

impl LodashCompiler {
    pub fn new() -> Self {
        LodashCompiler
    }
}

impl TemplateCompiler for LodashCompiler {
    fn compile(&self, text: &str, settings: &TemplateSettings) -> Result<String, CompileError> {
        let delimiters = Delimiters::from_settings(settings)?;
        let variable = variable_name(settings)?;

        let mut body = String::from("__p += '");
        let mut index = 0;
        let mut evaluating = false;

        for caps in delimiters.regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            escape_literal(&text[index..whole.start()], &mut body);

            let matched = delimiters
                .tags
                .iter()
                .enumerate()
                .find_map(|(i, tag)| caps.get(i + 1).map(|m| (*tag, m.as_str())));
            match matched {
                Some((_, "")) | None => {}
                Some((Tag::Escape, code)) => {
                    body.push_str("' +\n__e(");
                    body.push_str(code);
                    body.push_str(") +\n'");
                }
                Some((Tag::Evaluate, code)) => {
                    evaluating = true;
                    body.push_str("';\n");
                    body.push_str(code);
                    body.push_str(";\n__p += '");
                }
                Some((Tag::Interpolate, code)) => {
                    body.push_str("' +\n((__t = (");
                    body.push_str(code);
                    body.push_str(")) == null ? '' : __t) +\n'");
                }
            }
            index = whole.end();
        }
        escape_literal(&text[index..], &mut body);
        body.push_str("';\n");

        let name = variable.unwrap_or(DEFAULT_VARIABLE);
        if variable.is_none() {
            body = format!("with ({name}) {{\n{body}\n}}\n");
        }
        if evaluating {
            body = EMPTY_LEADING_RE.replace_all(&body, "").into_owned();
        }
        body = EMPTY_MIDDLE_RE.replace_all(&body, "$1").into_owned();
        body = EMPTY_TRAILING_RE.replace_all(&body, "$1;").into_owned();

        let mut source = format!("function({name}) {{\n");
        if variable.is_none() {
            source.push_str(&format!("{name} || ({name} = {{}});\n"));
        }
        source.push_str("var __t, __p = '', __e = _.escape");
        if evaluating {
            source.push_str(
                ", __j = Array.prototype.join;\nfunction print() { __p += __j.call(arguments, '') }\n",
            );
        } else {
            source.push_str(";\n");
        }
        source.push_str(&body);
        source.push_str("return __p\n}");

        syntax::check(&source)?;
        tracing::trace!(bytes = source.len(), "compiled template");
        Ok(source)
    }

    fn validate(&self, settings: &TemplateSettings) -> Result<(), CompileError> {
        Delimiters::from_settings(settings)?;
        variable_name(settings)?;
        Ok(())
    }
}

fn variable_name(settings: &TemplateSettings) -> Result<Option<&str>, CompileError> {
    match settings.variable.as_deref().filter(|v| !v.is_empty()) {
        Some(v) if IDENTIFIER_RE.is_match(v) => Ok(Some(v)),
        Some(v) => Err(CompileError::InvalidVariable {
            name: v.to_string(),
        }),
        None => Ok(None),
    }
}

/// Append `text` as the inside of a single-quoted JS string literal.
fn escape_literal(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
