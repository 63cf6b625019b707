//! Multi-template extraction from HTML documents.
//!
//! A source file in multi mode holds any number of
//!
//! ```html
//! <script type="text/template" id="user-row">
//!   <tr><td><%- name %></td></tr>
//! </script>
//! ```
//!
//! regions. [`extract`] yields one [`TemplateFragment`] per region that has
//! an `id`, in document order. Regions without an id are skipped silently.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `type` attribute value that marks a template region.
pub const TEMPLATE_TYPE: &str = "text/template";

static ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<!--.*?(?:-->|\z)|<script\b((?:[^>"']|"[^"]*"|'[^']*')*)>(.*?)</script\s*>"#)
        .unwrap()
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

/// A marked region as found in the document; `id` may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<'a> {
    pub id: Option<String>,
    pub body: &'a str,
}

/// A region that carries an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFragment<'a> {
    pub id: String,
    pub text: &'a str,
}

/// Finds marked template regions in a document.
pub trait FragmentParser {
    /// Regions in document order. Calling again restarts from the top.
    fn regions<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = Region<'a>> + 'a>;
}

/// Lazily yield the identified fragments of `text`.
pub fn extract<'a>(
    parser: &'a dyn FragmentParser,
    text: &'a str,
) -> impl Iterator<Item = TemplateFragment<'a>> + 'a {
    parser.regions(text).filter_map(|region| {
        let id = region.id.filter(|id| !id.is_empty())?;
        Some(TemplateFragment {
            id,
            text: region.body,
        })
    })
}

// ---------------------------------------------------------------------------
// ScriptTagParser
// ---------------------------------------------------------------------------

/// Matches `<script type="text/template">` elements, skipping HTML comments.
#[derive(Debug, Clone)]
pub struct ScriptTagParser {
    template_type: String,
}

impl ScriptTagParser {
    pub fn new() -> Self {
        Self::with_type(TEMPLATE_TYPE)
    }

    /// Match a different `type` value, e.g. `text/x-template`.
    pub fn with_type(template_type: impl Into<String>) -> Self {
        ScriptTagParser {
            template_type: template_type.into(),
        }
    }

    fn region<'a>(&self, caps: Captures<'a>) -> Option<Region<'a>> {
        let attrs = caps.get(1)?.as_str();
        let body = caps.get(2)?.as_str();
        let attrs = parse_attributes(attrs);
        let is_template = attribute(&attrs, "type").is_some_and(|t| t == self.template_type);
        if !is_template {
            return None;
        }
        Some(Region {
            id: attribute(&attrs, "id").map(str::to_string),
            body,
        })
    }
}

impl Default for ScriptTagParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentParser for ScriptTagParser {
    fn regions<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = Region<'a>> + 'a> {
        Box::new(
            ELEMENT_RE
                .captures_iter(text)
                .filter_map(move |caps| self.region(caps)),
        )
    }
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

/// First value for `name`; HTML ignores repeated attributes.
fn attribute<'v>(attrs: &'v [(String, String)], name: &str) -> Option<&'v str> {
    attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
