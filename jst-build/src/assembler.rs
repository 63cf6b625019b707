//! Output assembly: ordered [`FileOutput`]s to the text of one JST module.

use jst_core::{namespace::quote, ConfigError, JstOptions, NamespaceInfo};

use crate::error::BuildError;
use crate::unit::{CompiledTemplate, FileOutput};

const AMD_OPEN: &str = "define(function(){";
const AMD_CLOSE: &str = "});";

/// Build the destination text, or `None` when nothing survived compilation.
///
/// `namespace` is the resolved namespace, `None` when disabled. A disabled
/// namespace is only meaningful under AMD, where the module returns its single
/// template directly.
pub fn assemble(
    outputs: &[FileOutput],
    namespace: Option<&NamespaceInfo>,
    options: &JstOptions,
) -> Result<Option<String>, BuildError> {
    let mut entries = match namespace {
        Some(ns) => namespaced_entries(outputs, ns),
        None => {
            if !options.amd {
                return Err(ConfigError::NamespaceRequiresAmd.into());
            }
            bare_return(outputs)?.into_iter().collect()
        }
    };

    if entries.is_empty() {
        return Ok(None);
    }

    if let Some(ns) = namespace {
        if !ns.declaration.is_empty() {
            entries.insert(0, ns.declaration.clone());
        }
    }

    if options.amd {
        if options.prettify {
            for entry in entries.iter_mut() {
                entry.insert_str(0, "  ");
            }
        }
        entries.insert(0, AMD_OPEN.to_string());
        if let Some(ns) = namespace {
            entries.push(format!("  return {};", ns.namespace_expr));
        }
        entries.push(AMD_CLOSE.to_string());
    }

    let separator = options.separator.replace("\r\n", "\n");
    Ok(Some(entries.join(&separator)))
}

fn namespaced_entries(outputs: &[FileOutput], ns: &NamespaceInfo) -> Vec<String> {
    let mut entries = Vec::new();
    for output in outputs {
        match output {
            FileOutput::Single(template) => {
                if let Some(source) = non_empty(template) {
                    entries.push(format!(
                        "{}[{}] = {};",
                        ns.namespace_expr,
                        quote(&template.source_identifier),
                        source
                    ));
                }
            }
            FileOutput::Multi { name, templates } => {
                let lines: Vec<String> = templates
                    .iter()
                    .filter_map(|t| {
                        non_empty(t).map(|source| {
                            format!(
                                "{}[{}]={};",
                                ns.namespace_expr,
                                quote(&t.source_identifier),
                                source
                            )
                        })
                    })
                    .collect();
                if lines.is_empty() {
                    tracing::debug!("{name}: no templates, skipped");
                    continue;
                }
                entries.push(format!("// {}\n{}", quote(name), lines.join("\n")));
            }
        }
    }
    entries
}

fn bare_return(outputs: &[FileOutput]) -> Result<Option<String>, BuildError> {
    let sources: Vec<&str> = outputs
        .iter()
        .flat_map(FileOutput::templates)
        .filter_map(non_empty)
        .collect();
    match sources.as_slice() {
        [] => Ok(None),
        [source] => Ok(Some(format!("return {source};"))),
        _ => Err(BuildError::AmbiguousOutput {
            count: sources.len(),
        }),
    }
}

fn non_empty(template: &CompiledTemplate) -> Option<&str> {
    let source = template.function_source.as_str();
    if source.trim().is_empty() {
        tracing::warn!(
            "template {} compiled to nothing, dropped",
            quote(&template.source_identifier)
        );
        None
    } else {
        Some(source)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
