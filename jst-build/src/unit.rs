//! File compilation unit: one source file in, one [`FileOutput`] out.

use std::path::{Path, PathBuf};

use jst_compiler::{
    compile_template, extract, CompileError, FragmentParser, LodashCompiler, ScriptTagParser,
    TemplateCompiler,
};
use jst_core::JstOptions;

use crate::error::BuildError;

// ---------------------------------------------------------------------------
// Toolchain
// ---------------------------------------------------------------------------

/// The compiler and fragment parser a build runs with.
pub struct Toolchain {
    pub compiler: Box<dyn TemplateCompiler>,
    pub parser: Box<dyn FragmentParser>,
}

impl Toolchain {
    pub fn new(compiler: Box<dyn TemplateCompiler>, parser: Box<dyn FragmentParser>) -> Self {
        Toolchain { compiler, parser }
    }
}

impl Default for Toolchain {
    /// lodash-compatible compiler + `<script type="text/template">` parser.
    fn default() -> Self {
        Toolchain::new(Box::new(LodashCompiler), Box::new(ScriptTagParser::new()))
    }
}

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// How a source file is turned into templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The whole file is one template.
    Single,
    /// The file holds identified `<script>` fragments.
    Multi,
}

impl Mode {
    pub fn for_options(options: &JstOptions) -> Self {
        if options.multiple {
            Mode::Multi
        } else {
            Mode::Single
        }
    }
}

/// One existing source file, read and ready to compile.
#[derive(Debug, Clone)]
pub struct CompilationTask {
    /// Path as listed in the target; also the input to `process_name`.
    pub source_path: PathBuf,
    pub raw_source: String,
    pub mode: Mode,
}

/// A compiled template keyed by file name or fragment id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    pub source_identifier: String,
    pub function_source: String,
}

/// Everything one source file contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutput {
    Single(CompiledTemplate),
    Multi {
        /// Transformed file name, used for the file-level comment.
        name: String,
        templates: Vec<CompiledTemplate>,
    },
}

impl FileOutput {
    pub fn templates(&self) -> &[CompiledTemplate] {
        match self {
            FileOutput::Single(template) => std::slice::from_ref(template),
            FileOutput::Multi { templates, .. } => templates,
        }
    }
}

// ---------------------------------------------------------------------------
// compile_file
// ---------------------------------------------------------------------------

/// Compile one source file.
///
/// Any compile failure aborts with [`BuildError::Compile`]; in multi mode the
/// error names the enclosing file and carries the fragment id as context.
pub fn compile_file(
    task: &CompilationTask,
    options: &JstOptions,
    toolchain: &Toolchain,
) -> Result<FileOutput, BuildError> {
    let content = options.process_content.apply(&task.raw_source);
    let name = options.process_name.apply(&display_path(&task.source_path));
    let compile = |text: &str| {
        compile_template(
            toolchain.compiler.as_ref(),
            text,
            &options.template_settings,
            options.prettify,
        )
    };

    match task.mode {
        Mode::Single => {
            let function_source =
                compile(&content).map_err(|e| compile_failed(&task.source_path, None, e))?;
            Ok(FileOutput::Single(CompiledTemplate {
                source_identifier: name,
                function_source,
            }))
        }
        Mode::Multi => {
            let mut templates = Vec::new();
            for fragment in extract(toolchain.parser.as_ref(), &content) {
                let function_source = compile(fragment.text).map_err(|e| {
                    compile_failed(&task.source_path, Some(fragment.id.as_str()), e)
                })?;
                templates.push(CompiledTemplate {
                    source_identifier: fragment.id,
                    function_source,
                });
            }
            tracing::debug!(
                "{}: {} template(s) extracted",
                task.source_path.display(),
                templates.len()
            );
            Ok(FileOutput::Multi { name, templates })
        }
    }
}

/// Forward-slash form of `path`, stable across platforms.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn compile_failed(path: &Path, fragment: Option<&str>, source: CompileError) -> BuildError {
    tracing::error!("{source}");
    tracing::error!("JST \"{}\" failed to compile.", path.display());
    BuildError::Compile {
        path: path.to_path_buf(),
        fragment: fragment.map(str::to_string),
        source,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
