//! Compiler adapter, the single call site between the build and a
//! [`TemplateCompiler`].

use jst_core::TemplateSettings;

use crate::engine::TemplateCompiler;
use crate::error::CompileError;

/// Compile one template body to function source.
///
/// With `prettify`, every `\n` is removed from the result. This is a plain
/// text substitution: a `//` comment or a newline-terminated statement in
/// embedded code changes meaning once joined onto one line.
pub fn compile_template(
    compiler: &dyn TemplateCompiler,
    text: &str,
    settings: &TemplateSettings,
    prettify: bool,
) -> Result<String, CompileError> {
    let source = compiler.compile(text, settings)?;
    if prettify {
        Ok(source.replace('\n', ""))
    } else {
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LodashCompiler;

    #[test]
    fn prettify_strips_every_newline() {
        let settings = TemplateSettings::default();
        let pretty = compile_template(&LodashCompiler, "<%= x %>\n<p>", &settings, true).unwrap();
        assert!(!pretty.contains('\n'));
        assert!(pretty.starts_with("function(obj) {obj || (obj = {});var __t"));
        // Newlines inside the template text are escaped, so they survive as `\n`.
        assert!(pretty.contains("'\\n<p>'"));
    }

    #[test]
    fn plain_mode_is_the_compiler_output() {
        let settings = TemplateSettings::default();
        let plain = compile_template(&LodashCompiler, "<%= x %>", &settings, false).unwrap();
        assert_eq!(plain, LodashCompiler.compile("<%= x %>", &settings).unwrap());
    }

    #[test]
    fn compiler_errors_pass_through() {
        let err = compile_template(
            &LodashCompiler,
            "<% if (x) { %>",
            &TemplateSettings::default(),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Syntax { .. }));
    }
}
