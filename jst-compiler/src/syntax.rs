//! Syntax check for generated function source.
//!
//! The source is parsed as a parenthesised expression in a classic
//! (non-module) script, so `with` blocks are accepted the same way a browser
//! evaluating the JST file would accept them. The first parse error becomes
//! [`CompileError::Syntax`], with the line counted in the generated source.

use swc_core::common::{sync::Lrc, FileName, SourceMap, Spanned};
use swc_core::ecma::ast::EsVersion;
use swc_core::ecma::parser::{error::Error as ParseError, lexer::Lexer, Parser, StringInput, Syntax};

use crate::error::CompileError;

/// Parse `source` as a single function expression.
pub fn check(source: &str) -> Result<(), CompileError> {
    let cm: Lrc<SourceMap> = Lrc::new(SourceMap::default());
    // Same line as the source, so reported lines need no offset.
    let fm = cm.new_source_file(
        FileName::Custom("template.js".into()).into(),
        format!("({source}\n)"),
    );
    let lexer = Lexer::new(
        Syntax::Es(Default::default()),
        EsVersion::latest(),
        StringInput::from(&*fm),
        None,
    );
    let mut parser = Parser::new_from(lexer);

    let parsed = parser.parse_script();
    let recovered = parser.take_errors();
    match parsed {
        Err(err) => Err(syntax(&cm, &err)),
        Ok(_) => match recovered.first() {
            Some(err) => Err(syntax(&cm, err)),
            None => Ok(()),
        },
    }
}

fn syntax(cm: &SourceMap, err: &ParseError) -> CompileError {
    CompileError::Syntax {
        message: err.kind().msg().into_owned(),
        line: cm.lookup_char_pos(err.span().lo).line,
    }
}
