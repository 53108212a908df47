//! Stack Extensão - Portuguese-keyword scripting language compiler
//!
//! This crate provides a compiler for the Stack Extensão (`.stk`)
//! scripting language, which expresses programs with Portuguese
//! keywords and word operators and transpiles them to JavaScript or
//! Python.

pub mod errors;
pub mod lexer;
pub mod parser;
pub mod transpiler;

// Re-export commonly used types
pub use errors::{SourceSpan, StackError, StackResult};
pub use lexer::{Keyword, Lexer, Token, TokenKind};
pub use parser::{ParseOutcome, Parser, Program};
pub use transpiler::{
    transpile, CodeGenerator, JavaScriptGenerator, PythonGenerator, SourceMap, Target,
    TranspileOptions, TranspileOutput,
};

/// Compile source text to the given target in one call
///
/// Runs the full tokenize, parse, transpile pipeline. If the parser
/// recovered from any errors, the first diagnostic is returned.
pub fn compile(
    source: &str,
    target: &str,
    options: &TranspileOptions,
) -> StackResult<TranspileOutput> {
    let target: Target = target.parse()?;
    let tokens = Lexer::new(source).tokenize()?;
    let program = Parser::new(tokens).parse().into_result()?;
    transpile(&program, target, options)
}
