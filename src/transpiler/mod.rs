//! Code generation for Stack Extensão
//!
//! This module provides code generators for the supported target
//! languages and the options controlling their output.

mod javascript;
mod python;

pub use javascript::JavaScriptGenerator;
pub use python::PythonGenerator;

use crate::errors::{StackError, StackResult};
use crate::parser::{LogicalOp, Program, UnaryOp};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A transpilation target language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    JavaScript,
    Python,
    WebAssembly,
}

impl Target {
    /// Get the file extension for generated output
    pub fn file_extension(&self) -> &'static str {
        match self {
            Target::JavaScript => "js",
            Target::Python => "py",
            Target::WebAssembly => "wasm",
        }
    }

    /// Get the human-readable target name
    pub fn language_name(&self) -> &'static str {
        match self {
            Target::JavaScript => "JavaScript",
            Target::Python => "Python",
            Target::WebAssembly => "WebAssembly",
        }
    }
}

impl FromStr for Target {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "js" | "javascript" => Ok(Target::JavaScript),
            "py" | "python" => Ok(Target::Python),
            "wasm" | "webassembly" => Ok(Target::WebAssembly),
            _ => Err(StackError::transpiler(format!(
                "unsupported target language: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language_name())
    }
}

/// Options controlling transpilation output
#[derive(Debug, Clone)]
pub struct TranspileOptions {
    /// Collapse whitespace in the generated code (JavaScript only)
    pub minify: bool,
    /// Emit a source map alongside the code
    pub source_maps: bool,
    /// Emit modern JavaScript; `false` selects ES5 fallbacks
    pub es6: bool,
    /// Python version the output targets (informational)
    pub python_version: String,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            minify: false,
            source_maps: true,
            es6: true,
            python_version: "3.8".to_string(),
        }
    }
}

/// A version 3 source map
///
/// Only a placeholder mapping is produced for now; the structure is
/// what source map consumers expect.
#[derive(Debug, Clone, Serialize)]
pub struct SourceMap {
    pub version: u32,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// A placeholder map pointing at the conventional input name
    pub fn stub() -> Self {
        Self {
            version: 3,
            sources: vec!["input.stk".to_string()],
            names: Vec::new(),
            mappings: "AAAA".to_string(),
        }
    }
}

/// The product of a transpilation run
#[derive(Debug)]
pub struct TranspileOutput {
    /// The generated code
    pub code: String,
    /// Source map, when requested and supported by the target
    pub source_map: Option<SourceMap>,
    /// Module imports the generated code relies on
    pub imports: Vec<String>,
}

/// Trait for code generators
pub trait CodeGenerator {
    /// Generate code for the program
    fn generate(&mut self, program: &Program) -> StackResult<String>;

    /// Get the file extension for the target language
    fn file_extension(&self) -> &'static str;

    /// Get the name of the target language
    fn language_name(&self) -> &'static str;

    /// Module imports the generated code relies on
    fn imports(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Transpile a parsed program to the given target
pub fn transpile(
    program: &Program,
    target: Target,
    options: &TranspileOptions,
) -> StackResult<TranspileOutput> {
    match target {
        Target::JavaScript => {
            let mut generator = JavaScriptGenerator::new().with_es6(options.es6);
            let code = generator.generate(program)?;
            let code = if options.minify {
                minify_js(&code)
            } else {
                code
            };
            Ok(TranspileOutput {
                code,
                source_map: options.source_maps.then(SourceMap::stub),
                imports: generator.imports(),
            })
        }
        Target::Python => {
            let mut generator = PythonGenerator::new();
            let code = generator.generate(program)?;
            Ok(TranspileOutput {
                code,
                source_map: options.source_maps.then(SourceMap::stub),
                imports: generator.imports(),
            })
        }
        Target::WebAssembly => Ok(TranspileOutput {
            code: ";; WebAssembly transpilation not fully implemented yet".to_string(),
            source_map: None,
            imports: Vec::new(),
        }),
    }
}

/// Spelling of a logical operator for the given target
pub fn logical_op_symbol(target: Target, op: LogicalOp) -> &'static str {
    match (target, op) {
        (Target::Python, LogicalOp::And) => "and",
        (Target::Python, LogicalOp::Or) => "or",
        (_, LogicalOp::And) => "&&",
        (_, LogicalOp::Or) => "||",
    }
}

/// Spelling of a unary operator for the given target
///
/// Python's `not` carries its trailing space so it never fuses with
/// its operand.
pub fn unary_op_symbol(target: Target, op: UnaryOp) -> &'static str {
    match (target, op) {
        (Target::Python, UnaryOp::Not) => "not ",
        (_, UnaryOp::Not) => "!",
        (_, UnaryOp::Neg) => "-",
    }
}

/// Escape a string literal body for double-quoted output
///
/// The escapes are shared by the JavaScript and Python emitters.
pub(crate) fn escape_string_literal(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            _ => result.push(c),
        }
    }
    result
}

/// Collapse insignificant whitespace in generated JavaScript
///
/// A basic whitespace pass, not a real minifier.
fn minify_js(code: &str) -> String {
    let collapsed = code.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .replace("; }", "}")
        .replace(";}", "}")
        .replace("{ ", "{")
        .replace(" }", "}")
        .trim()
        .to_string()
}
