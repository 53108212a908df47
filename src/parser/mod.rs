//! Parser module for Stack Extensão
//!
//! Hand-written recursive descent parser that produces an AST.

mod ast;
mod parser;

pub use ast::*;
pub use parser::{ParseOutcome, Parser};
