//! Lexer module for Stack Extensão
//!
//! Hand-written lexer that tokenizes Stack Extensão source code into a
//! stream of tokens. Portuguese word operators such as `mais` and `e`
//! lex to the same token kinds as their symbolic forms.

mod scanner;
mod token;

pub use scanner::Lexer;
pub use token::{keyword_kind, word_operator, Keyword, Token, TokenKind, WORD_OPERATORS};
