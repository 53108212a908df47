//! Error handling for the Stack Extensão compiler
//!
//! Provides structured error types with source location tracking
//! for helpful diagnostic messages.

mod diagnostic;

use std::ops::Range;
use thiserror::Error;

pub use diagnostic::{format_error, offset_to_line_col, print_error, print_errors};

/// A span in the source code, represented as a byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl SourceSpan {
    /// Create a new source span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a span from a range
    pub fn from_range(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Merge two spans into one that covers both
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Get the length of this span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl From<Range<usize>> for SourceSpan {
    fn from(range: Range<usize>) -> Self {
        Self::from_range(range)
    }
}

impl From<SourceSpan> for Range<usize> {
    fn from(span: SourceSpan) -> Self {
        span.start..span.end
    }
}

/// The main error type for Stack Extensão operations
#[derive(Error, Debug)]
pub enum StackError {
    #[error("Lexer error at line {line}: {message}")]
    Lexer {
        message: String,
        line: usize,
        span: SourceSpan,
    },

    #[error("Parser error at line {line}: {message}")]
    Parser {
        message: String,
        line: usize,
        span: SourceSpan,
    },

    #[error("Transpiler error: {message}")]
    Transpiler { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StackError {
    /// Get the source span associated with this error, if any
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            StackError::Lexer { span, .. } => Some(*span),
            StackError::Parser { span, .. } => Some(*span),
            StackError::Transpiler { .. } => None,
            StackError::Io(_) => None,
        }
    }

    /// Get the source line associated with this error, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            StackError::Lexer { line, .. } => Some(*line),
            StackError::Parser { line, .. } => Some(*line),
            StackError::Transpiler { .. } => None,
            StackError::Io(_) => None,
        }
    }

    /// Create a lexer error
    pub fn lexer(message: impl Into<String>, line: usize, span: SourceSpan) -> Self {
        StackError::Lexer {
            message: message.into(),
            line,
            span,
        }
    }

    /// Create a parser error
    pub fn parser(message: impl Into<String>, line: usize, span: SourceSpan) -> Self {
        StackError::Parser {
            message: message.into(),
            line,
            span,
        }
    }

    /// Create a transpiler error
    pub fn transpiler(message: impl Into<String>) -> Self {
        StackError::Transpiler {
            message: message.into(),
        }
    }
}

/// Result type alias for Stack Extensão operations
pub type StackResult<T> = Result<T, StackError>;
