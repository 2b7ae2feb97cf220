//! Errors raised while lexing and classifying statement text.

use thiserror::Error;

use crate::Span;

/// Statement text that cannot be classified, located in the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at line {}, column {}: {}", .span.line, .span.column, .message)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// `wanted` was required at `span` but `found` was there instead.
    pub fn expected(span: Span, wanted: &str, found: &str) -> Self {
        Self::new(format!("expected {}, found {}", wanted, found), span)
    }

    /// The statement stopped before `wanted`.
    pub fn end_of_input(span: Span, wanted: &str) -> Self {
        Self::new(format!("unexpected end of input, expected {}", wanted), span)
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
