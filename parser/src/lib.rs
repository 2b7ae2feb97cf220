//! Tabula Parser
//!
//! This crate turns console statement text into classified statements:
//! - Lexing (words, quoted identifiers, string literals, comments)
//! - Classification (read, write, create, meta-command)
//! - Table reference extraction and alias rewriting
//! - Error handling with location information

mod ast;
mod classify;
mod error;
mod lexer;
mod rewrite;

pub use ast::*;
pub use classify::{classify, is_meta_command};
pub use error::*;
pub use lexer::{Lexer, Token, TokenKind};
