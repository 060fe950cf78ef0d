use std::fmt;

use thiserror::Error;

use crate::parser::lexer::{Token, TokenKind};
use crate::span::Span;

/// Lexical diagnostic. Never fatal: the character is dropped and scanning continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {span} not parsed")]
    InvalidCharacter { ch: char, span: Span },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("Syntax error: expected {expected}, found {found}")]
    UnexpectedToken { expected: Expected, found: Token },

    #[error("Syntax error: expected {expected}, but reached end of input")]
    UnexpectedEndOfInput { expected: Expected },
}

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Kind(TokenKind),
    Symbol(char),
    Keyword(&'static str),
    /// `draw`, `write` or `grid`
    Statement,
    /// `draw(x)`, `write(x)` or a bare identifier
    Image,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{}", kind),
            Self::Symbol(symbol) => write!(f, "'{}'", symbol),
            Self::Keyword(keyword) => write!(f, "keyword '{}'", keyword),
            Self::Statement => write!(f, "statement (draw, write or grid)"),
            Self::Image => write!(f, "image (draw(..), write(..) or identifier)"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CompileError {
    /// Syntax error plus whatever the lexer skipped before it, often the real cause.
    #[error("{source}")]
    Syntax {
        source: SyntaxError,
        diagnostics: Vec<LexError>,
    },

    #[error("No source given: pass a file or --input <CODE>")]
    MissingSource,

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}
