use std::fmt;

use crate::error::LexError;
use crate::span::Span;

pub const KEYWORDS: [&str; 3] = ["draw", "write", "grid"];
pub const OPERATORS: [char; 3] = ['+', '/', '*'];
pub const SPECIAL_SYMBOLS: [char; 4] = ['(', ')', ',', ';'];

const KEYWORD_LEN: (usize, usize) = keyword_len_bounds();
const MIN_KEYWORD_LEN: usize = KEYWORD_LEN.0;
const MAX_KEYWORD_LEN: usize = KEYWORD_LEN.1;

// Keywords are ASCII, so byte length equals character count.
const fn keyword_len_bounds() -> (usize, usize) {
    let mut min = usize::MAX;
    let mut max = 0;
    let mut i = 0;
    while i < KEYWORDS.len() {
        let len = KEYWORDS[i].len();
        if len < min {
            min = len;
        }
        if len > max {
            max = len;
        }
        i += 1;
    }
    (min, max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Operator,
    SpecialSymbol,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Keyword => "Keyword",
            Self::Identifier => "Identifier",
            Self::Number => "Number",
            Self::Operator => "Operator",
            Self::SpecialSymbol => "Special Symbol",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.kind, self.lexeme)
    }
}

/// Result of scanning a source text: every valid token plus the rejected characters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<LexError>,
}

pub fn tokenize(source: &str) -> Lexed {
    Lexer::new(source).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Dispatch,
    /// Letters so far; may still turn out to be a keyword.
    Word,
    /// Longer than any keyword.
    Identifier,
    Number,
}

enum Transition {
    /// Character consumed, move to the given state.
    Consume(State),
    /// Character consumed and completes a token.
    Emit(Token),
    /// Token complete; the character does not belong to it and is reprocessed in `Dispatch`.
    Pushback(Token),
    /// Character consumed and rejected.
    Reject(char),
    Halt,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    span: Span,
    state: State,
    buffer: String,
    // Length of `buffer` in characters.
    buffer_len: usize,
    out: Lexed,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            span: Span::default(),
            state: State::Dispatch,
            buffer: String::new(),
            buffer_len: 0,
            out: Lexed::default(),
        }
    }

    fn run(mut self) -> Lexed {
        loop {
            // `None` is the end-of-input step that flushes a pending token.
            let ch = self.chars.peek().copied();
            match self.transition(ch) {
                Transition::Consume(state) => {
                    self.bump();
                    self.state = state;
                }
                Transition::Emit(token) => {
                    self.bump();
                    self.out.tokens.push(token);
                    self.state = State::Dispatch;
                }
                Transition::Pushback(token) => {
                    self.out.tokens.push(token);
                    self.state = State::Dispatch;
                }
                Transition::Reject(ch) => {
                    self.out.diagnostics.push(LexError::InvalidCharacter {
                        ch,
                        span: self.span,
                    });
                    self.bump();
                }
                Transition::Halt => break,
            }
        }
        self.out
    }

    fn transition(&mut self, ch: Option<char>) -> Transition {
        match (self.state, ch) {
            (State::Dispatch, None) => Transition::Halt,
            (State::Dispatch, Some(c)) if c.is_alphabetic() => {
                self.push(c);
                Transition::Consume(State::Word)
            }
            (State::Dispatch, Some(c)) if c.is_ascii_digit() => {
                self.push(c);
                Transition::Consume(State::Number)
            }
            (State::Dispatch, Some(c)) if OPERATORS.contains(&c) => {
                Transition::Emit(Token::new(TokenKind::Operator, c))
            }
            (State::Dispatch, Some(c)) if SPECIAL_SYMBOLS.contains(&c) => {
                Transition::Emit(Token::new(TokenKind::SpecialSymbol, c))
            }
            (State::Dispatch, Some(c)) if c.is_whitespace() => {
                Transition::Consume(State::Dispatch)
            }
            (State::Dispatch, Some(c)) => Transition::Reject(c),

            (State::Word, Some(c)) if c.is_alphabetic() => {
                self.push(c);
                if self.buffer_len > MAX_KEYWORD_LEN {
                    Transition::Consume(State::Identifier)
                } else {
                    Transition::Consume(State::Word)
                }
            }
            (State::Word, _) => {
                let kind = if (MIN_KEYWORD_LEN..=MAX_KEYWORD_LEN).contains(&self.buffer_len)
                    && KEYWORDS.contains(&self.buffer.as_str())
                {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                };
                Transition::Pushback(self.take(kind))
            }

            (State::Identifier, Some(c)) if c.is_alphabetic() => {
                self.push(c);
                Transition::Consume(State::Identifier)
            }
            (State::Identifier, _) => Transition::Pushback(self.take(TokenKind::Identifier)),

            (State::Number, Some(c)) if c.is_ascii_digit() => {
                self.push(c);
                Transition::Consume(State::Number)
            }
            (State::Number, _) => Transition::Pushback(self.take(TokenKind::Number)),
        }
    }

    fn bump(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.span = self.span.advance(ch);
        }
    }

    fn push(&mut self, ch: char) {
        self.buffer.push(ch);
        self.buffer_len += 1;
    }

    fn take(&mut self, kind: TokenKind) -> Token {
        self.buffer_len = 0;
        Token::new(kind, std::mem::take(&mut self.buffer))
    }
}
