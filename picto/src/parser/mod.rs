pub mod lexer;
pub mod parser;

use crate::error::{CompileError, LexError};
use crate::ir::ast;

/// Parsed program together with the characters the lexer had to skip.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub program: ast::Program,
    pub diagnostics: Vec<LexError>,
}

/// Главная функция парсера - из текста в AST
pub fn parse(source: &str) -> Result<Parsed, CompileError> {
    let lexed = lexer::tokenize(source);
    match parser::parse_tokens(&lexed.tokens) {
        Ok(program) => Ok(Parsed {
            program,
            diagnostics: lexed.diagnostics,
        }),
        Err(source) => Err(CompileError::Syntax {
            source,
            diagnostics: lexed.diagnostics,
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{Expected, SyntaxError};
    use crate::parser::lexer::{Token, TokenKind};
    use crate::span::Span;
    use crate::ir::sexpr::IntoSExpression;

    #[test]
    fn parse_keeps_lexer_diagnostics() {
        let parsed = parse("draw(sun) @ write(moon)").unwrap();

        assert_eq!(
            parsed.program.to_s_expr().to_string(),
            "(Program (DrawStatement (Identifier sun)) (WriteStatement (Identifier moon)))"
        );
        assert_eq!(parsed.diagnostics.len(), 1);
    }

    #[test]
    fn parse_reports_syntax_errors() {
        let err = parse("grid(2, 2").unwrap_err();

        assert!(matches!(
            err,
            CompileError::Syntax {
                source: SyntaxError::UnexpectedEndOfInput { .. },
                ..
            }
        ));
    }

    #[test]
    fn syntax_error_keeps_lexer_diagnostics() {
        let err = parse("draw(su$n)").unwrap_err();

        match err {
            CompileError::Syntax {
                source,
                diagnostics,
            } => {
                assert_eq!(
                    source,
                    SyntaxError::UnexpectedToken {
                        expected: Expected::Symbol(')'),
                        found: Token::new(TokenKind::Identifier, "n"),
                    }
                );
                assert_eq!(
                    diagnostics,
                    vec![LexError::InvalidCharacter {
                        ch: '$',
                        span: Span {
                            offset: 7,
                            line: 1,
                            column: 8,
                        },
                    }]
                );
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }
}
