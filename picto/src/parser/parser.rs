use crate::error::{Expected, SyntaxError};
use crate::ir::ast;
use super::lexer::{Token, TokenKind};

pub fn parse_tokens(tokens: &[Token]) -> Result<ast::Program, SyntaxError> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, position: 0 }
    }

    fn parse_program(&mut self) -> Result<ast::Program, SyntaxError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
            // optional terminator
            if self.check_symbol(';') {
                self.advance();
            }
        }

        Ok(ast::Program { statements })
    }

    fn parse_statement(&mut self) -> Result<ast::Statement, SyntaxError> {
        match self.peek() {
            Some(token) if token.is(TokenKind::Keyword, "draw") => {
                let expression = self.parse_wrapped_expression("draw")?;
                Ok(ast::Statement::Draw(expression))
            }
            Some(token) if token.is(TokenKind::Keyword, "write") => {
                let expression = self.parse_wrapped_expression("write")?;
                Ok(ast::Statement::Write(expression))
            }
            Some(token) if token.is(TokenKind::Keyword, "grid") => self.parse_grid(),
            _ => Err(self.error(Expected::Statement)),
        }
    }

    /// `draw ( Expression )` / `write ( Expression )`
    fn parse_wrapped_expression(
        &mut self,
        keyword: &'static str,
    ) -> Result<ast::Expression, SyntaxError> {
        self.expect_keyword(keyword)?;
        self.expect_symbol('(')?;
        let expression = self.parse_expression()?;
        self.expect_symbol(')')?;
        Ok(expression)
    }

    fn parse_grid(&mut self) -> Result<ast::Statement, SyntaxError> {
        self.expect_keyword("grid")?;
        self.expect_symbol('(')?;
        let rows = self.expect(TokenKind::Number)?.lexeme.clone();
        self.expect_symbol(',')?;
        let cols = self.expect(TokenKind::Number)?.lexeme.clone();
        self.expect_symbol(',')?;

        let content = self.parse_grid_content()?;

        self.expect_symbol(')')?;
        Ok(ast::Statement::Grid {
            rows,
            cols,
            content,
        })
    }

    // Stops quietly on anything that cannot start a cell; the closing ')'
    // check in parse_grid reports it.
    fn parse_grid_content(&mut self) -> Result<ast::GridContent, SyntaxError> {
        let mut cells = Vec::new();

        while let Some(token) = self.peek() {
            if !matches!(token.kind, TokenKind::Keyword | TokenKind::Identifier) {
                break;
            }
            cells.push(self.parse_expression()?);

            if self.check_symbol(',') {
                self.advance(); // consume ','
            } else {
                break;
            }
        }

        Ok(ast::GridContent { cells })
    }

    pub(crate) fn parse_expression(&mut self) -> Result<ast::Expression, SyntaxError> {
        let mut left = self.parse_image()?;

        while let Some(token) = self.peek() {
            if token.kind != TokenKind::Operator {
                break;
            }
            let op = ast::Operator::from_symbol(&token.lexeme)
                .ok_or_else(|| self.error(Expected::Kind(TokenKind::Operator)))?;
            self.advance(); // consume operator
            let right = self.parse_image()?;
            left = ast::Expression::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_image(&mut self) -> Result<ast::Expression, SyntaxError> {
        match self.peek() {
            Some(token) if token.is(TokenKind::Keyword, "draw") => {
                let name = self.parse_image_call("draw")?;
                Ok(ast::Expression::DrawImage(name))
            }
            Some(token) if token.is(TokenKind::Keyword, "write") => {
                let name = self.parse_image_call("write")?;
                Ok(ast::Expression::WriteImage(name))
            }
            Some(token) if token.kind == TokenKind::Identifier => {
                let name = token.lexeme.clone();
                self.advance();
                Ok(ast::Expression::Identifier(name))
            }
            _ => Err(self.error(Expected::Image)),
        }
    }

    /// `draw ( Identifier )` / `write ( Identifier )`, returns the identifier
    fn parse_image_call(&mut self, keyword: &'static str) -> Result<String, SyntaxError> {
        self.expect_keyword(keyword)?;
        self.expect_symbol('(')?;
        let name = self.expect(TokenKind::Identifier)?.lexeme.clone();
        self.expect_symbol(')')?;
        Ok(name)
    }

    // Вспомогательные методы
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn check_symbol(&self, symbol: char) -> bool {
        matches!(self.peek(), Some(token) if is_symbol(token, symbol))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(token)
            }
            _ => Err(self.error(Expected::Kind(kind))),
        }
    }

    fn expect_keyword(&mut self, keyword: &'static str) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(token) if token.is(TokenKind::Keyword, keyword) => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error(Expected::Keyword(keyword))),
        }
    }

    fn expect_symbol(&mut self, symbol: char) -> Result<(), SyntaxError> {
        if self.check_symbol(symbol) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(Expected::Symbol(symbol)))
        }
    }

    fn error(&self, expected: Expected) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError::UnexpectedToken {
                expected,
                found: token.clone(),
            },
            None => SyntaxError::UnexpectedEndOfInput { expected },
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

fn is_symbol(token: &Token, symbol: char) -> bool {
    token.kind == TokenKind::SpecialSymbol && token.lexeme.chars().eq(std::iter::once(symbol))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ir::ast::{Expression, GridContent, Operator, Program, Statement};
    use crate::ir::sexpr::IntoSExpression;
    use crate::parser::lexer::tokenize;

    fn parse_source(source: &str) -> Result<Program, SyntaxError> {
        let lexed = tokenize(source);
        assert!(lexed.diagnostics.is_empty(), "{:?}", lexed.diagnostics);
        parse_tokens(&lexed.tokens)
    }

    fn expression(source: &str) -> Expression {
        let tokens = tokenize(source).tokens;
        let mut parser = Parser::new(&tokens);
        let expression = parser.parse_expression().unwrap();
        assert!(parser.is_at_end());
        expression
    }

    fn ident(name: &str) -> Expression {
        Expression::Identifier(name.to_string())
    }

    #[test]
    fn draw_statement() {
        let expected = Program {
            statements: vec![Statement::Draw(ident("sun"))],
        };

        assert_eq!(parse_source("draw(sun);").unwrap(), expected);
        assert_eq!(parse_source("draw(sun)").unwrap(), expected);
    }

    #[test]
    fn empty_program() {
        assert_eq!(parse_source("").unwrap(), Program::default());
    }

    #[test]
    fn statements_keep_source_order() {
        let program = parse_source("write(a); draw(b) grid(1, 1, c);").unwrap();

        let types: Vec<&str> = program.statements.iter().map(|s| s.node_type()).collect();
        assert_eq!(types, vec!["WriteStatement", "DrawStatement", "GridStatement"]);
    }

    #[test]
    fn expressions_fold_left() {
        let parsed = expression("draw(a) + write(b) * write(c)");

        let expected = Expression::binary(
            Operator::Multiply,
            Expression::binary(
                Operator::Add,
                Expression::DrawImage("a".into()),
                Expression::WriteImage("b".into()),
            ),
            Expression::WriteImage("c".into()),
        );
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), "((draw(a) + write(b)) * write(c))");
        assert_eq!(
            parsed.to_s_expr().to_string(),
            "(Expression * (Expression + (DrawImage a) (WriteImage b)) (WriteImage c))"
        );
    }

    #[test]
    fn single_operand_has_no_wrapper() {
        assert_eq!(expression("sun"), ident("sun"));
        assert_eq!(expression("write(sun)"), Expression::WriteImage("sun".into()));
    }

    #[test]
    fn operators_share_one_precedence() {
        assert_eq!(expression("a / b + c").to_string(), "((a / b) + c)");
        assert_eq!(expression("a + b / c").to_string(), "((a + b) / c)");
    }

    #[test]
    fn grid_statement() {
        let program = parse_source("grid(2,2,draw(a),write(b))").unwrap();

        assert_eq!(
            program.statements,
            vec![Statement::Grid {
                rows: "2".into(),
                cols: "2".into(),
                content: GridContent {
                    cells: vec![
                        Expression::DrawImage("a".into()),
                        Expression::WriteImage("b".into()),
                    ],
                },
            }]
        );
    }

    #[test]
    fn grid_keeps_dimensions_verbatim() {
        let program = parse_source("grid(007, 3, a + b)").unwrap();

        match &program.statements[0] {
            Statement::Grid {
                rows,
                cols,
                content,
            } => {
                assert_eq!(rows, "007");
                assert_eq!(cols, "3");
                assert_eq!(content.cells.len(), 1);
            }
            other => panic!("expected grid, got {:?}", other),
        }
    }

    #[test]
    fn grid_content_may_be_empty_or_trail_a_comma() {
        let empty = parse_source("grid(2, 2, )").unwrap();
        assert_eq!(
            empty.to_s_expr().to_string(),
            "(Program (GridStatement 2 2 (GridContent)))"
        );

        let trailing = parse_source("grid(1, 2, a, b,);").unwrap();
        assert_eq!(
            trailing.to_s_expr().to_string(),
            "(Program (GridStatement 1 2 (GridContent (Identifier a) (Identifier b))))"
        );
    }

    #[test]
    fn sample_program() {
        let program = parse_source(
            "draw(sun + dog);\n\
             grid(2, 2, draw(sun), write(dog), write(tree), draw(cat));\n\
             write(draw(dog) / write(cat));",
        )
        .unwrap();

        assert_eq!(program.statements.len(), 3);
        assert_eq!(
            program.to_s_expr().to_string(),
            "(Program \
             (DrawStatement (Expression + (Identifier sun) (Identifier dog))) \
             (GridStatement 2 2 (GridContent (DrawImage sun) (WriteImage dog) (WriteImage tree) (DrawImage cat))) \
             (WriteStatement (Expression / (DrawImage dog) (WriteImage cat))))"
        );
    }

    #[test]
    fn missing_paren_fails() {
        let err = parse_source("draw sun)").unwrap_err();

        assert_eq!(
            err,
            SyntaxError::UnexpectedToken {
                expected: Expected::Symbol('('),
                found: Token::new(TokenKind::Identifier, "sun"),
            }
        );
        assert_eq!(
            err.to_string(),
            "Syntax error: expected '(', found <Identifier, sun>"
        );
    }

    #[test]
    fn statement_must_start_with_keyword() {
        let err = parse_source("sun + dog").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedToken {
                expected: Expected::Statement,
                found: Token::new(TokenKind::Identifier, "sun"),
            }
        );

        assert!(matches!(
            parse_source(";").unwrap_err(),
            SyntaxError::UnexpectedToken {
                expected: Expected::Statement,
                ..
            }
        ));
    }

    #[test]
    fn only_one_terminator_per_statement() {
        assert!(matches!(
            parse_source("draw(a);;").unwrap_err(),
            SyntaxError::UnexpectedToken {
                expected: Expected::Statement,
                ..
            }
        ));
    }

    #[test]
    fn premature_end_of_input() {
        assert_eq!(
            parse_source("draw(sun").unwrap_err(),
            SyntaxError::UnexpectedEndOfInput {
                expected: Expected::Symbol(')'),
            }
        );
        assert_eq!(
            parse_source("write(a +").unwrap_err(),
            SyntaxError::UnexpectedEndOfInput {
                expected: Expected::Image,
            }
        );
        assert_eq!(
            parse_source("grid(2,").unwrap_err(),
            SyntaxError::UnexpectedEndOfInput {
                expected: Expected::Kind(TokenKind::Number),
            }
        );
    }

    #[test]
    fn image_call_needs_identifier() {
        assert_eq!(
            parse_source("draw(draw(3))").unwrap_err(),
            SyntaxError::UnexpectedToken {
                expected: Expected::Kind(TokenKind::Identifier),
                found: Token::new(TokenKind::Number, "3"),
            }
        );
    }

    #[test]
    fn grid_dimensions_must_be_numbers() {
        assert_eq!(
            parse_source("grid(a, 2, b)").unwrap_err(),
            SyntaxError::UnexpectedToken {
                expected: Expected::Kind(TokenKind::Number),
                found: Token::new(TokenKind::Identifier, "a"),
            }
        );
    }

    #[test]
    fn grid_error_is_reported_at_closing_paren() {
        // the second cell is never started, ')' is expected in its place
        assert_eq!(
            parse_source("grid(2, 2, draw(a) draw(b))").unwrap_err(),
            SyntaxError::UnexpectedToken {
                expected: Expected::Symbol(')'),
                found: Token::new(TokenKind::Keyword, "draw"),
            }
        );
        assert_eq!(
            parse_source("grid(2, 2, 5)").unwrap_err(),
            SyntaxError::UnexpectedToken {
                expected: Expected::Symbol(')'),
                found: Token::new(TokenKind::Number, "5"),
            }
        );
    }

    #[test]
    fn grid_cell_starting_with_grid_keyword_fails() {
        assert_eq!(
            parse_source("grid(1, 1, grid)").unwrap_err(),
            SyntaxError::UnexpectedToken {
                expected: Expected::Image,
                found: Token::new(TokenKind::Keyword, "grid"),
            }
        );
    }

    #[test]
    fn keyword_expectation_names_the_keyword() {
        let tokens = tokenize("write(a)").tokens;
        let mut parser = Parser::new(&tokens);

        let err = parser.parse_wrapped_expression("draw").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedToken {
                expected: Expected::Keyword("draw"),
                found: Token::new(TokenKind::Keyword, "write"),
            }
        );
        assert_eq!(
            err.to_string(),
            "Syntax error: expected keyword 'draw', found <Keyword, write>"
        );

        let mut parser = Parser::new(&[]);
        assert_eq!(
            parser.parse_image_call("write").unwrap_err(),
            SyntaxError::UnexpectedEndOfInput {
                expected: Expected::Keyword("write"),
            }
        );
    }

    #[test]
    fn wrong_symbol_is_not_accepted_in_place_of_paren() {
        assert_eq!(
            parse_source("draw,sun)").unwrap_err(),
            SyntaxError::UnexpectedToken {
                expected: Expected::Symbol('('),
                found: Token::new(TokenKind::SpecialSymbol, ","),
            }
        );
    }
}
