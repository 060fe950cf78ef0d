use std::fmt;

use super::ast::{Expression, GridContent, Program, Statement};

/// Tree rendering of the AST: every node becomes `(NodeType value.. children..)`.
#[derive(Debug, Clone, PartialEq)]
pub enum S {
    Atom(String),
    List(Vec<S>),
}

impl fmt::Display for S {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(atom) => f.write_str(atom),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

fn atom(text: impl Into<String>) -> S {
    S::Atom(text.into())
}

pub trait IntoSExpression {
    fn to_s_expr(&self) -> S;
}

impl IntoSExpression for Program {
    fn to_s_expr(&self) -> S {
        let mut list = vec![atom(self.node_type())];
        list.extend(self.statements.iter().map(|s| s.to_s_expr()));
        S::List(list)
    }
}

impl IntoSExpression for Statement {
    fn to_s_expr(&self) -> S {
        let head = atom(self.node_type());
        match self {
            Statement::Draw(expression) | Statement::Write(expression) => {
                S::List(vec![head, expression.to_s_expr()])
            }
            Statement::Grid {
                rows,
                cols,
                content,
            } => S::List(vec![
                head,
                atom(rows.as_str()),
                atom(cols.as_str()),
                content.to_s_expr(),
            ]),
        }
    }
}

impl IntoSExpression for GridContent {
    fn to_s_expr(&self) -> S {
        let mut list = vec![atom(self.node_type())];
        list.extend(self.cells.iter().map(|cell| cell.to_s_expr()));
        S::List(list)
    }
}

impl IntoSExpression for Expression {
    fn to_s_expr(&self) -> S {
        let head = atom(self.node_type());
        match self {
            Expression::Binary { op, left, right } => S::List(vec![
                head,
                atom(op.symbol()),
                left.to_s_expr(),
                right.to_s_expr(),
            ]),
            Expression::DrawImage(name)
            | Expression::WriteImage(name)
            | Expression::Identifier(name) => S::List(vec![head, atom(name.as_str())]),
        }
    }
}
