use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// draw(sun + dog)
    Draw(Expression),
    /// write(dog)
    Write(Expression),
    /// grid(2, 2, draw(sun), write(dog))
    ///
    /// Rows and columns are kept as written, nothing checks them against the cell count.
    Grid {
        rows: String,
        cols: String,
        content: GridContent,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridContent {
    pub cells: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// sun + dog, left-associative
    Binary {
        op: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// draw(sun)
    DrawImage(String),
    /// write(sun)
    WriteImage(String),
    /// sun
    Identifier(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,      // +
    Divide,   // /
    Multiply, // *
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "/" => Some(Self::Divide),
            "*" => Some(Self::Multiply),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Divide => '/',
            Self::Multiply => '*',
        }
    }
}

impl Program {
    pub fn node_type(&self) -> &'static str {
        "Program"
    }
}

impl Statement {
    pub fn node_type(&self) -> &'static str {
        match self {
            Self::Draw(_) => "DrawStatement",
            Self::Write(_) => "WriteStatement",
            Self::Grid { .. } => "GridStatement",
        }
    }
}

impl GridContent {
    pub fn node_type(&self) -> &'static str {
        "GridContent"
    }
}

impl Expression {
    pub fn node_type(&self) -> &'static str {
        match self {
            Self::Binary { .. } => "Expression",
            Self::DrawImage(_) => "DrawImage",
            Self::WriteImage(_) => "WriteImage",
            Self::Identifier(_) => "Identifier",
        }
    }

    pub fn binary(op: Operator, left: Expression, right: Expression) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Source-like form with every operator application parenthesized.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Self::DrawImage(name) => write!(f, "draw({})", name),
            Self::WriteImage(name) => write!(f, "write({})", name),
            Self::Identifier(name) => write!(f, "{}", name),
        }
    }
}
