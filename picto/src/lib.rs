pub mod error;
pub mod ir;
pub mod parser;
pub mod span;

pub use error::{CompileError, Expected, LexError, SyntaxError};
pub use parser::{Parsed, parse};
