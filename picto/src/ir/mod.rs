pub mod ast;
pub mod sexpr;
