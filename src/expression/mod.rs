//! Expression tree, evaluation and infix rendering

mod ast;
mod display;
mod eval;

pub use ast::Expression;
