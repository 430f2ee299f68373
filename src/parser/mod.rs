//! Tokenizer and recursive parser for function definitions

pub mod constants;
mod core;
mod errors;
mod lexer;
mod token;

pub use core::parse;
pub use errors::{FunctionError, LexError, ParseError};
pub use lexer::tokenize;
pub use token::{Token, TokenKind};
