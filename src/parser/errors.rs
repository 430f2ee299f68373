use thiserror::Error;

use crate::utils::UtilsError;

/// Errors raised while turning text into tokens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },
    #[error("Malformed number '{literal}' at position {position}")]
    MalformedNumber { literal: String, position: usize },
}

/// Errors raised while building an expression tree from tokens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("No tokens to parse")]
    NoTokens,
    #[error("Unbalanced parenthesis at position {position}")]
    UnbalancedParens { position: usize },
    #[error("Operator '{operator}' at position {position} is missing an operand")]
    MissingOperand { operator: String, position: usize },
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),
    #[error("Expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },
    #[error("Could not parse tokens: {0}")]
    Unparseable(String),
}

/// Any failure of [`crate::parse_function`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    #[error("Invalid input: {0}")]
    Input(#[from] UtilsError),
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}
