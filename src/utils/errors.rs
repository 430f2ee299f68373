use thiserror::Error;

/// Errors raised while checking raw input before it reaches the tokenizer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    #[error("Function definition cannot be empty")]
    EmptyDefinition,
    #[error("Function definition is {length} characters long, the limit is {limit}")]
    DefinitionTooLong { length: usize, limit: usize },
}
