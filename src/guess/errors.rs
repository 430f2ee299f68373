use thiserror::Error;

use crate::parser::FunctionError;

#[derive(Error, Debug)]
pub enum GuessError {
    #[error("Invalid guess configuration: {0}")]
    InvalidConfig(String),
    #[error("Could not parse guess '{definition}': {source}")]
    Function {
        definition: String,
        #[source]
        source: FunctionError,
    },
    #[error("Could not read test data '{path}': {message}")]
    Io { path: String, message: String },
    #[error("Malformed test data in '{path}': {message}")]
    TestData { path: String, message: String },
}
