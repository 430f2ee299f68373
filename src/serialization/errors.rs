use thiserror::Error;

/// Errors raised while converting expressions to and from their tagged JSON form
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerializationError {
    #[error("Unknown expression type '{0}'")]
    UnknownTag(String),
    #[error("'{kind}' node is missing field '{field}'")]
    MissingField { kind: String, field: &'static str },
    #[error("Literal {0} has no JSON representation")]
    NonFiniteLiteral(f64),
    #[error("JSON nests deeper than {limit} levels")]
    TooDeep { limit: usize },
    #[error("Malformed expression JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::Json(err.to_string())
    }
}
