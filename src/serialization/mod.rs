//! Tagged JSON form of expression trees

mod codec;
pub mod constants;
mod errors;
mod node;

pub use codec::{from_json_slice, marshal, marshal_pretty, unmarshal};
pub use errors::SerializationError;
pub use node::ExpressionNode;

#[cfg(test)]
mod tests;
