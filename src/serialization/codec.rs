use log::{debug, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::expression::Expression;
use crate::serialization::constants::MAX_NESTING_DEPTH;
use crate::serialization::errors::SerializationError;
use crate::serialization::node::ExpressionNode;

/// Serializes an expression to its tagged JSON form.
///
/// # Errors
///
/// Returns an error if the tree holds a NaN or infinite literal, which JSON
/// cannot represent without losing the exact value.
pub fn marshal(expr: &Expression) -> Result<Vec<u8>, SerializationError> {
    debug!("Marshalling expression: {}", expr);
    let node = ExpressionNode::try_from(expr)?;
    Ok(serde_json::to_vec(&node)?)
}

/// Same as [`marshal`] but indented for people to read
///
/// # Errors
///
/// See [`marshal`].
pub fn marshal_pretty(expr: &Expression) -> Result<String, SerializationError> {
    let node = ExpressionNode::try_from(expr)?;
    Ok(serde_json::to_string_pretty(&node)?)
}

/// Rebuilds an expression from its tagged JSON form.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON, a node has an unknown
/// `type`, a required field is missing, a `value` is not a number, or the
/// document nests deeper than [`MAX_NESTING_DEPTH`].
pub fn unmarshal(bytes: &[u8]) -> Result<Expression, SerializationError> {
    debug!("Unmarshalling {} bytes", bytes.len());
    let node: ExpressionNode = from_json_slice(bytes)?;
    let expr = Expression::try_from(node)?;
    debug!("Unmarshalled expression: {}", expr);
    Ok(expr)
}

/// Reads a JSON document that may hold deep expression trees.
///
/// serde_json's fixed recursion limit is replaced by [`MAX_NESTING_DEPTH`],
/// checked on the raw bytes before anything is built, and the deserializer
/// grows its stack on demand.
///
/// # Errors
///
/// Returns [`SerializationError::TooDeep`] for documents nested past the
/// limit and [`SerializationError::Json`] for anything serde_json rejects.
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    let depth = nesting_depth(bytes);
    if depth > MAX_NESTING_DEPTH {
        warn!(
            "JSON nests {} levels deep, limit is {}",
            depth, MAX_NESTING_DEPTH
        );
        return Err(SerializationError::TooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }

    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Deepest `{`/`[` nesting in a JSON text, ignoring brackets inside strings
fn nesting_depth(bytes: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &b in bytes {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::nesting_depth;

    #[test]
    fn test_nesting_depth() {
        assert_eq!(nesting_depth(b"3"), 0);
        assert_eq!(nesting_depth(br#"{"type":"Variable"}"#), 1);
        assert_eq!(nesting_depth(br#"[{"a":[1,2]},{"b":3}]"#), 3);
        assert_eq!(nesting_depth(br#"{"type":"{[{[\"]"}"#), 1);
    }
}
