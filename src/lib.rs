//! Funcguess - A library for parsing and evaluating single-variable functions
//!
//! Definitions such as `3*x^2 - (x+1)/2` are tokenized, parsed into an
//! immutable [`Expression`] tree, evaluated at any `x`, and stored in a tagged
//! JSON form that rebuilds exactly the same tree.

pub mod expression;
pub mod guess;
pub mod parser;
pub mod serialization;
pub mod utils;

use log::debug;

// Re-export the main public API
pub use expression::Expression;
pub use guess::{GuessConfig, GuessError};
pub use parser::{FunctionError, LexError, ParseError};
pub use serialization::{SerializationError, marshal, unmarshal};
pub use utils::{UtilsError, validate_definition};

/// Parse a function definition into an expression tree
///
/// Whitespace is ignored. The only variable is `x`; the operators are
/// `+ - * / ^` with parentheses for grouping.
///
/// # Errors
///
/// This function will return an error if:
/// * The definition is empty or too long
/// * It contains characters outside the grammar or a malformed number
/// * The tokens do not form a valid expression
///
/// # Examples
///
/// ```
/// use funcguess::parse_function;
///
/// let f = parse_function("3*x + 2").unwrap();
/// assert_eq!(f.eval(4.0), 14.0);
/// ```
pub fn parse_function(definition: &str) -> Result<Expression, FunctionError> {
    validate_definition(definition)?;

    let tokens = parser::tokenize(definition)?;
    let expr = parser::parse(&tokens)?;
    debug!("Parsed '{}' into {}", definition, expr);
    Ok(expr)
}
