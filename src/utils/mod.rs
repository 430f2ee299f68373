//! Input sanitation and validation shared by the parser and the CLI

pub mod constants;
mod errors;
mod sanitize;
mod validation;

pub use errors::UtilsError;
pub use sanitize::sanitize_definition;
pub use validation::validate_definition;
