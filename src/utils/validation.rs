use log::{debug, warn};

use crate::utils::constants::MAX_DEFINITION_LENGTH;
use crate::utils::errors::UtilsError;
use crate::utils::sanitize::sanitize_definition;

/// # Errors
///
/// Returns an error if the definition is empty once whitespace is removed,
/// or longer than [`MAX_DEFINITION_LENGTH`] characters.
pub fn validate_definition(definition: &str) -> Result<(), UtilsError> {
    debug!("Validating function definition: '{}'", definition);

    let length = sanitize_definition(definition).chars().count();
    if length == 0 {
        warn!("Function definition is empty");
        return Err(UtilsError::EmptyDefinition);
    }

    if length > MAX_DEFINITION_LENGTH {
        warn!(
            "Function definition too long: {} > {}",
            length, MAX_DEFINITION_LENGTH
        );
        return Err(UtilsError::DefinitionTooLong {
            length,
            limit: MAX_DEFINITION_LENGTH,
        });
    }

    debug!("Function definition validation successful");
    Ok(())
}
