// Limits on raw function definitions
pub const MAX_DEFINITION_LENGTH: usize = 512;
