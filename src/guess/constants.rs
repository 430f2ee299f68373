// Default sampling used when comparing a guess with the hidden function
pub const DEFAULT_SAMPLES: usize = 100;
pub const DEFAULT_MIN_X: f64 = -1000.0;
pub const DEFAULT_MAX_X: f64 = 1000.0;
pub const DEFAULT_MAX_RELATIVE_ERROR: f64 = 1e-5;

// Below this magnitude differences are measured absolutely
pub const NEAR_ZERO_SCALE: f64 = 1.0;
