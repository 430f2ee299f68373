use crate::guess::constants::{
    DEFAULT_MAX_RELATIVE_ERROR, DEFAULT_MAX_X, DEFAULT_MIN_X, DEFAULT_SAMPLES,
};
use crate::guess::errors::GuessError;

/// How two functions are compared: `samples` values of `x` are drawn
/// uniformly from `[min_x, max_x)` and every pair of results must agree to
/// within `max_relative_error`.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessConfig {
    pub samples: usize,
    pub min_x: f64,
    pub max_x: f64,
    pub max_relative_error: f64,
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            min_x: DEFAULT_MIN_X,
            max_x: DEFAULT_MAX_X,
            max_relative_error: DEFAULT_MAX_RELATIVE_ERROR,
        }
    }
}

impl GuessConfig {
    /// # Errors
    ///
    /// Returns an error if there are no samples, the range is empty or its
    /// bounds or width are not finite, or the tolerance is not a positive
    /// number.
    pub fn validate(&self) -> Result<(), GuessError> {
        if self.samples == 0 {
            return Err(GuessError::InvalidConfig(
                "at least one sample is required".to_string(),
            ));
        }
        if !self.min_x.is_finite() || !self.max_x.is_finite() {
            return Err(GuessError::InvalidConfig(format!(
                "sample range [{}, {}) must be finite",
                self.min_x, self.max_x
            )));
        }
        if self.min_x >= self.max_x {
            return Err(GuessError::InvalidConfig(format!(
                "sample range [{}, {}) is empty",
                self.min_x, self.max_x
            )));
        }
        if !(self.max_x - self.min_x).is_finite() {
            return Err(GuessError::InvalidConfig(format!(
                "sample range [{}, {}) is too wide to sample",
                self.min_x, self.max_x
            )));
        }
        if self.max_relative_error.is_nan() || self.max_relative_error <= 0.0 {
            return Err(GuessError::InvalidConfig(format!(
                "tolerance {} must be positive",
                self.max_relative_error
            )));
        }
        Ok(())
    }
}
