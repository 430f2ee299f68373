use log::{debug, info};
use rand::Rng;

use crate::expression::Expression;
use crate::guess::config::GuessConfig;
use crate::guess::constants::NEAR_ZERO_SCALE;
use crate::guess::errors::GuessError;
use crate::parse_function;

/// A sample where the two functions disagree
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub x: f64,
    pub expected: f64,
    pub actual: f64,
}

/// Relative difference between two results.
///
/// Results that are identical (including equal infinities) or both NaN
/// differ by zero. Any other pairing with a non-finite value differs by
/// infinity. The scale never drops below [`NEAR_ZERO_SCALE`].
pub fn relative_difference(a: f64, b: f64) -> f64 {
    if a == b || (a.is_nan() && b.is_nan()) {
        return 0.0;
    }
    if !a.is_finite() || !b.is_finite() {
        return f64::INFINITY;
    }

    let scale = ((a.abs() + b.abs()) / 2.0).max(NEAR_ZERO_SCALE);
    (a - b).abs() / scale
}

/// Samples `x` and returns the first point where `guess` and `actual`
/// disagree, or `None` if every sample agrees.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn first_mismatch<R: Rng>(
    guess: &Expression,
    actual: &Expression,
    config: &GuessConfig,
    rng: &mut R,
) -> Result<Option<Mismatch>, GuessError> {
    config.validate()?;
    debug!(
        "Comparing '{}' with '{}' over {} samples",
        guess, actual, config.samples
    );

    for _ in 0..config.samples {
        let x = rng.gen_range(config.min_x..config.max_x);
        let expected = actual.eval(x);
        let got = guess.eval(x);

        if relative_difference(got, expected) > config.max_relative_error {
            debug!("Mismatch at x={}: expected {}, got {}", x, expected, got);
            return Ok(Some(Mismatch {
                x,
                expected,
                actual: got,
            }));
        }
    }

    Ok(None)
}

/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn guess_matches<R: Rng>(
    guess: &Expression,
    actual: &Expression,
    config: &GuessConfig,
    rng: &mut R,
) -> Result<bool, GuessError> {
    Ok(first_mismatch(guess, actual, config, rng)?.is_none())
}

/// Parses a guessed definition and checks it against the hidden function.
///
/// # Errors
///
/// Returns an error if the guess does not parse or `config` is invalid.
pub fn guess<R: Rng>(
    definition: &str,
    actual: &Expression,
    config: &GuessConfig,
    rng: &mut R,
) -> Result<bool, GuessError> {
    let parsed = parse_function(definition).map_err(|source| GuessError::Function {
        definition: definition.to_string(),
        source,
    })?;

    let correct = guess_matches(&parsed, actual, config, rng)?;
    info!("Guess '{}' is {}", definition, if correct { "correct" } else { "incorrect" });
    Ok(correct)
}
