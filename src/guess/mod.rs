//! Comparing guessed functions with a hidden one, and the test-case files
//! built on that comparison

mod compare;
mod config;
pub mod constants;
mod errors;
mod testcase;

pub use compare::{Mismatch, first_mismatch, guess, guess_matches, relative_difference};
pub use config::GuessConfig;
pub use errors::GuessError;
pub use testcase::{CaseOutcome, CaseStatus, TestCase, load_test_cases, verify_test_cases};
