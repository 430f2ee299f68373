use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::expression::Expression;
use crate::guess::compare::{Mismatch, first_mismatch};
use crate::guess::config::GuessConfig;
use crate::guess::errors::GuessError;
use crate::parse_function;
use crate::serialization::from_json_slice;

/// A definition together with the function it is expected to parse to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseStatus {
    Passed,
    Mismatch(Mismatch),
    ParseFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseOutcome {
    pub input: String,
    pub status: CaseStatus,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

/// Loads every `*.json` file below `dir`, each holding an array of test
/// cases. Files are read in path order so results are stable.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be read, or a file does
/// not hold a valid array of test cases.
pub fn load_test_cases(dir: &Path) -> Result<Vec<TestCase>, GuessError> {
    let mut files = Vec::new();
    collect_json_files(dir, &mut files)?;
    files.sort();
    debug!("Found {} test data files under {}", files.len(), dir.display());

    let mut cases = Vec::new();
    for path in files {
        let data = fs::read(&path).map_err(|e| GuessError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut file_cases: Vec<TestCase> =
            from_json_slice(&data).map_err(|e| GuessError::TestData {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        debug!("Loaded {} cases from {}", file_cases.len(), path.display());
        cases.append(&mut file_cases);
    }

    info!("Loaded {} test cases", cases.len());
    Ok(cases)
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), GuessError> {
    let io_error = |e: std::io::Error| GuessError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        // Symlinked directories are not followed
        if entry.file_type().map_err(io_error)?.is_dir() {
            collect_json_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(())
}

/// Parses every case and compares it with its expected function.
///
/// Cases run in parallel; case `i` samples with an RNG seeded from
/// `seed + i`, so a run is reproducible for a given seed.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn verify_test_cases(
    cases: &[TestCase],
    config: &GuessConfig,
    seed: u64,
) -> Result<Vec<CaseOutcome>, GuessError> {
    config.validate()?;
    info!("Verifying {} test cases", cases.len());

    cases
        .par_iter()
        .enumerate()
        .map(|(index, case)| -> Result<CaseOutcome, GuessError> {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            let status = match parse_function(&case.input) {
                Err(e) => {
                    warn!("Test case '{}' failed to parse: {}", case.input, e);
                    CaseStatus::ParseFailed(e.to_string())
                }
                Ok(parsed) => match first_mismatch(&parsed, &case.expected, config, &mut rng)? {
                    Some(mismatch) => {
                        warn!("Test case '{}' mismatched at x={}", case.input, mismatch.x);
                        CaseStatus::Mismatch(mismatch)
                    }
                    None => CaseStatus::Passed,
                },
            };
            Ok(CaseOutcome {
                input: case.input.clone(),
                status,
            })
        })
        .collect()
}
