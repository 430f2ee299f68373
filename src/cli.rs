use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use funcguess::guess::constants::{
    DEFAULT_MAX_RELATIVE_ERROR, DEFAULT_MAX_X, DEFAULT_MIN_X, DEFAULT_SAMPLES,
};
use funcguess::guess::{CaseStatus, GuessConfig, first_mismatch, load_test_cases, verify_test_cases};
use funcguess::serialization::marshal_pretty;
use funcguess::{Expression, marshal, parse_function, unmarshal};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Funcguess - Parse, evaluate and compare single-variable functions
#[derive(Parser, Debug)]
#[command(name = "funcguess")]
#[command(about = "Parse, evaluate, store and compare functions of x")]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the serialized tree of a definition
    Parse {
        #[arg(allow_hyphen_values = true)]
        definition: String,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print a definition back with minimal parentheses
    Show {
        #[arg(allow_hyphen_values = true)]
        definition: String,
    },
    /// Evaluate a definition at one or more values of x
    Eval {
        #[arg(allow_hyphen_values = true)]
        definition: String,

        #[arg(required = true, allow_negative_numbers = true)]
        xs: Vec<f64>,
    },
    /// Check whether a guessed definition matches the actual one
    Guess {
        #[arg(allow_hyphen_values = true)]
        guess: String,

        #[arg(allow_hyphen_values = true)]
        actual: String,

        #[command(flatten)]
        sampling: SamplingArgs,
    },
    /// Load a serialized tree from a file and evaluate it
    Load {
        file: PathBuf,

        /// Values of x to evaluate at
        #[arg(short, long = "x", allow_negative_numbers = true)]
        xs: Vec<f64>,
    },
    /// Verify every test case file under a directory
    Check {
        dir: PathBuf,

        #[command(flatten)]
        sampling: SamplingArgs,
    },
}

/// Sampling settings shared by `guess` and `check`
#[derive(Args, Debug, Clone)]
pub struct SamplingArgs {
    /// Number of x values to compare at
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Lower bound of the sampled range
    #[arg(long, default_value_t = DEFAULT_MIN_X, allow_negative_numbers = true)]
    pub min_x: f64,

    /// Upper bound (exclusive) of the sampled range
    #[arg(long, default_value_t = DEFAULT_MAX_X, allow_negative_numbers = true)]
    pub max_x: f64,

    /// Largest accepted relative difference
    #[arg(long, default_value_t = DEFAULT_MAX_RELATIVE_ERROR)]
    pub tolerance: f64,

    /// Seed for the sampler (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SamplingArgs {
    pub fn to_config(&self) -> GuessConfig {
        GuessConfig {
            samples: self.samples,
            min_x: self.min_x,
            max_x: self.max_x,
            max_relative_error: self.tolerance,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .try_init()
        .context("Failed to initialize logging")
}

fn parse_definition(definition: &str) -> Result<Expression> {
    parse_function(definition).with_context(|| format!("Invalid function definition '{}'", definition))
}

fn run_parse(definition: &str, pretty: bool) -> Result<()> {
    let expr = parse_definition(definition)?;
    if pretty {
        println!("{}", marshal_pretty(&expr)?);
    } else {
        let bytes = marshal(&expr)?;
        println!("{}", String::from_utf8_lossy(&bytes));
    }
    Ok(())
}

fn run_eval(definition: &str, xs: &[f64]) -> Result<()> {
    let expr = parse_definition(definition)?;
    for &x in xs {
        println!("f({}) = {}", x, expr.eval(x));
    }
    Ok(())
}

fn run_guess(guess: &str, actual: &str, sampling: &SamplingArgs) -> Result<()> {
    let guessed = parse_definition(guess)?;
    let actual_expr = parse_definition(actual)?;
    let seed = sampling.seed();
    info!("Comparing with seed {}", seed);

    let mut rng = StdRng::seed_from_u64(seed);
    match first_mismatch(&guessed, &actual_expr, &sampling.to_config(), &mut rng)? {
        None => println!("Correct: '{}' matches '{}'", guess, actual),
        Some(mismatch) => println!(
            "Incorrect: at x = {} expected {} but got {}",
            mismatch.x, mismatch.expected, mismatch.actual
        ),
    }
    Ok(())
}

fn run_load(file: &Path, xs: &[f64]) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let expr = unmarshal(&bytes).with_context(|| format!("Failed to load {}", file.display()))?;

    println!("f(x) = {}", expr);
    for &x in xs {
        println!("f({}) = {}", x, expr.eval(x));
    }
    Ok(())
}

fn run_check(dir: &Path, sampling: &SamplingArgs) -> Result<()> {
    let cases = load_test_cases(dir)?;
    let seed = sampling.seed();
    info!("Checking {} cases with seed {}", cases.len(), seed);

    let outcomes = verify_test_cases(&cases, &sampling.to_config(), seed)?;
    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.status {
            CaseStatus::Passed => println!("PASS {}", outcome.input),
            CaseStatus::Mismatch(m) => {
                failed += 1;
                println!(
                    "FAIL {}: at x = {} expected {} but got {}",
                    outcome.input, m.x, m.expected, m.actual
                );
            }
            CaseStatus::ParseFailed(message) => {
                failed += 1;
                println!("FAIL {}: {}", outcome.input, message);
            }
        }
    }

    if failed > 0 {
        warn!("{} test cases failed", failed);
        bail!("{} of {} test cases failed", failed, outcomes.len());
    }
    println!("All {} test cases passed", outcomes.len());
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();

    init_logging(&args.log_level)?;

    match &args.command {
        Command::Parse { definition, pretty } => run_parse(definition, *pretty),
        Command::Show { definition } => {
            println!("{}", parse_definition(definition)?);
            Ok(())
        }
        Command::Eval { definition, xs } => run_eval(definition, xs),
        Command::Guess {
            guess,
            actual,
            sampling,
        } => run_guess(guess, actual, sampling),
        Command::Load { file, xs } => run_load(file, xs),
        Command::Check { dir, sampling } => run_check(dir, sampling),
    }
}
