//! Laplace console front end
//!
//! Reads a matrix and runs one command on it.
//!
//! Input:
//! - stdin: `rows cols` followed by `rows * cols` numbers
//! - `--file PATH --rows R --cols C`: numbers only, read from a text file
//!
//! Commands:
//! - unit-check (default): print an empty line, then 1 if the generated
//!   5×5 unit matrix equals the canonical unit matrix, else 0
//! - print, transpose, det, adjugate, inverse
//!
//! `LAPLACE_STRATEGY` / `LAPLACE_WORKERS` set the engine defaults and
//! `RUST_LOG` controls logging on stderr.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use laplace_core::{Canonical, Matrix, MatrixError};
use laplace_det::{Engine, EngineConfig, StrategyKind};
use serde_json::{json, Value as JsonValue};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Order of the unit matrix the default command checks
const UNIT_CHECK_ORDER: usize = 5;

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "USAGE",
            CliError::Config(_) => "CONFIG",
            CliError::Matrix(e) => e.code(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "laplace")]
#[command(about = "Determinants and inverses of dense matrices by cofactor expansion")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Emit results and errors as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Read the elements from a text file instead of stdin
    #[arg(short, long, global = true, requires_all = ["rows", "cols"])]
    file: Option<PathBuf>,

    /// Row count for --file
    #[arg(long, global = true)]
    rows: Option<usize>,

    /// Column count for --file
    #[arg(long, global = true)]
    cols: Option<usize>,

    /// Determinant strategy: cofactor, parallel or elimination
    #[arg(long, global = true, value_parser = parse_strategy)]
    strategy: Option<StrategyKind>,

    /// Worker threads for the parallel strategy (0 = one per CPU)
    #[arg(long, global = true)]
    workers: Option<usize>,

    /// JSON engine config; replaces the environment defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Compare a generated 5×5 unit matrix with the canonical one
    UnitCheck,
    /// Print the matrix
    Print,
    /// Print the transpose
    Transpose,
    /// Print the determinant
    #[command(name = "det", alias = "determinant")]
    Determinant,
    /// Print the adjugate
    #[command(alias = "adj")]
    Adjugate,
    /// Print the inverse
    #[command(alias = "inv")]
    Inverse,
}

fn parse_strategy(name: &str) -> Result<StrategyKind, String> {
    StrategyKind::from_str(name).ok_or_else(|| format!("unknown strategy {:?}", name))
}

/// Flags on top of a base config
fn apply_flags(cli: &Cli, mut config: EngineConfig) -> EngineConfig {
    if let Some(kind) = cli.strategy {
        config = config.with_strategy(kind);
    }
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    config
}

/// Engine settings from the config file (or the environment), flags on top
fn engine_config(cli: &Cli) -> Result<EngineConfig, CliError> {
    let base = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
            EngineConfig::from_json(&text).map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?
        }
        None => EngineConfig::from_env(),
    };
    Ok(apply_flags(cli, base))
}

fn header_value(name: &str, token: Option<&str>) -> Result<usize, CliError> {
    let token = token.ok_or_else(|| CliError::Usage(format!("missing {} in matrix header", name)))?;
    token
        .parse::<usize>()
        .map_err(|_| CliError::Usage(format!("{} expects a non-negative integer, got {:?}", name, token)))
}

/// Console format: `rows cols` then the elements
fn read_console_matrix(text: &str) -> Result<Matrix, CliError> {
    let mut tokens = text.split_whitespace();
    let rows = header_value("rows", tokens.next())?;
    let cols = header_value("columns", tokens.next())?;
    let rest = tokens.collect::<Vec<_>>().join(" ");
    Ok(Matrix::parse(rows, cols, &rest)?)
}

fn load_matrix(cli: &Cli, mut stdin: impl Read) -> Result<Matrix, CliError> {
    match (&cli.file, cli.rows, cli.cols) {
        (Some(path), Some(rows), Some(cols)) => Ok(Matrix::from_file(rows, cols, path)?),
        _ => {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .map_err(|e| MatrixError::Io(e.to_string()))?;
            read_console_matrix(&text)
        }
    }
}

fn render_matrix(matrix: &Matrix, json: bool) -> String {
    if json {
        json!({ "matrix": matrix }).to_string() + "\n"
    } else {
        matrix.to_text()
    }
}

/// Execute one command and return what goes to stdout
fn run(cli: &Cli, engine: &Engine, matrix: &Matrix) -> Result<String, CliError> {
    let command = cli.command.unwrap_or(Command::UnitCheck);
    debug!(?command, rows = matrix.rows(), cols = matrix.cols(), "running command");

    let output = match command {
        Command::UnitCheck => {
            let unit = Matrix::identity(UNIT_CHECK_ORDER)?;
            let equal = unit.equals_canonical(Canonical::Unit)?;
            if cli.json {
                json!({ "unit": equal }).to_string() + "\n"
            } else {
                format!("\n{}\n", i32::from(equal))
            }
        }
        Command::Print => render_matrix(matrix, cli.json),
        Command::Transpose => render_matrix(&matrix.transpose(), cli.json),
        Command::Determinant => {
            let det = engine.determinant(matrix)?;
            if cli.json {
                json!({ "determinant": det, "strategy": engine.strategy_name() }).to_string() + "\n"
            } else {
                format!("{}\n", det)
            }
        }
        Command::Adjugate => render_matrix(&engine.adjugate(matrix)?, cli.json),
        Command::Inverse => render_matrix(&engine.inverse(matrix)?, cli.json),
    };
    Ok(output)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn report(err: &CliError, json: bool) {
    debug!(code = err.code(), "command failed");
    if json {
        let body: JsonValue = json!({ "error": { "code": err.code(), "message": err.to_string() } });
        eprintln!("{}", body);
    } else {
        eprintln!("ERROR: {}", err);
    }
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    let result = engine_config(&cli)
        .and_then(|config| Engine::new(config).map_err(CliError::from))
        .and_then(|engine| {
            let matrix = load_matrix(&cli, io::stdin().lock())?;
            run(&cli, &engine, &matrix)
        });

    match result {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
                eprintln!("Error writing output: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            report(&e, cli.json);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn cli(list: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("laplace").chain(list.iter().copied()))
    }

    fn sample() -> Matrix {
        read_console_matrix("3 3\n6 1 1\n4 -2 5\n2 8 7\n").unwrap()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = cli(&[]).unwrap();
        assert_eq!(parsed.command, None);
        assert!(!parsed.json);
        assert_eq!(parsed.file, None);
        assert_eq!(parsed.strategy, None);
    }

    #[test]
    fn test_parse_full() {
        let parsed = cli(&["det", "--file", "m.txt", "--rows", "3", "--cols", "3", "--strategy", "parallel", "--workers", "2", "--json"]).unwrap();
        assert_eq!(parsed.command, Some(Command::Determinant));
        assert_eq!(parsed.file, Some(PathBuf::from("m.txt")));
        assert_eq!((parsed.rows, parsed.cols), (Some(3), Some(3)));
        assert_eq!(parsed.strategy, Some(StrategyKind::Parallel));
        assert_eq!(parsed.workers, Some(2));
        assert!(parsed.json);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(cli(&["determinant"]).unwrap().command, Some(Command::Determinant));
        assert_eq!(cli(&["inv"]).unwrap().command, Some(Command::Inverse));
        assert_eq!(cli(&["adj"]).unwrap().command, Some(Command::Adjugate));
        assert_eq!(cli(&["unit-check"]).unwrap().command, Some(Command::UnitCheck));
        assert_eq!(cli(&["--strategy", "gauss"]).unwrap().strategy, Some(StrategyKind::Elimination));
    }

    #[test]
    fn test_parse_errors() {
        assert!(cli(&["frobnicate"]).is_err());
        assert!(cli(&["det", "inverse"]).is_err());
        assert_eq!(cli(&["--file", "m.txt"]).unwrap_err().kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(cli(&["--file", "m.txt", "--rows", "2"]).unwrap_err().kind(), ErrorKind::MissingRequiredArgument);
        assert!(cli(&["--rows", "-2"]).is_err());
        assert_eq!(cli(&["--strategy", "magic"]).unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_read_console_matrix() {
        let m = sample();
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m[(2, 1)], 8.0);

        assert!(matches!(
            read_console_matrix("2 2 1 2 3"),
            Err(CliError::Matrix(MatrixError::InsufficientData { expected: 4, found: 3 }))
        ));
        assert!(matches!(
            read_console_matrix("0 2"),
            Err(CliError::Matrix(MatrixError::InvalidDimensions { .. }))
        ));
        assert!(matches!(read_console_matrix(""), Err(CliError::Usage(_))));
        assert!(matches!(read_console_matrix("2 x"), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_read_console_matrix_huge_header() {
        assert!(matches!(
            read_console_matrix("1000000 1000000 1 2 3"),
            Err(CliError::Matrix(MatrixError::InsufficientData { expected: 1_000_000_000_000, found: 3 }))
        ));
    }

    #[test]
    fn test_load_matrix_from_stdin() {
        let parsed = cli(&[]).unwrap();
        let m = load_matrix(&parsed, "1 2\n3 4".as_bytes()).unwrap();
        assert_eq!(m.as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn test_unit_check_output() {
        let out = run(&cli(&[]).unwrap(), &Engine::default(), &sample()).unwrap();
        assert_eq!(out, "\n1\n");
    }

    #[test]
    fn test_determinant_output() {
        let parsed = cli(&["det"]).unwrap();
        assert_eq!(run(&parsed, &Engine::default(), &sample()).unwrap(), "-306\n");

        let parsed = cli(&["det", "--json"]).unwrap();
        let out = run(&parsed, &Engine::default(), &sample()).unwrap();
        let value: JsonValue = serde_json::from_str(&out).unwrap();
        assert_eq!(value["determinant"], -306.0);
        assert_eq!(value["strategy"], "cofactor");
    }

    #[test]
    fn test_transpose_and_inverse_output() {
        let m = read_console_matrix("2 2 2 1 1 1").unwrap();
        let parsed = cli(&["transpose"]).unwrap();
        assert_eq!(run(&parsed, &Engine::default(), &m).unwrap(), "2 1\n1 1\n");

        let parsed = cli(&["inverse"]).unwrap();
        assert_eq!(run(&parsed, &Engine::default(), &m).unwrap(), "1 -1\n-1 2\n");
    }

    #[test]
    fn test_inverse_errors_carry_codes() {
        let singular = read_console_matrix("2 2 1 2 2 4").unwrap();
        let err = run(&cli(&["inverse"]).unwrap(), &Engine::default(), &singular).unwrap_err();
        assert_eq!(err.code(), "SINGULAR");

        let wide = read_console_matrix("2 3 1 2 3 4 5 6").unwrap();
        let err = run(&cli(&["det"]).unwrap(), &Engine::default(), &wide).unwrap_err();
        assert_eq!(err.code(), "NOT_SQUARE");
    }

    #[test]
    fn test_flags_override_base_config() {
        let parsed = cli(&["--strategy", "elimination", "--workers", "3"]).unwrap();
        let base = EngineConfig::default().with_strategy(StrategyKind::Parallel).with_workers(8);
        let config = apply_flags(&parsed, base.clone());
        assert_eq!(config.strategy, StrategyKind::Elimination);
        assert_eq!(config.workers, 3);

        // No flags leaves the base untouched
        assert_eq!(apply_flags(&cli(&[]).unwrap(), base.clone()), base);
    }
}
