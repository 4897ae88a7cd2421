use std::fmt;
use std::process::ExitCode;
use std::sync::Arc;

use quiz_core::ingest::IssueKind;
use storage::{ColumnPolicy, FileSource, QuestionLoader};
use tracing_subscriber::EnvFilter;

const DEFAULT_PATH: &str = "public/questions.csv";

#[derive(Debug, Clone)]
struct Args {
    path: String,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPath { raw } => write!(f, "invalid --path value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

enum Parsed {
    Run(Args),
    Help,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Parsed, ArgsError> {
        let mut path = std::env::var("QUIZ_DATA_PATH").unwrap_or_else(|_| DEFAULT_PATH.into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--path" => {
                    let value = require_value(&mut args, "--path")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidPath { raw: value });
                    }
                    path = value;
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { path }))
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin validate -- [--path <file>]");
    eprintln!();
    eprintln!("Checks every row of the question table and exits non-zero on any problem.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --path <file>   Question table (default: {DEFAULT_PATH})");
    eprintln!("  -h, --help      Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_PATH, RUST_LOG");
}

async fn run(args: Args) -> ExitCode {
    println!("--- Starting Data Validation ---");

    let loader = QuestionLoader::new(Arc::new(FileSource::new(&args.path)))
        .with_policy(ColumnPolicy::Exact);
    let report = match loader.report().await {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }

    if report.is_clean() {
        println!(
            "--- Validation Passed: {} questions in {} ---",
            report.questions.len(),
            args.path
        );
        ExitCode::SUCCESS
    } else {
        eprintln!(
            "--- Validation Failed: {} errors found ({} malformed, {} invalid) ---",
            report.diagnostics.len(),
            report.count_of(IssueKind::Malformed),
            report.count_of(IssueKind::Invalid),
        );
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Args::parse(std::env::args().skip(1)) {
        Ok(Parsed::Run(args)) => run(args).await,
        Ok(Parsed::Help) => {
            print_usage();
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            ExitCode::from(2)
        }
    }
}
