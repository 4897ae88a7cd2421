mod commands;

use std::fmt;
use std::process::ExitCode;

use quiz_core::model::{Difficulty, QuestionPool};
use quiz_core::timer::{Countdown, TimerEvent};
use services::{Clock, DataLocation, QuestionGenerator, QuizConfig, QuizService, QuizSession, TimerTask};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use commands::{Command, print_help, render_question, render_result};

const LOW_TIME_SECS: u32 = 60;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
    InvalidTimeLimit { raw: String },
    InvalidDifficulty { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidTimeLimit { raw } => write!(f, "invalid --time-limit value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => write!(
                f,
                "invalid --difficulty value: {raw} (expected \"Middle School\", \"High School\" or \"University\")"
            ),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    config: QuizConfig,
    generate: bool,
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>, mut config: QuizConfig) -> Result<Parsed, ArgsError> {
        let mut generate = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => config.data = DataLocation::File(require_value(&mut args, "--data")?),
                "--url" => config.data = DataLocation::Url(require_value(&mut args, "--url")?),
                "--count" => {
                    let value = require_value(&mut args, "--count")?;
                    config.question_count = value
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or(ArgsError::InvalidCount { raw: value })?;
                }
                "--time-limit" => {
                    let value = require_value(&mut args, "--time-limit")?;
                    config.time_limit_secs = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidTimeLimit { raw: value.clone() })?;
                }
                "--difficulty" => {
                    let value = require_value(&mut args, "--difficulty")?;
                    config.difficulty = value
                        .parse::<Difficulty>()
                        .map_err(|_| ArgsError::InvalidDifficulty { raw: value.clone() })?;
                }
                "--generate" => generate = true,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { config, generate }))
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data <file>           Question table (default: public/questions.csv)");
    eprintln!("  --url <url>             Fetch the question table over HTTP instead");
    eprintln!("  --count <n>             Questions per session (default: 9)");
    eprintln!("  --time-limit <secs>     Session countdown (default: 600)");
    eprintln!("  --difficulty <level>    Middle School | High School | University");
    eprintln!("  --generate              Ask the generative service for questions");
    eprintln!("  -h, --help              Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_PATH, QUIZ_DATA_URL, QUIZ_QUESTION_COUNT, QUIZ_TIME_LIMIT_SECS,");
    eprintln!("  QUIZ_DIFFICULTY, QUIZ_AI_API_KEY, QUIZ_AI_BASE_URL, QUIZ_AI_MODEL, RUST_LOG");
}

async fn load_pool(service: &QuizService, args: &Args) -> Result<QuestionPool, Box<dyn std::error::Error>> {
    if args.generate {
        let generator = QuestionGenerator::from_env();
        println!("Generating questions...");
        return Ok(service
            .generate_pool(&generator, args.config.question_count, args.config.difficulty)
            .await?);
    }

    let loaded = service.load_pool().await?;
    if !loaded.diagnostics.is_empty() {
        warn!(
            skipped = loaded.diagnostics.len(),
            source = %service.source_location(),
            "some question rows were skipped"
        );
    }
    Ok(loaded.pool)
}

fn show(session: &QuizSession, remaining_secs: u32) {
    if let (Some(question), Some(assembly)) = (session.current_question(), session.assembly()) {
        println!(
            "{}",
            render_question(
                session.current_index(),
                session.questions().len(),
                remaining_secs,
                question,
                assembly,
            )
        );
    }
}

/// Apply one command. Returns `false` when the learner quits.
fn apply(session: &mut QuizSession, command: Command) -> Result<bool, services::SessionError> {
    match command {
        Command::Place(index) => {
            if session.place_from_pool(index)?.is_none() {
                println!("Nothing placed: pick a listed word while a blank is empty.");
            }
        }
        Command::Remove(slot) => {
            if session.remove(slot)?.is_none() {
                println!("Blank {} is already empty.", slot + 1);
            }
        }
        Command::Clear => session.clear()?,
        Command::Submit => {
            if !session.can_submit() {
                println!("Fill every blank before submitting.");
            } else {
                let record = session.submit()?;
                if record.is_correct {
                    println!("Correct!");
                } else {
                    println!("Not quite. Expected: {}", record.correct_answer);
                }
            }
        }
        Command::Help => print_help(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let service = QuizService::from_config(Clock::default(), &args.config);
    let pool = load_pool(&service, &args).await?;
    let mut session =
        service.start_session(&pool, args.config.question_count, args.config.difficulty)?;

    let mut remaining = args.config.time_limit_secs;
    let mut timer = TimerTask::spawn(Countdown::new(remaining));
    let mut timer_running = true;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    show(&session, remaining);

    while !session.is_complete() {
        tokio::select! {
            event = timer.next_event(), if timer_running => match event {
                Some(TimerEvent::Ticked { remaining_secs }) => {
                    remaining = remaining_secs;
                    if remaining == LOW_TIME_SECS {
                        println!("One minute left!");
                    }
                }
                Some(TimerEvent::Expired) => {
                    println!("\nTime is up!");
                    session.time_up();
                }
                Some(TimerEvent::Idle) | None => timer_running = false,
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Some(command) => {
                        if !apply(&mut session, command)? {
                            break;
                        }
                    }
                    None => println!("Unknown command, type 'h' for help."),
                }
                show(&session, remaining);
            }
        }
    }

    drop(timer);
    println!("{}", render_result(&session.finish()?));
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::parse(std::env::args().skip(1), QuizConfig::from_env()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return ExitCode::from(2);
        }
    };

    if let Err(err) = run(args).await {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
