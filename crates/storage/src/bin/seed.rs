use std::fmt;
use std::path::PathBuf;

use storage::bank::{BUILTIN_BANK, load_bank_file, parse_bank};
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    file: Option<PathBuf>,
    limit: Option<u32>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidLimit { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("QUIZ_DB_URL").unwrap_or_else(|_| "sqlite:quiz.sqlite3?mode=rwc".into());
        let mut file = std::env::var("QUIZ_BANK").ok().map(PathBuf::from);
        let mut limit = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--file" => {
                    let value = require_value(&mut args, "--file")?;
                    file = Some(PathBuf::from(value));
                }
                "--limit" => {
                    let value = require_value(&mut args, "--limit")?;
                    let parsed = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidLimit { raw: value.clone() })?;
                    limit = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            file,
            limit,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:quiz.sqlite3?mode=rwc)");
    eprintln!("  --file <bank.json>        Question bank to import (default: built-in bank)");
    eprintln!("  --limit <n>               Import only the first n questions");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  QUIZ_DB_URL, QUIZ_BANK");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let mut questions = match args.file.as_deref() {
        Some(path) => load_bank_file(path)?,
        None => parse_bank(BUILTIN_BANK)?,
    };
    if let Some(limit) = args.limit {
        questions.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }

    let storage = Storage::sqlite(&args.db_url).await?;
    for question in &questions {
        storage.questions.upsert_question(question).await?;
    }
    let total = storage.questions.count_questions().await?;

    println!(
        "Seeded {} questions into {} ({} total)",
        questions.len(),
        args.db_url,
        total
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
