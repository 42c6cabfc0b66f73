use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, QuestionSource, QuizService};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, prelude::*};
use ui::{App, UiApp, build_app_context};

const APP_TITLE: &str = "Cybersecurity MCQ Test";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    ConflictingSources,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::ConflictingSources => write!(f, "--db and --bank cannot be combined"),
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

struct DesktopApp {
    quiz: Arc<QuizService>,
}

impl UiApp for DesktopApp {
    fn title(&self) -> String {
        APP_TITLE.to_string()
    }

    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(QuestionSource),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url> | --bank <path.json>]");
    eprintln!();
    eprintln!("Without --db or --bank the built-in question bank is used.");
    eprintln!("Seed a database with: cargo run -p storage --bin seed -- --db <sqlite_url>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_BANK, RUST_LOG");
}

/// Flags win over the environment; `QUIZ_DB_URL` wins over `QUIZ_BANK`.
fn parse_args(
    args: impl IntoIterator<Item = String>,
    env_db: Option<String>,
    env_bank: Option<String>,
) -> Result<Parsed, ArgsError> {
    let mut db_url: Option<String> = None;
    let mut bank: Option<PathBuf> = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(&mut args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                db_url = Some(value);
            }
            "--bank" => {
                let value = require_value(&mut args, "--bank")?;
                bank = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    let source = match (db_url, bank) {
        (Some(_), Some(_)) => return Err(ArgsError::ConflictingSources),
        (Some(url), None) => QuestionSource::Sqlite(normalize_sqlite_url(url)),
        (None, Some(path)) => QuestionSource::BankFile(path),
        (None, None) => match (env_db, env_bank) {
            (Some(url), _) if !url.trim().is_empty() => {
                QuestionSource::Sqlite(normalize_sqlite_url(url))
            }
            (_, Some(path)) if !path.trim().is_empty() => {
                QuestionSource::BankFile(PathBuf::from(path))
            }
            _ => QuestionSource::Builtin,
        },
    };
    Ok(Parsed::Run(source))
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(log_fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = parse_args(
        std::env::args().skip(1),
        std::env::var("QUIZ_DB_URL").ok(),
        std::env::var("QUIZ_BANK").ok(),
    )
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let source = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(source) => source,
    };

    init_logging();

    if let QuestionSource::Sqlite(url) = &source {
        prepare_sqlite_file(url)?;
    }
    let services = AppServices::from_source(&source).await?;
    if services.quiz().available_questions().await? == 0 {
        tracing::warn!(?source, "question bank is empty; quizzes will not start");
    }

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz: services.quiz(),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(APP_TITLE)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
