use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::report_service::export_to;
use services::{AppServices, ReportService, SessionStore};
use ui::{App, UiApp, build_app_context};

mod logging;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    UnexpectedFlag { flag: &'static str, command: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::UnexpectedFlag { flag, command } => {
                write!(f, "{flag} is not supported by `{command}`")
            }
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
    session: Arc<SessionStore>,
    reports: Arc<ReportService>,
}

impl UiApp for DesktopApp {
    fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    fn reports(&self) -> Arc<ReportService> {
        Arc::clone(&self.reports)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [ui]  [--db <sqlite_url>] [--export-dir <path>] [--verbose]");
    eprintln!("  app report [--db <sqlite_url>] [--out <path>] [--verbose]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db          sqlite://<data dir>/saas-weekend/weekend.sqlite3");
    eprintln!("  --export-dir  <downloads dir>");
    eprintln!("  report prints to stdout unless --out is given");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WEEKEND_DB_URL, WEEKEND_EXPORT_DIR, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Report,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "report" => Some(Self::Report),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Command::Ui => "ui",
            Command::Report => "report",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    command: Command,
    db_url: String,
    export_dir: PathBuf,
    out: Option<PathBuf>,
    verbose: bool,
    help: bool,
}

/// Values consulted when a flag is not given on the command line.
struct Defaults {
    db_url: String,
    export_dir: PathBuf,
}

impl Defaults {
    fn from_env() -> Self {
        let db_url = std::env::var("WEEKEND_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(default_db_url, normalize_sqlite_url);
        let export_dir = std::env::var_os("WEEKEND_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_export_dir);
        Self { db_url, export_dir }
    }
}

impl Args {
    fn parse(argv: Vec<String>, defaults: Defaults) -> Result<Self, ArgsError> {
        let mut iter = argv.into_iter().peekable();

        // Launching the UI is the default when no subcommand is given.
        let command = match iter.peek().map(String::as_str) {
            Some(first) if !first.starts_with('-') => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?;
                iter.next();
                command
            }
            _ => Command::Ui,
        };

        let mut args = Self {
            command,
            db_url: defaults.db_url,
            export_dir: defaults.export_dir,
            out: None,
            verbose: false,
            help: false,
        };

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut iter, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    args.db_url = normalize_sqlite_url(value);
                }
                "--export-dir" => {
                    args.export_dir = PathBuf::from(require_value(&mut iter, "--export-dir")?);
                }
                "--out" => {
                    if command != Command::Report {
                        return Err(ArgsError::UnexpectedFlag {
                            flag: "--out",
                            command: command.name(),
                        });
                    }
                    args.out = Some(PathBuf::from(require_value(&mut iter, "--out")?));
                }
                "--verbose" | "-v" => args.verbose = true,
                "--help" | "-h" => args.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(args)
    }
}

fn default_db_url() -> String {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    let path = base.join("saas-weekend").join("weekend.sqlite3");
    format!("sqlite://{}", path.display())
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = Args::parse(argv, Defaults::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    logging::init_tracing(args.verbose)?;
    tracing::debug!(command = args.command.name(), db = %args.db_url, "starting");

    // Open + migrate SQLite and load the session before any UI exists, so a
    // corrupt blob stops the launch instead of being overwritten.
    prepare_sqlite_file(&args.db_url)?;
    let services = AppServices::new_sqlite(&args.db_url, args.export_dir.clone()).await?;

    match args.command {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                session: services.session(),
                reports: services.reports(),
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("SaaS Weekend")
                    .with_always_on_top(false),
            );

            tracing::info!(export_dir = %args.export_dir.display(), "launching desktop ui");
            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Report => {
            let report = services.reports().compile(&services.session().snapshot());
            match args.out {
                Some(path) => {
                    let written = export_to(&report, &path)?;
                    eprintln!("report written to {}", written.display());
                }
                None => print!("{report}"),
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
