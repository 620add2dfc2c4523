use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, QuizCatalogService, QuizClientConfig, QuizSessionService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTimeBudget { raw: String },
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTimeBudget { raw } => {
                write!(f, "invalid --time-budget value: {raw}")
            }
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
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
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<QuizCatalogService> {
        self.services.catalog()
    }

    fn sessions(&self) -> Arc<QuizSessionService> {
        self.services.sessions()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <base_url>] [--time-budget <secs>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api http://localhost:1000");
    eprintln!("  --time-budget 300");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  QUIZ_API_BASE_URL, QUIZ_TIME_BUDGET_SECS, QUIZ_HTTP_TIMEOUT_SECS, RUST_LOG");
}

enum Parsed {
    Run(QuizClientConfig),
    Help,
}

/// Apply command-line overrides on top of the environment configuration.
fn parse_args(
    mut config: QuizClientConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<Parsed, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api" => {
                let value = require_value(args, "--api")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidApiUrl { raw: value });
                }
                config = config.with_api_base_url(value.trim());
            }
            "--time-budget" => {
                let value = require_value(args, "--time-budget")?;
                config = value
                    .trim()
                    .parse()
                    .ok()
                    .and_then(|secs| config.clone().with_time_budget_secs(secs).ok())
                    .ok_or(ArgsError::InvalidTimeBudget { raw: value })?;
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(Parsed::Run(config))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = QuizClientConfig::from_env()?;
    let mut argv = std::env::args().skip(1);
    let config = match parse_args(config, &mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })? {
        Parsed::Run(config) => config,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    let services = AppServices::from_config(&config, Clock::system())?;
    tracing::info!(
        api = %config.api_base_url,
        time_budget_secs = config.time_budget_secs,
        "launching quiz client"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // Fullscreen is driven per attempt; the window itself starts windowed.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
