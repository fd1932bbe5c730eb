use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use tagsweep::aws::client::{SessionSettings, TaggingClient};
use tagsweep::config::Config;
use tagsweep::report;
use tagsweep::resource::{collect_inventory, RegionErrorPolicy};
use tracing_subscriber::EnvFilter;

/// Inventory tagged AWS resources across regions
#[derive(Parser, Debug)]
#[command(name = "tagsweep", version, about, long_about = None)]
struct Args {
    /// Region to sweep (repeatable); defaults to the built-in list
    #[arg(short, long = "region", value_name = "REGION")]
    regions: Vec<String>,

    /// AWS profile to use
    #[arg(short, long)]
    profile: Option<String>,

    /// Override the tagging API endpoint (e.g. LocalStack)
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Retries per page before a region is given up
    #[arg(long)]
    max_retries: Option<usize>,

    /// Stop at the first region that fails instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Log level for diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn setup_logging(level: LogLevel) -> tracing_appender::non_blocking::WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .init();

    tracing::debug!("tagsweep started with log level: {:?}", level);

    guard
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let config = Config::load();
    let regions = config.effective_regions(&args.regions);
    let settings = SessionSettings {
        profile: config.effective_profile(args.profile.as_deref()),
        endpoint_url: config.effective_endpoint_url(args.endpoint_url.as_deref()),
    };

    let mut retry = config.retry.to_policy();
    if let Some(max_retries) = args.max_retries {
        retry.max_retries = max_retries;
    }

    let on_error = if args.fail_fast {
        RegionErrorPolicy::Abort
    } else {
        config.on_region_error
    };

    tracing::info!(
        "Sweeping {} regions (profile: {}, retries: {}, on error: {:?})",
        regions.len(),
        settings.profile.as_deref().unwrap_or("default"),
        retry.max_retries,
        on_error
    );

    let client = TaggingClient::new(settings);
    let inventory = collect_inventory(&client, &regions, &retry, on_error)
        .await
        .context("Inventory aborted")?;

    report::print_inventory(&inventory);

    // Partial inventories still print, but the exit status says so
    if inventory.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}
