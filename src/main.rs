/// Version injected at compile time via STACKSWEEP_VERSION env var (set by
/// CI/CD), or "dev" for local builds.
pub const VERSION: &str = match option_env!("STACKSWEEP_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use stacksweep::config::Config;
use stacksweep::sweep::{CleanupOrchestrator, Mode};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Cleanup reaper for OpenStack-style clouds
#[derive(Parser, Debug)]
#[command(name = "stacksweep", version = VERSION, about, long_about = None)]
struct Args {
    /// Capture the baseline of pre-existing global resources and exit
    #[arg(long, conflicts_with = "dry_run")]
    capture_baseline: bool,

    /// Report deletion candidates without mutating cloud state
    #[arg(long)]
    dry_run: bool,

    /// Also delete the harness's own pinned fixtures
    #[arg(long)]
    purge_harness_fixtures: bool,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the baseline snapshot path from the config
    #[arg(long)]
    baseline_file: Option<PathBuf>,

    /// Override the dry-run report path from the config
    #[arg(long)]
    report_file: Option<PathBuf>,

    /// Log level for stderr progress output
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Also append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
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
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<&Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(tracing_level).into())
        .from_env_lossy();

    let guard = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .expect("Failed to open log file");
            let (non_blocking, guard) = tracing_appender::non_blocking(file);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr.and(non_blocking))
                .with_ansi(false)
                .with_target(false)
                .init();

            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .init();
            None
        }
    };

    guard
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level, args.log_file.as_deref());

    if let Err(err) = run(args).await {
        // Full error chain to stderr before the non-zero exit
        tracing::error!("Run failed: {:?}", err);
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;

    if let Some(path) = args.baseline_file {
        config.baseline_file = path;
    }
    if let Some(path) = args.report_file {
        config.report_file = path;
    }

    let mode = if args.capture_baseline {
        Mode::InitState
    } else if args.dry_run {
        Mode::DryRun
    } else {
        Mode::Delete
    };
    let preserve = !args.purge_harness_fixtures;

    tracing::info!(
        "stacksweep {} starting in {} mode (preserve={})",
        VERSION,
        mode.as_str(),
        preserve
    );

    let orchestrator = CleanupOrchestrator::new(config, mode, preserve)?;
    orchestrator.run().await
}
