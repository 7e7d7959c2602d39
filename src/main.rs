//! touch-gestured - Touch Gesture Daemon
//!
//! Entry point for the daemon binary.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use touch_gestured::config::types::BusType;
use touch_gestured::config::{Config, Overrides};
use touch_gestured::server::GestureDaemon;
use touch_gestured::source::{open_source, ContactSource};

/// Command-line arguments for touch-gestured
#[derive(Parser, Debug)]
#[command(name = "touch-gestured")]
#[command(version, about = "Touch Gesture Daemon", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON-lines input source ('-' for stdin, repeatable)
    #[arg(short, long, default_value = "-")]
    pub input: Vec<String>,

    /// Drag threshold in device pixels
    #[arg(long, env = "TOUCH_GESTURED_DRAG_THRESHOLD_PX")]
    pub drag_threshold_px: Option<f64>,

    /// Long-press threshold in milliseconds
    #[arg(long, env = "TOUCH_GESTURED_LONG_PRESS_MS")]
    pub long_press_ms: Option<u64>,

    /// Message bus to publish on
    #[arg(long, env = "TOUCH_GESTURED_BUS", value_enum)]
    pub bus: Option<BusType>,

    /// Do not execute bound key chords locally
    #[arg(long)]
    pub no_actions: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stdout)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            drag_threshold_px: self.drag_threshold_px,
            long_press_ms: self.long_press_ms,
            bus: self.bus,
            disable_actions: self.no_actions,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration before logging so [logging] can take effect
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let (config, load_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let config = config.with_overrides(&args.overrides());

    let _guard = init_logging(&args, &config)?;

    info!("════════════════════════════════════════════════════════");
    info!("  touch-gestured v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {}", env!("BUILD_DATE"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!("  Profile: {}", if cfg!(debug_assertions) { "debug" } else { "release" });
    info!("════════════════════════════════════════════════════════");

    if let Some(e) = load_error {
        tracing::warn!(
            "Failed to load config from {}: {:#}, using defaults",
            config_path.display(),
            e
        );
    }

    if let Err(e) = config.validate() {
        eprintln!("{}", touch_gestured::utils::format_user_error(&e));
        return Err(e);
    }

    touch_gestured::utils::log_startup_diagnostics(&config);

    info!("Configuration loaded successfully");
    tracing::debug!("Config: {:?}", config);

    let mut sources: Vec<Box<dyn ContactSource>> = Vec::with_capacity(args.input.len());
    for path in &args.input {
        match open_source(path)
            .await
            .with_context(|| format!("Failed to open input source {}", path))
        {
            Ok(source) => sources.push(source),
            Err(e) => {
                eprintln!("{}", touch_gestured::utils::format_user_error(&e));
                return Err(e);
            }
        }
    }

    info!("Initializing Gesture Daemon");
    let daemon = match GestureDaemon::new(config).await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", touch_gestured::utils::format_user_error(&e));
            return Err(e);
        }
    };

    info!("Starting Gesture Daemon");
    if let Err(e) = daemon.run(sources).await {
        eprintln!("{}", touch_gestured::utils::format_user_error(&e));
        return Err(e);
    }

    info!("Gesture Daemon shut down");
    Ok(())
}

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

fn format_layer<W>(format: &str, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);

    match format {
        "json" => layer.json().boxed(),
        "compact" => layer.compact().boxed(),
        _ if ansi => layer.pretty().boxed(),
        _ => layer.boxed(),
    }
}

fn init_logging(args: &Args, config: &Config) -> Result<Option<WorkerGuard>> {
    let log_level = match args.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // zbus logs every message at debug
        tracing_subscriber::EnvFilter::new(format!(
            "touch_gestured={level},zbus=warn,warn",
            level = log_level
        ))
    });

    let mut layers: Vec<BoxedLayer> = vec![format_layer(&args.log_format, std::io::stdout, true)];

    if let Some(log_file_path) = &args.log_file {
        let file = std::fs::File::create(log_file_path)
            .with_context(|| format!("Failed to create log file {}", log_file_path.display()))?;
        layers.push(format_layer(&args.log_format, file, false));
    }

    let mut guard = None;
    if let Some(log_dir) = &config.logging.log_dir {
        let appender = tracing_appender::rolling::daily(log_dir, "touch-gestured.log");
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        layers.push(format_layer(&args.log_format, writer, false));
        guard = Some(worker_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .init();

    if let Some(log_file_path) = &args.log_file {
        info!("Logging to file: {}", log_file_path.display());
    }
    if let Some(log_dir) = &config.logging.log_dir {
        info!("Rolling logs in: {}", log_dir.display());
    }

    Ok(guard)
}
