//! Web application status poller entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use webapp_status::config::{Config, VERBOSE_LOG_DIRECTIVE};
use webapp_status::display::{format_block, spawn_terminal_view, Dashboard};
use webapp_status::metrics;
use webapp_status::render::RenderFormat;
use webapp_status::status::HttpStatusSource;
use webapp_status::utils::shutdown_signal;
use webapp_status::StatusPoller;

/// Web application status poller.
#[derive(Parser, Debug)]
#[command(name = "webapp-status")]
#[command(about = "Polls a web application's info and health endpoints")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the application (overrides STATUS_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Seconds between health checks (overrides HEALTH_INTERVAL_SECS).
    #[arg(long, global = true)]
    interval_secs: Option<u64>,

    /// Region content format: text or html (overrides RENDER_FORMAT).
    #[arg(long, global = true)]
    format: Option<RenderFormat>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show app info once, then health every interval (default).
    Watch,

    /// Fetch and print app info once.
    Info,

    /// Fetch and print health once.
    Health,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration first so VERBOSE and RUST_LOG shape the filter
    let loaded = Config::load().map(|config| apply_overrides(config, &args));

    // Initialize logging; stdout is reserved for the regions
    let directive = match &loaded {
        Ok(config) => config.log_directive().to_string(),
        Err(_) if args.verbose => VERBOSE_LOG_DIRECTIVE.to_string(),
        Err(_) => "info".to_string(),
    };
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(loaded).await,
        Some(Command::Info) => cmd_info(validated(loaded)?).await,
        Some(Command::Health) => cmd_health(validated(loaded)?).await,
        Some(Command::Watch) | None => cmd_watch(validated(loaded)?).await,
    }
}

/// Apply CLI overrides on top of the environment.
fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(base_url) = &args.base_url {
        config.status_base_url = base_url.clone();
    }
    if let Some(interval_secs) = args.interval_secs {
        config.health_interval_secs = interval_secs;
    }
    if let Some(format) = args.format {
        config.render_format = format;
    }
    config.verbose |= args.verbose;
    config
}

/// Surface load errors and validate.
fn validated(loaded: Result<Config, envy::Error>) -> anyhow::Result<Config> {
    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    Ok(config)
}

/// Check configuration validity.
async fn cmd_check_config(loaded: Result<Config, envy::Error>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("WEBAPP STATUS - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match validated(loaded) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(e);
        }
    };

    print!("Building HTTP client... ");
    let source = match HttpStatusSource::new(&config) {
        Ok(s) => {
            println!("OK");
            s
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("HTTP client setup failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Info URL: {}", source.info_url());
    println!("  Health URL: {}", source.health_url());
    println!("  Health Interval: {}s", config.health_interval_secs);
    println!("  Request Timeout: {}ms", config.http_timeout_ms);
    println!("  Connect Timeout: {}ms", config.http_connect_timeout_ms);
    println!("  App Version: {}", config.app_version);
    println!("  Format: {}", config.render_format);
    println!("  Log Filter: {}", config.log_directive());
    match config.metrics_port {
        Some(port) => println!("  Metrics: port {}", port),
        None => println!("  Metrics: Disabled"),
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Fetch and print app info once.
async fn cmd_info(config: Config) -> anyhow::Result<()> {
    let poller = StatusPoller::from_config(HttpStatusSource::new(&config)?, Dashboard::new(), &config);

    poller.load_app_info().await;

    let region = &poller.dashboard().app_info;
    println!("{}", format_block(region.id(), &region.content()));
    Ok(())
}

/// Fetch and print health once.
async fn cmd_health(config: Config) -> anyhow::Result<()> {
    let poller = StatusPoller::from_config(HttpStatusSource::new(&config)?, Dashboard::new(), &config);

    poller.check_health().await;

    let region = &poller.dashboard().health_status;
    println!("{}", format_block(region.id(), &region.content()));
    Ok(())
}

/// Run the poller until Ctrl-C or SIGTERM.
async fn cmd_watch(config: Config) -> anyhow::Result<()> {
    if let Some(port) = config.metrics_port {
        metrics::install_exporter(port)?;
    }

    let source = HttpStatusSource::new(&config)?;
    info!("Info endpoint: {}", source.info_url());
    info!("Health endpoint: {}", source.health_url());

    let poller = StatusPoller::from_config(source, Dashboard::new(), &config);
    let view = spawn_terminal_view(poller.dashboard());
    let handle = poller.initialize();

    shutdown_signal().await;

    info!("Shutting down...");
    handle.shutdown().await;
    view.abort();

    Ok(())
}
