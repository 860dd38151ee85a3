use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use skycast::api::AppState;
use skycast::config::SkycastConfig;
use skycast::forecast_service::ForecastService;
use skycast::location_resolver::{LocationInput, LocationResolver};
use skycast::open_meteo::OpenMeteoClient;
use skycast::{cache, presenter, web};

/// Hourly weather forecast for the terminal and web, backed by Open-Meteo
#[derive(Parser, Debug)]
#[command(name = "skycast", version, about)]
struct Cli {
    /// Place name ("Berlin") or coordinates ("52.52,13.40")
    #[arg(required_unless_present = "serve")]
    location: Option<String>,

    /// Number of forecast days (1-16)
    #[arg(long)]
    days: Option<u32>,

    /// Run the web presenter instead of printing to the terminal
    #[arg(long)]
    serve: bool,

    /// Port for the web presenter
    #[arg(long)]
    port: Option<u16>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bypass the forecast cache
    #[arg(long)]
    no_cache: bool,

    /// Verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{}", presenter::error_banner(&err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = SkycastConfig::load_from_path(cli.config.clone())?;
    if let Some(days) = cli.days {
        config.defaults.forecast_days = days;
    }
    if let Some(port) = cli.port {
        config.defaults.port = port;
    }
    config.validate()?;

    init_logging(&config, cli.verbose);

    if let Err(err) = cache::init(config.cache_dir()) {
        // A broken cache degrades to fetching every time, it never blocks a forecast.
        warn!("Forecast cache unavailable: {err:#}");
    }

    let client = OpenMeteoClient::new(&config)?;

    if cli.serve {
        let port = config.defaults.port;
        let state = Arc::new(AppState { config, client });
        return web::run(state, port).await;
    }

    let input = LocationInput::parse(cli.location.as_deref().unwrap_or_default())?;
    let location = LocationResolver::resolve(&client, input).await?;

    let mut service = ForecastService::new(&client, &config);
    if cli.no_cache {
        service = service.without_cache();
    }
    let snapshot = service.snapshot_for(&location).await?;

    print!("{}", presenter::render_snapshot(&location, &snapshot));
    Ok(())
}

fn init_logging(config: &SkycastConfig, verbose: bool) {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.format == "compact" {
        builder.compact().init();
    } else {
        builder.pretty().init();
    }
}
