//! Main entry point for the Solo Arena scenario runner
//!
//! Loads configuration, initialises logging, and runs a queue scenario
//! through the solo arena manager, printing the report as JSON.

use anyhow::Result;
use clap::Parser;
use solo_arena::config::{validate_config, AppConfig};
use solo_arena::events::TracingEventPublisher;
use solo_arena::metrics::MetricsCollector;
use solo_arena::simulation::{run_scenario, Scenario};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Solo Arena - individual 3v3 arena queueing
#[derive(Parser)]
#[command(
    name = "solo-arena",
    version,
    about = "Role-balanced solo 3v3 arena team assembly and leave penalties",
    long_about = "Solo Arena assembles two teams of three from players who queue alone, \
                 balancing two damage dealers and one healer per side, creates temporary \
                 arena teams for the match, and counts early departures as losses."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Scenario file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to a queue scenario (TOML format)"
    )]
    scenario: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Balance teams by MMR
    #[arg(long, help = "Split damage dealers to minimise the MMR gap")]
    balance_by_mmr: bool,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Print metrics after the run
    #[arg(long, help = "Print Prometheus metrics after the scenario")]
    print_metrics: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without running")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display startup banner with the active settings
fn display_startup_banner(config: &AppConfig) {
    info!("Solo Arena v{}", solo_arena::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   Leave penalty: {} in match, {} before start",
        config.solo.rating_penalty_leave_during_match,
        config.solo.rating_penalty_leave_before_match_start
    );
    info!(
        "   Stop incomplete games: {}",
        config.solo.stop_game_incomplete
    );
    info!(
        "   Block forbidden talents: {} (threshold {})",
        config.solo.block_forbidden_talents, config.solo.forbidden_talent_threshold
    );
    info!("   Balance by MMR: {}", config.solo.balance_teams_by_mmr);
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if args.balance_by_mmr {
        config.solo.balance_teams_by_mmr = true;
    }

    validate_config(&config)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Configuration validation successful");
        return Ok(());
    }

    let Some(scenario_path) = &args.scenario else {
        error!("No scenario given; pass --scenario <FILE>");
        std::process::exit(2);
    };

    info!("Loading scenario from: {}", scenario_path.display());
    let scenario = Scenario::from_file(scenario_path)?;

    let metrics = Arc::new(MetricsCollector::new()?);
    let report = run_scenario(
        &scenario,
        &config,
        Arc::new(TracingEventPublisher),
        metrics.clone(),
    )
    .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if args.print_metrics {
        print!("{}", metrics.gather_text()?);
    }

    Ok(())
}
