use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tokio::sync::broadcast;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use risk_monitor::alert;
use risk_monitor::config::Config;
use risk_monitor::error::MonitorError;
use risk_monitor::loop_controller::{LoopController, LoopResult};
use risk_monitor::shutdown::ShutdownListener;
use risk_monitor::source::{FileSource, ListingSource};

/// Risk Monitor: log processes the kernel risk module flags at a given tier
#[derive(Parser, Debug)]
#[command(name = "risk-monitor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (TOML format)
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Process risk listing to poll (default: /proc/mod2)
    #[arg(short = 's', long = "source")]
    source: Option<PathBuf>,

    /// Append-only log of flagged lines; its directory must exist
    #[arg(short = 'l', long = "log-file")]
    log_file: Option<PathBuf>,

    /// Substring that flags a process line (default: "Medio")
    #[arg(short = 'm', long = "marker")]
    marker: Option<String>,

    /// Milliseconds to wait between reads (default: 5000)
    #[arg(short = 'i', long = "interval-ms")]
    interval_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("risk_monitor=debug,info")
    } else {
        EnvFilter::new("risk_monitor=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config, MonitorError> {
    let mut config = if let Some(ref config_path) = cli.config {
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    config.merge_cli_args(
        cli.source.clone(),
        cli.log_file.clone(),
        cli.marker.clone(),
        cli.interval_ms,
    );
    config.validate()?;

    Ok(config)
}

/// Broadcast shutdown on SIGINT
///
/// The handler is registered before this returns, so a signal arriving right
/// after the banner is never missed.
fn install_interrupt_handler(shutdown_tx: broadcast::Sender<()>) -> Result<(), MonitorError> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigint = signal(SignalKind::interrupt()).map_err(MonitorError::SignalError)?;
        tokio::spawn(async move {
            sigint.recv().await;
            debug!("Received Ctrl+C");
            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Received Ctrl+C");
                let _ = shutdown_tx.send(());
            }
        });
    }

    Ok(())
}

async fn run(
    config: Config,
    shutdown_rx: broadcast::Receiver<()>,
) -> Result<LoopResult, MonitorError> {
    let source = FileSource::new(config.source_path.clone());

    println!(
        "Monitoring high-risk processes in {}. Press Ctrl+C to exit.",
        source.describe().cyan()
    );
    info!(
        "Flagging lines containing {:?}, logging to {}",
        config.risk_marker,
        config.log_path.display()
    );
    debug!("Poll interval: {:?}", config.poll_interval());

    let controller = LoopController::new(config, source);
    controller.run(ShutdownListener::new(shutdown_rx)).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    alert::force_colors();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    if let Err(e) = install_interrupt_handler(shutdown_tx) {
        error!("{}", e);
        std::process::exit(1);
    }

    match run(config, shutdown_rx).await {
        Ok(LoopResult::Shutdown {
            cycles,
            alerts,
            failed_cycles,
        }) => {
            println!(
                "\n{} Stopping risk monitor after {} cycle(s), {} alert(s), {} failed cycle(s)",
                "INTERRUPTED:".yellow().bold(),
                cycles,
                alerts,
                failed_cycles
            );
            std::process::exit(0);
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
