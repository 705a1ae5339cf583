//! Guardian Dashboard CLI
//!
//! Drives the dashboard controller against a live monitoring API and writes
//! the rendered document as HTML:
//! - Render the dashboard once
//! - Keep it fresh on an interval
//! - Resolve an alert and show the reloaded view
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use guardian_dashboard::config::{generate_default_config, Config};
use guardian_dashboard::{
    ClientConfig, DashboardController, Document, HttpDashboardApi, LoadOutcome, ResolveOutcome,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PAGE_TITLE: &str = "Parental Control Dashboard";

#[derive(Parser)]
#[command(name = "guardian-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Screen-time, children and alert dashboard for a parental monitoring API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Monitoring API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the dashboard once and write it as HTML
    Render {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Reload the dashboard on an interval, rewriting the HTML each time
    Watch {
        /// Seconds between reloads (default: from config)
        #[arg(short, long)]
        interval: Option<u64>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve an alert, then write the reloaded dashboard
    Resolve {
        /// Alert identifier
        alert_id: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }

    init_logging(&config);

    match cli.command {
        Commands::Config { output } => {
            write_output(output.as_deref(), &generate_default_config())?;
        }

        Commands::Render { output } => {
            let controller = build_controller(&config)?;
            let outcome = controller.load_dashboard().await;
            let output = output.or_else(|| config.dashboard.output.clone());
            write_page(&controller, output.as_deref())?;

            if let LoadOutcome::Errored(message) = outcome {
                anyhow::bail!("Error loading dashboard: {}", message);
            }
        }

        Commands::Watch { interval, output } => {
            let controller = build_controller(&config)?;
            let interval = interval.unwrap_or(config.dashboard.refresh_interval_secs).max(1);
            let output = output.or_else(|| config.dashboard.output.clone());
            tracing::info!("Refreshing every {}s, press Ctrl-C to stop", interval);

            loop {
                let outcome = controller.load_dashboard().await;
                tracing::info!(generation = controller.generation(), ?outcome, "Dashboard refreshed");
                write_page(&controller, output.as_deref())?;

                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_secs(interval)) => {}
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Shutting down...");
                        break;
                    }
                }
            }
        }

        Commands::Resolve { alert_id, output } => {
            let controller = build_controller(&config)?;
            let outcome = controller.resolve_alert(&alert_id).await;
            let output = output.or_else(|| config.dashboard.output.clone());

            match outcome {
                ResolveOutcome::Resolved(reload) => {
                    write_page(&controller, output.as_deref())?;
                    if let LoadOutcome::Errored(message) = reload {
                        anyhow::bail!("Alert {} resolved, but reload failed: {}", alert_id, message);
                    }
                }
                ResolveOutcome::Failed(_) => {
                    for notification in controller.document().notifications() {
                        eprintln!("{}", notification);
                    }
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("guardian_dashboard={}", config.logging.level).into()
    });

    // Logs go to stderr so rendered HTML on stdout stays clean
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn build_controller(
    config: &Config,
) -> anyhow::Result<DashboardController<HttpDashboardApi, Document>> {
    let api = HttpDashboardApi::new(ClientConfig {
        base_url: config.api.base_url.clone(),
        request_timeout: config.api.request_timeout(),
    })?;
    tracing::info!("Monitoring API: {}", api.base_url());

    let dashboard = &config.dashboard;
    let document = Document::with_refresh_control(&dashboard.container_id, &dashboard.refresh_id);
    Ok(DashboardController::new(api, document, dashboard.container_id.clone()))
}

fn write_page(
    controller: &DashboardController<HttpDashboardApi, Document>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let page = controller.document().to_page(PAGE_TITLE)?;
    write_output(output, &page)
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
