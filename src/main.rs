//! Printwatch CLI
//!
//! Polls a 3D printer monitoring plugin's status endpoint and surfaces its
//! alerts in the terminal, remembering dismissals across runs.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use printwatch::{
    AlertGatekeeper, ConsolePresenter, FileStore, HttpConfig, HttpPluginApi, PluginMonitor,
    StatusSource,
};

#[derive(Parser)]
#[command(name = "printwatch")]
#[command(about = "Watch a 3D printer monitoring plugin and surface its alerts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the plugin status and present alerts
    Watch {
        /// Plugin host base URL
        #[arg(long, default_value = "http://localhost:5000")]
        url: String,
        /// Plugin identifier in the API path
        #[arg(long, default_value = "printwatch")]
        plugin_id: String,
        /// Poll interval in seconds
        #[arg(long, short, default_value = "30")]
        interval: u64,
    },
    /// Fetch the plugin status once and print it
    Status {
        /// Plugin host base URL
        #[arg(long, default_value = "http://localhost:5000")]
        url: String,
        /// Plugin identifier in the API path
        #[arg(long, default_value = "printwatch")]
        plugin_id: String,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// List alerts dismissed with "never show again"
    Dismissed,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Watch {
            url,
            plugin_id,
            interval,
        } => run_watch(url, plugin_id, interval),
        Commands::Status {
            url,
            plugin_id,
            json,
        } => run_status(url, plugin_id, json),
        Commands::Dismissed => run_dismissed(),
    }
}

fn api(url: String, plugin_id: String) -> Result<HttpPluginApi> {
    HttpPluginApi::new(HttpConfig {
        base_url: url,
        plugin_id,
        timeout_secs: 30,
    })
}

fn run_watch(url: String, plugin_id: String, interval: u64) -> Result<()> {
    let api = api(url, plugin_id.clone())?;
    let mut monitor = PluginMonitor::new(
        plugin_id,
        AlertGatekeeper::new(FileStore::new()),
        api.clone(),
        api,
        ConsolePresenter::new(),
    );

    info!(interval_secs = interval, "starting watch loop");
    loop {
        monitor.refresh()?;
        thread::sleep(Duration::from_secs(interval));
    }
}

fn run_status(url: String, plugin_id: String, json: bool) -> Result<()> {
    let api = api(url, plugin_id)?;
    let status = api.fetch_status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "server:    {}",
        if status.server_status.is_connected {
            "connected"
        } else {
            "disconnected"
        }
    );
    println!(
        "streaming: {}{}",
        if status.streaming_status.premium_streaming {
            "premium"
        } else {
            "basic"
        },
        if status.streaming_status.is_pi_camera {
            " (pi camera)"
        } else {
            ""
        }
    );
    println!(
        "errors:    server {}/{}, webcam {}/{}",
        status.error_stats.server.error_count,
        status.error_stats.server.attempts,
        status.error_stats.webcam.error_count,
        status.error_stats.webcam.attempts
    );
    println!("alerts:    {}", status.alerts.len());
    for alert in &status.alerts {
        println!("  - {} ({})", alert.cause, alert.level);
    }
    Ok(())
}

fn run_dismissed() -> Result<()> {
    let store = FileStore::new();
    let entries = store.entries()?;
    if entries.is_empty() {
        println!("no dismissed alerts");
        return Ok(());
    }
    for (key, value) in entries {
        if value {
            println!("{}", key);
        }
    }
    Ok(())
}
