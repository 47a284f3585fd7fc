//! `ibidash`: terminal dashboard for the HORSE IBI security stack.
//!
//! Built on [ratatui](https://ratatui.rs) over the reactive region store
//! of `ibidash-core`. Three pages are navigable with number keys (1-3):
//! Dashboard, Mitigations and Intents.
//!
//! Logs are written to a file (default `/tmp/ibidash.log`) so they never
//! corrupt the terminal. A background data bridge forwards every region
//! change, notice and clock update into the TUI action loop.
//!
//! Entry point: CLI parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod keymap;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ibidash_core::{Dashboard, DashboardConfig};

use crate::app::App;

/// Terminal dashboard for HORSE IBI intents, threats and mitigations.
#[derive(Parser, Debug)]
#[command(name = "ibidash", version, about)]
struct Cli {
    /// Config profile to use (defaults to `default_profile`)
    #[arg(short = 'p', long, env = "IBIDASH_PROFILE")]
    profile: Option<String>,

    /// IBI backend base URL (e.g., http://127.0.0.1:8000)
    #[arg(short = 'u', long, env = "IBIDASH_URL")]
    url: Option<String>,

    /// API surface to poll: `stats` or `direct`
    #[arg(short = 's', long, env = "IBIDASH_SURFACE")]
    surface: Option<String>,

    /// Refresh interval in seconds (0 disables auto-refresh)
    #[arg(short = 'i', long, env = "IBIDASH_INTERVAL")]
    interval: Option<u64>,

    /// Log file path (defaults to /tmp/ibidash.log)
    #[arg(long, default_value = "/tmp/ibidash.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// TUI owns the terminal. The returned guard flushes logs on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ibidash_tui={log_level},ibidash_core={log_level},ibidash_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("ibidash.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the dashboard configuration.
///
/// Priority: CLI flags > selected profile > `[defaults]` > built-ins.
fn build_config(cli: &Cli) -> Result<DashboardConfig> {
    let cfg = ibidash_config::load_config().wrap_err("failed to load configuration")?;
    let (name, mut profile) = cfg.profile(cli.profile.as_deref())?;

    if let Some(url) = &cli.url {
        profile.base_url = Some(url.clone());
    }
    if let Some(surface) = &cli.surface {
        profile.surface = Some(surface.clone());
    }
    if let Some(secs) = cli.interval {
        profile.refresh_interval_secs = Some(secs);
    }

    let config = ibidash_config::profile_to_dashboard_config(&profile, &cfg.defaults)
        .wrap_err_with(|| format!("invalid settings in profile '{name}'"))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal is touched
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = build_config(&cli)?;
    info!(
        url = %config.base_url,
        surface = %config.surface,
        interval = ?config.refresh_interval,
        "starting ibidash"
    );

    let dashboard = Dashboard::new(config)?;
    let mut app = App::new(dashboard);
    app.run().await?;

    Ok(())
}
