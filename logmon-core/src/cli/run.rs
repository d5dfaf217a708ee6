use crate::cli::conf::print_config_error;
use crate::cli::render::{DashboardHeader, redraw, render_dashboard};
use crate::conf::{ConfigOverrides, LogmonConfig, load_config};
use crate::logging::init_logging;
use crate::monitor::LogMonitor;
use anyhow::{Context, Result};
use clap::Args;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{MissedTickBehavior, interval};

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Path to an HCL config file
    #[arg(long, env = "LOGMON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Access log to follow
    #[arg(long = "log-file", env = "LOG_FILE_PATH")]
    pub log_file: Option<PathBuf>,

    /// Seconds a record stays cached
    #[arg(long, env = "LOG_CACHE_RETENTION_TIME_SECONDS")]
    pub retention_seconds: Option<u64>,

    /// Cached record count that raises the traffic alarm
    #[arg(long, env = "ALARM_LOG_COUNT_THRESHOLD")]
    pub alarm_threshold: Option<usize>,

    /// Expire records by ingestion time instead of their logged time
    #[arg(long, env = "DISREGARD_LOG_TIMESTAMP")]
    pub ignore_timestamp: Option<bool>,

    /// Prune + alarm tick period in milliseconds
    #[arg(long, env = "TICK_INTERVAL_MS")]
    pub tick_interval_ms: Option<u64>,

    /// Process the existing file content too
    #[arg(long)]
    pub from_start: bool,

    /// Dashboard refresh period in milliseconds
    #[arg(long, env = "REFRESH_LOOP_MS")]
    pub refresh_ms: Option<u64>,

    /// Write JSON logs to this directory instead of stderr
    #[arg(long, env = "LOGMON_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            log_file_path: self.log_file.clone(),
            retention_seconds: self.retention_seconds,
            alarm_threshold: self.alarm_threshold,
            ignore_timestamp: self.ignore_timestamp,
            tick_interval_ms: self.tick_interval_ms,
            read_from_start: self.from_start.then_some(true),
            refresh_ms: self.refresh_ms,
            log_dir: self.log_dir.clone(),
        }
    }
}

/// Resolve the config, set up logging and run the dashboard until Ctrl-C.
pub async fn run_command(args: RunArgs) -> Result<()> {
    let cfg = match load_config(args.config.as_deref(), &args.overrides()) {
        Ok(cfg) => cfg,
        Err(err) => {
            print_config_error(err, false);
            std::process::exit(1);
        }
    };

    let _guard = init_logging(cfg.dashboard.log_dir.as_deref());

    run_dashboard(cfg).await
}

pub async fn run_dashboard(cfg: LogmonConfig) -> Result<()> {
    ensure_log_file(&cfg.monitor.log_file_path)?;

    let monitor = Arc::new(LogMonitor::new(cfg.monitor.clone())?);
    let handle = monitor.follow_file().await.with_context(|| {
        format!(
            "failed to follow {}",
            cfg.monitor.log_file_path.display()
        )
    })?;

    let started = Instant::now();
    let dashboard = &cfg.dashboard;
    let mut ticker = interval(dashboard.refresh_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    // Hide cursor while the dashboard runs.
    print!("\x1b[?25l");
    let _ = io::stdout().flush();

    loop {
        tokio::select! {
            res = &mut ctrl_c => {
                if let Err(e) = res {
                    tracing::warn!(error = %e, "failed to listen for ctrl-c");
                }
                break;
            }
            _ = ticker.tick() => {
                let snapshot = monitor.snapshot(
                    dashboard.last_requests,
                    dashboard.top_sections,
                    dashboard.top_users,
                );
                let header = DashboardHeader {
                    log_file: &cfg.monitor.log_file_path,
                    uptime: started.elapsed(),
                    refresh: dashboard.refresh_interval(),
                };
                redraw(&render_dashboard(&snapshot, &header));
                monitor.reset_short_term_stats();
            }
        }
    }

    // Restore cursor
    print!("\x1b[?25h");
    let _ = io::stdout().flush();

    handle.stop().await;

    Ok(())
}

/// The monitored file may not exist yet; follow an empty one rather than fail.
fn ensure_log_file(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    Ok(())
}
