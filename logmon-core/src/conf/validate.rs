use crate::conf::error::ConfigError;
use crate::conf::types::{LogmonConfig, MonitorConfig};

/// Validate the monitor settings.
///
/// Fail-fast: the monitor refuses to start on the first problem found.
pub fn validate_monitor(cfg: &MonitorConfig) -> Result<(), ConfigError> {
    if cfg.log_file_path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyLogFilePath);
    }
    if cfg.retention_seconds == 0 {
        return Err(ConfigError::ZeroRetention);
    }
    if cfg.alarm_threshold == 0 {
        return Err(ConfigError::ZeroAlarmThreshold);
    }
    if cfg.tick_interval_ms == 0 {
        return Err(ConfigError::ZeroTickInterval);
    }
    if cfg.tick_interval_ms >= cfg.retention_seconds.saturating_mul(1000) {
        return Err(ConfigError::TickNotShorterThanRetention {
            tick_ms: cfg.tick_interval_ms,
            retention_seconds: cfg.retention_seconds,
        });
    }
    Ok(())
}

pub fn validate_config(cfg: &LogmonConfig) -> Result<(), ConfigError> {
    validate_monitor(&cfg.monitor)?;

    if cfg.dashboard.refresh_ms == 0 {
        return Err(ConfigError::ZeroRefresh);
    }
    Ok(())
}
