use crate::conf::error::ConfigError;
use crate::conf::types::LogmonConfig;
use crate::conf::validate::validate_config;
use std::fs;
use std::path::{Path, PathBuf};

/// Values given on the command line or through the environment.
///
/// They win over the config file, which wins over the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub log_file_path: Option<PathBuf>,
    pub retention_seconds: Option<u64>,
    pub alarm_threshold: Option<usize>,
    pub ignore_timestamp: Option<bool>,
    pub tick_interval_ms: Option<u64>,
    pub read_from_start: Option<bool>,
    pub refresh_ms: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn apply(&self, cfg: &mut LogmonConfig) {
        let monitor = &mut cfg.monitor;
        if let Some(path) = &self.log_file_path {
            monitor.log_file_path = path.clone();
        }
        if let Some(v) = self.retention_seconds {
            monitor.retention_seconds = v;
        }
        if let Some(v) = self.alarm_threshold {
            monitor.alarm_threshold = v;
        }
        if let Some(v) = self.ignore_timestamp {
            monitor.ignore_timestamp = v;
        }
        if let Some(v) = self.tick_interval_ms {
            monitor.tick_interval_ms = v;
        }
        if let Some(v) = self.read_from_start {
            monitor.read_from_start = v;
        }

        if let Some(v) = self.refresh_ms {
            cfg.dashboard.refresh_ms = v;
        }
        if let Some(dir) = &self.log_dir {
            cfg.dashboard.log_dir = Some(dir.clone());
        }
    }
}

/// Parse a config file without validating it.
pub fn read_config_file(path: &Path) -> Result<LogmonConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    hcl::from_str(&raw).map_err(|e| ConfigError::parse(path, e))
}

/// Resolve defaults, the optional file and the overrides into a validated config.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<LogmonConfig, ConfigError> {
    let mut cfg = match path {
        Some(path) => read_config_file(path)?,
        None => LogmonConfig::default(),
    };

    overrides.apply(&mut cfg);
    validate_config(&cfg)?;

    Ok(cfg)
}
