mod error;
mod loader;
mod types;
mod validate;


pub use error::ConfigError;
pub use loader::{ConfigOverrides, load_config, read_config_file};
pub use types::{DashboardConfig, LogmonConfig, MonitorConfig};
pub use validate::{validate_config, validate_monitor};
