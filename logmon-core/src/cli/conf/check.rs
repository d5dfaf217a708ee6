use crate::conf::{ConfigError, ConfigOverrides, load_config};
use miette::Report;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    match load_config(Some(&path), &ConfigOverrides::default()) {
        Ok(cfg) => {
            let monitor = &cfg.monitor;
            println!("✔ Config loaded successfully");
            println!("✔ following {}", monitor.log_file_path.display());
            println!(
                "✔ alarm at {} records within {}s",
                monitor.alarm_threshold, monitor.retention_seconds
            );
            println!(
                "✔ tick every {}ms, refresh every {}ms",
                monitor.tick_interval_ms, cfg.dashboard.refresh_ms
            );
            Ok(())
        }
        Err(err) => {
            print_config_error(err, plain);
            std::process::exit(1);
        }
    }
}

pub fn print_config_error(err: ConfigError, plain: bool) {
    let hint = err.hint();
    if plain {
        eprintln!("{}", err);
    } else {
        eprintln!();
        eprintln!("{:?}", Report::new(err));
    }
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{}", hint);
    }
}
