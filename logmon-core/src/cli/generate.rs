use crate::record::CLF_TIME_FORMAT;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TEST_USERS: &[&str] = &["jon", "jane", "bob", "mary"];

// Includes paths without a leading '/' on purpose: they exercise the section rule.
pub const TEST_PATHS: &[&str] = &[
    "report/test/api",
    "/users/create",
    "/users/delete",
    "api/user/create",
    "api/user/delete",
];

const TEST_METHODS: &[&str] = &["GET", "GET", "GET", "POST", "DELETE"];
const TEST_STATUSES: &[u16] = &[200, 200, 200, 201, 304, 404, 500];

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Access log to append to
    #[arg(long = "log-file", env = "LOG_FILE_PATH", default_value = "/tmp/access.log")]
    pub log_file: PathBuf,

    /// Lines per batch
    #[arg(long, default_value_t = 10)]
    pub count: usize,

    /// Repeat a batch every N milliseconds until Ctrl-C
    #[arg(long)]
    pub every_ms: Option<u64>,
}

pub fn synthetic_line<R: Rng + ?Sized>(rng: &mut R, at: DateTime<Utc>) -> String {
    let user = TEST_USERS.choose(rng).copied().unwrap_or("-");
    let path = TEST_PATHS.choose(rng).copied().unwrap_or("/");
    let method = TEST_METHODS.choose(rng).copied().unwrap_or("GET");
    let status = TEST_STATUSES.choose(rng).copied().unwrap_or(200);
    let bytes = rng.random_range(0..4096);

    format!(
        "127.0.0.1 - {user} [{}] \"{method} {path} HTTP/1.0\" {status} {bytes}",
        at.format(CLF_TIME_FORMAT)
    )
}

/// Append `count` synthetic lines to `path`, creating it if needed.
pub fn append_synthetic_lines<R: Rng + ?Sized>(
    path: &Path,
    count: usize,
    rng: &mut R,
) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut batch = String::new();
    for _ in 0..count {
        batch.push_str(&synthetic_line(rng, Utc::now()));
        batch.push('\n');
    }

    // One write per batch so a tailing reader never sees interleaved halves.
    file.write_all(batch.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

pub async fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut rng = rand::rng();

    let Some(every_ms) = args.every_ms else {
        append_synthetic_lines(&args.log_file, args.count, &mut rng)?;
        println!("✔ Appended {} lines to {}", args.count, args.log_file.display());
        return Ok(());
    };

    let mut ticker = tokio::time::interval(Duration::from_millis(every_ms.max(1)));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut total = 0usize;

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = ticker.tick() => {
                append_synthetic_lines(&args.log_file, args.count, &mut rng)?;
                total += args.count;
                tracing::debug!(total, path = %args.log_file.display(), "appended synthetic batch");
            }
        }
    }

    println!("✔ Appended {total} lines to {}", args.log_file.display());
    Ok(())
}
