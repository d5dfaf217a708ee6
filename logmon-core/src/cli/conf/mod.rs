mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate a config file and exit
    Check {
        /// Path to the config file
        #[arg(default_value = "logmon.hcl")]
        path: PathBuf,

        /// Print errors without diagnostic decoration
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },

    /// Print the resolved configuration
    Dump {
        #[arg(default_value = "logmon.hcl")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Write a commented starter config file
    Init {
        /// Path of the file to create
        #[arg(default_value = "logmon.hcl")]
        path: PathBuf,
    },
}

pub fn run_config(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path, plain } => check(path, plain),
        ConfigCmd::Dump { path, json, yaml } => dump(path, json, yaml),
        ConfigCmd::Init { path } => init(path),
    }
}
