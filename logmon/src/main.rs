use clap::{Parser, Subcommand};
use logmon_core::cli::conf::{ConfigCmd, run_config};
use logmon_core::cli::generate::{GenerateArgs, run_generate};
use logmon_core::cli::run::{RunArgs, run_command};
use logmon_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "logmon",
    version,
    about = "logmon: access log traffic monitor"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow an access log and show the dashboard (default)
    Run(RunArgs),

    /// Append synthetic access log lines
    Generate(GenerateArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

/// `logmon` with no subcommand still honours the environment overrides.
#[derive(Parser, Debug)]
struct DefaultRun {
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Run(args)) => run_command(args).await,

        Some(Command::Generate(args)) => {
            let _guard = init_logging(None);
            run_generate(args).await
        }

        Some(Command::Config { cmd }) => run_config(cmd),

        None => {
            let defaults = DefaultRun::parse_from(std::env::args_os().take(1));
            run_command(defaults.run).await
        }
    }
}
