// stocksync CLI - two-snapshot inventory reconciliation

mod exit_codes;
mod recon;

use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;
use recon::JobArgs;

/// Environment variable holding an env_logger filter spec.
const LOG_ENV: &str = "STOCKSYNC_LOG";

#[derive(Parser)]
#[command(name = "stocksync")]
#[command(about = "Reconcile two inventory snapshots into stock status and common-item artifacts")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the latest and older snapshot folders and write both artifacts
    #[command(after_help = "\
Examples:
  stocksync run
  stocksync run --latest ./in/file1 --older ./in/file2 --output ./out
  stocksync run --config job.toml --json
  INPUT_FOLDER_1=/data/feb INPUT_FOLDER_2=/data/jan stocksync run")]
    Run {
        #[command(flatten)]
        job: JobArgs,

        /// Print a JSON report to stdout instead of the human summary only
        #[arg(long)]
        json: bool,
    },

    /// Resolve the configuration and check that each folder holds one source file
    #[command(after_help = "\
Examples:
  stocksync validate
  stocksync validate --config job.toml --json")]
    Validate {
        #[command(flatten)]
        job: JobArgs,

        /// Print a JSON report to stdout
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved configuration as TOML
    Config {
        #[command(flatten)]
        job: JobArgs,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);
    // An explicit filter spec wins over -v
    if let Ok(spec) = std::env::var(LOG_ENV) {
        builder.parse_filters(&spec);
    }
    builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { job, json } => recon::cmd_run(job, json),
        Commands::Validate { job, json } => recon::cmd_validate(job, json),
        Commands::Config { job } => recon::cmd_config(job),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}
