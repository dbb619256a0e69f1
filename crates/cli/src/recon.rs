//! `stocksync run|validate|config`: snapshot folder reconciliation.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use stocksync_config::JobConfig;
use stocksync_io::{ensure_dirs, find_single_source, label_from_path, load_snapshot, write_table};
use stocksync_recon::{reconcile, ReconSummary, Snapshot};

use crate::exit_codes::{config_exit_code, io_exit_code, recon_exit_code, EXIT_ERROR, EXIT_USAGE};
use crate::CliError;

/// Sheet name used for xlsx artifacts.
const SHEET_NAME: &str = "Sheet1";

/// Options shared by every subcommand that resolves a job.
#[derive(Args, Debug, Default)]
pub struct JobArgs {
    /// Config file (default: ~/.config/stocksync/config.toml when present)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Folder holding the latest snapshot
    #[arg(long, value_name = "DIR")]
    pub latest: Option<PathBuf>,

    /// Folder holding the older snapshot
    #[arg(long, value_name = "DIR")]
    pub older: Option<PathBuf>,

    /// Folder receiving the output artifacts
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Key field identifying an item
    #[arg(long, short = 'k', value_name = "FIELD")]
    pub key: Option<String>,
}

impl JobArgs {
    /// Defaults, then config file, then environment, then flags.
    pub fn resolve(&self) -> Result<JobConfig, CliError> {
        self.resolve_with_env(|name| std::env::var(name).ok())
    }

    fn resolve_with_env(&self, env: impl Fn(&str) -> Option<String>) -> Result<JobConfig, CliError> {
        let mut config = JobConfig::load(self.config.as_deref()).map_err(config_err)?;
        config.apply_env(env);

        if let Some(dir) = &self.latest {
            config.latest_dir = dir.clone();
        }
        if let Some(dir) = &self.older {
            config.older_dir = dir.clone();
        }
        if let Some(dir) = &self.output {
            config.output_dir = dir.clone();
        }
        if let Some(key) = &self.key {
            config.key_field = key.clone();
        }

        config.validate().map_err(config_err)?;
        Ok(config)
    }
}

fn config_err(err: stocksync_config::ConfigError) -> CliError {
    CliError {
        code: config_exit_code(&err),
        message: err.to_string(),
        hint: Some(format!(
            "check {} or the {} / {} / {} environment variables",
            JobConfig::config_path().display(),
            stocksync_config::job::ENV_LATEST_DIR,
            stocksync_config::job::ENV_OLDER_DIR,
            stocksync_config::job::ENV_OUTPUT_DIR,
        )),
    }
}

fn io_err(err: stocksync_io::IoError) -> CliError {
    let code = io_exit_code(&err);
    let hint = match &err {
        stocksync_io::IoError::Discovery { .. } | stocksync_io::IoError::FolderMissing(_) => {
            Some("place exactly one source file in each snapshot folder".to_string())
        }
        _ => None,
    };
    CliError { code, message: err.to_string(), hint }
}

fn recon_err(err: stocksync_recon::ReconError, key_field: &str) -> CliError {
    CliError {
        code: recon_exit_code(&err),
        message: err.to_string(),
        hint: Some(format!("every record needs a unique, non-blank '{key_field}'")),
    }
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SnapshotReport {
    pub label: String,
    pub file: PathBuf,
    pub rows: usize,
}

impl SnapshotReport {
    fn new(snapshot: &Snapshot, file: &Path) -> Self {
        Self {
            label: snapshot.label.clone(),
            file: file.to_path_buf(),
            rows: snapshot.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub status: &'static str,
    pub message: String,
    pub output_files: Vec<PathBuf>,
    pub data_file: PathBuf,
    pub common_file: PathBuf,
    pub key_field: String,
    pub latest: SnapshotReport,
    pub older: SnapshotReport,
    pub summary: ReconSummary,
    pub run_at: String,
}

#[derive(Debug, Serialize)]
struct SourceReport {
    label: String,
    file: PathBuf,
}

#[derive(Debug, Serialize)]
struct ValidateReport {
    status: &'static str,
    message: String,
    latest: SourceReport,
    older: SourceReport,
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct ErrorReport<'a> {
    status: &'static str,
    message: &'a str,
}

/// With `--json`, failures still produce exactly one JSON value on stdout.
fn report_failure(result: Result<(), CliError>, json: bool) -> Result<(), CliError> {
    if let (Err(err), true) = (&result, json) {
        let report = ErrorReport { status: "error", message: &err.message };
        if let Ok(s) = serde_json::to_string_pretty(&report) {
            println!("{s}");
        }
    }
    result
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let s = serde_json::to_string_pretty(value).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("JSON serialization error: {e}"),
        hint: None,
    })?;
    println!("{s}");
    Ok(())
}

// ============================================================================
// run
// ============================================================================

pub fn cmd_run(args: JobArgs, json: bool) -> Result<(), CliError> {
    report_failure(run_job(&args, json), json)
}

fn run_job(args: &JobArgs, json: bool) -> Result<(), CliError> {
    let config = args.resolve()?;

    if config.create_dirs {
        ensure_dirs([
            config.latest_dir.as_path(),
            config.older_dir.as_path(),
            config.output_dir.as_path(),
        ])
        .map_err(io_err)?;
    }

    let latest_path = find_single_source(&config.latest_dir, &config.extensions).map_err(io_err)?;
    let older_path = find_single_source(&config.older_dir, &config.extensions).map_err(io_err)?;
    log::info!("latest: {}", latest_path.display());
    log::info!("older: {}", older_path.display());

    let latest = load_snapshot(&latest_path, &label_from_path(&latest_path)).map_err(io_err)?;
    let older = load_snapshot(&older_path, &label_from_path(&older_path)).map_err(io_err)?;

    let result = reconcile(&latest, &older, &config.recon_options())
        .map_err(|e| recon_err(e, &config.key_field))?;

    let data_file = config.data_path();
    let common_file = config.common_path();
    write_table(&data_file, &result.reconciled.to_table(&config.layout()), SHEET_NAME)
        .map_err(io_err)?;
    write_table(&common_file, &result.common.to_table(), SHEET_NAME).map_err(io_err)?;
    log::info!("wrote {} and {}", data_file.display(), common_file.display());

    let s = &result.summary;
    eprintln!(
        "{} vs {}: {} in stock, {} sold, {} new arrivals ({} common)",
        result.latest_label, result.older_label, s.in_stock, s.sold, s.new_arrivals, s.common,
    );
    eprintln!("wrote {}", data_file.display());
    eprintln!("wrote {}", common_file.display());

    if json {
        let report = RunReport {
            status: "success",
            message: "Files processed successfully".to_string(),
            output_files: vec![data_file.clone(), common_file.clone()],
            data_file,
            common_file,
            key_field: result.key_field.clone(),
            latest: SnapshotReport::new(&latest, &latest_path),
            older: SnapshotReport::new(&older, &older_path),
            summary: result.summary.clone(),
            run_at: chrono::Utc::now().to_rfc3339(),
        };
        print_json(&report)?;
    }

    Ok(())
}

// ============================================================================
// validate
// ============================================================================

pub fn cmd_validate(args: JobArgs, json: bool) -> Result<(), CliError> {
    report_failure(validate_job(&args, json), json)
}

fn validate_job(args: &JobArgs, json: bool) -> Result<(), CliError> {
    let config = args.resolve()?;

    let latest = find_single_source(&config.latest_dir, &config.extensions).map_err(io_err)?;
    let older = find_single_source(&config.older_dir, &config.extensions).map_err(io_err)?;

    if json {
        return print_json(&ValidateReport {
            status: "ok",
            message: "sources found".to_string(),
            latest: SourceReport { label: label_from_path(&latest), file: latest },
            older: SourceReport { label: label_from_path(&older), file: older },
            output_dir: config.output_dir,
        });
    }

    eprintln!("valid: latest {} ({})", latest.display(), label_from_path(&latest));
    eprintln!("       older  {} ({})", older.display(), label_from_path(&older));
    eprintln!("       output {}", config.output_dir.display());
    Ok(())
}

// ============================================================================
// config
// ============================================================================

pub fn cmd_config(args: JobArgs) -> Result<(), CliError> {
    let config = args.resolve()?;
    let text = config.to_toml().map_err(|e| CliError {
        code: EXIT_USAGE,
        message: e.to_string(),
        hint: None,
    })?;
    print!("{text}");
    Ok(())
}
