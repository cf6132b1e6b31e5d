// invrecon - reconcile two IP-keyed inventory spreadsheets

mod exit_codes;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use inventory_cli::report::{render_text, summary_line};
use inventory_recon::config::ColumnOverrides;
use inventory_recon::{ReconConfig, ReconError, ReconReport};

use exit_codes::{
    recon_exit_code, EXIT_FINDINGS, EXIT_INVALID_CONFIG, EXIT_OUTPUT, EXIT_SUCCESS,
};

#[derive(Parser)]
#[command(name = "invrecon")]
#[command(about = "Cross-check two IP-keyed inventory spreadsheets")]
#[command(version)]
struct Cli {
    /// Diagnostics filter for stderr (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "INVRECON_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  invrecon run printers.recon.toml
  invrecon run printers.recon.toml --json
  invrecon run printers.recon.toml --output result.json --fail-on-findings")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Reconcile two CSV files directly, without a config file
    #[command(after_help = "\
Examples:
  invrecon compare master.csv site.csv
  invrecon compare master.csv site.csv --left-label 'CBS Master' --right-label 'Poco Sheet'
  invrecon compare a.csv b.csv --serial-column 'Serial #' --delimiter ';'")]
    Compare {
        /// First (A) inventory file
        left: PathBuf,

        /// Second (B) inventory file
        right: PathBuf,

        /// Display name for the first file
        #[arg(long)]
        left_label: Option<String>,

        /// Display name for the second file
        #[arg(long)]
        right_label: Option<String>,

        /// Header of the IP address column
        #[arg(long)]
        key_column: Option<String>,

        /// Header of the ID tag column
        #[arg(long)]
        tag_column: Option<String>,

        /// Header of the serial number column
        #[arg(long)]
        serial_column: Option<String>,

        /// Field delimiter for both files (use '\t' for tab)
        #[arg(long)]
        delimiter: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  invrecon validate printers.recon.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Print the report as JSON instead of text sections
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Exit 1 when duplicates, conflicts, or one-sided keys are found
    #[arg(long)]
    fail_on_findings: bool,

    /// Suppress the summary line on stderr
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Run { config, output } => cmd_run(config, output),
        Commands::Compare {
            left,
            right,
            left_label,
            right_label,
            key_column,
            tag_column,
            serial_column,
            delimiter,
            output,
        } => {
            let columns = ColumnOverrides {
                key: key_column,
                tag: tag_column,
                serial: serial_column,
            };
            cmd_compare(left, right, left_label, right_label, columns, delimiter, output)
        }
        Commands::Validate { config } => cmd_validate(config),
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

/// Diagnostics go to stderr; stdout carries only the report.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        let code = recon_exit_code(&err);
        let hint = match &err {
            ReconError::MissingColumn { .. } => {
                Some("check the header row, or map the column under [columns] / --*-column".to_string())
            }
            ReconError::ConfigParse(_) => Some("see `invrecon run --help` for the config layout".to_string()),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}

// ============================================================================
// run / compare / validate
// ============================================================================

fn read_config(config_path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::new(
            EXIT_INVALID_CONFIG,
            format!("cannot read config {}: {e}", config_path.display()),
        )
    })?;
    Ok(ReconConfig::from_toml(&config_str)?)
}

fn cmd_run(config_path: PathBuf, output: OutputArgs) -> Result<(), CliError> {
    let config = read_config(&config_path)?;

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new(""));

    let report = inventory_recon::run(&config, base_dir)?;
    emit(&report, &output)
}

fn cmd_compare(
    left: PathBuf,
    right: PathBuf,
    left_label: Option<String>,
    right_label: Option<String>,
    columns: ColumnOverrides,
    delimiter: Option<String>,
    output: OutputArgs,
) -> Result<(), CliError> {
    let mut config = ReconConfig::for_files(left, right);
    config.left.label = left_label;
    config.right.label = right_label;
    config.left.delimiter = delimiter.clone();
    config.right.delimiter = delimiter;
    config.left.columns = columns.clone();
    config.right.columns = columns;
    config.validate()?;

    let report = inventory_recon::run(&config, Path::new(""))?;
    emit(&report, &output)
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    println!(
        "ok: {} ({} vs {})",
        config.name,
        config.label(inventory_recon::Side::Left),
        config.label(inventory_recon::Side::Right)
    );
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn emit(report: &ReconReport, output: &OutputArgs) -> Result<(), CliError> {
    if output.json || output.output.is_some() {
        let json_str = serde_json::to_string_pretty(report)
            .map_err(|e| CliError::new(EXIT_OUTPUT, format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = output.output {
            std::fs::write(path, &json_str).map_err(|e| {
                CliError::new(EXIT_OUTPUT, format!("cannot write {}: {e}", path.display()))
            })?;
            if !output.quiet {
                eprintln!("wrote {}", path.display());
            }
        }

        if output.json {
            println!("{json_str}");
        }
    }

    if !output.json {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        render_text(report, &mut handle)
            .and_then(|()| handle.flush())
            .map_err(|e| CliError::new(EXIT_OUTPUT, format!("cannot write report: {e}")))?;
    }

    if !output.quiet {
        eprintln!("{}", summary_line(report));
    }

    if output.fail_on_findings && report.summary.has_findings() {
        return Err(CliError::new(EXIT_FINDINGS, "findings present")
            .with_hint("rerun without --fail-on-findings to always exit 0"));
    }

    Ok(())
}
