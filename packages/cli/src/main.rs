#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the lead cleaner.
//!
//! Runs a cleaning option over a lead CSV, normalizes ad-hoc addresses,
//! or, with no subcommand, walks the user through a run interactively.
//!
//! Uses `indicatif-log-bridge` (via [`lead_cleaner_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod interactive;
mod notes;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use lead_cleaner_cli_utils::{IndicatifProgress, MultiProgress};
use lead_cleaner_leads::{LeadTable, export};
use lead_cleaner_leads_models::{CleanerConfig, CleaningOption, ExportFormat};

#[derive(Parser)]
#[command(
    name = "lead_cleaner",
    about = "Clean lead exports and normalize US street addresses"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a lead CSV with one of the cleaning options
    Clean {
        /// Lead CSV export to read
        #[arg(long)]
        input: PathBuf,
        /// Cleaning option (e.g., `address-ho-nw-income`, `dialer-list`)
        #[arg(long)]
        option: CleaningOption,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Normalize one or more addresses and print one per line
    Normalize {
        /// Raw address strings
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// List the cleaning options and the columns each one needs
    Options,
}

/// Overrides applied on top of the loaded configuration.
#[derive(Args)]
struct OutputArgs {
    /// TOML config file (defaults to the built-in configuration)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory to write output files to
    #[arg(long)]
    output_dir: Option<String>,
    /// Output format: `csv` or `json`
    #[arg(long)]
    format: Option<ExportFormat>,
    /// Maximum rows per file for batched options (0 disables splitting)
    #[arg(long)]
    batch_size: Option<usize>,
}

impl OutputArgs {
    fn resolve(self) -> Result<CleanerConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => CleanerConfig::load(path)?,
            None => CleanerConfig::embedded(),
        };
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = lead_cleaner_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi);
    };

    match command {
        Commands::Clean {
            input,
            option,
            output,
        } => {
            let config = output.resolve()?;
            run_clean(&multi, &input, option, &config)?;
        }
        Commands::Normalize { addresses } => {
            for address in &addresses {
                println!("{}", lead_cleaner_address::normalize(address));
            }
        }
        Commands::Options => {
            println!("{:<26} {:<30} REQUIRED COLUMNS", "OPTION", "LABEL");
            println!("{}", "-".repeat(90));
            for option in CleaningOption::ALL {
                let mut required = option.required_columns().join(", ");
                let any_of = option.any_of_columns();
                if !any_of.is_empty() {
                    required.push_str(&format!(" + one of {}", any_of.join("/")));
                }
                println!("{:<26} {:<30} {required}", option.to_string(), option.label());
                println!("{:<26} {}", "", option.description());
            }
        }
    }

    Ok(())
}

/// Reads `input`, runs `option`, writes the outputs, and prints what was
/// written along with any import notes.
fn run_clean(
    multi: &MultiProgress,
    input: &Path,
    option: CleaningOption,
    config: &CleanerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    log::info!("Reading {}", input.display());
    let table = LeadTable::from_path(input)?;

    let progress = IndicatifProgress::rows_bar(multi, option.label());
    let files = lead_cleaner_leads::clean(&table, option, config, &progress)?;

    let written = export::write_outputs(&files, config)?;

    log::info!(
        "Processed {} rows into {} file(s) in {:.1}s",
        table.len(),
        written.files.len(),
        start.elapsed().as_secs_f64()
    );

    println!();
    for path in &written.files {
        println!("  {}", path.display());
    }
    if let Some(archive) = &written.archive {
        println!("  {} (all files)", archive.display());
    }
    println!();
    println!("{}", notes::processing_note(option, config.batch_size));
    if let Some(import) = notes::import_notes(option) {
        println!();
        println!("{import}");
    }

    Ok(())
}
