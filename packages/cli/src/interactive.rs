//! Interactive run: prompts for the input file, cleaning option, and
//! output settings, then runs the same pipeline as `lead_cleaner clean`.

use std::path::Path;

use dialoguer::{Confirm, Input, Select};
use lead_cleaner_cli_utils::MultiProgress;
use lead_cleaner_leads_models::{CleanerConfig, CleaningOption, ExportFormat};

const FORMATS: &[ExportFormat] = &[ExportFormat::Csv, ExportFormat::Json];

/// Runs the interactive flow.
///
/// # Errors
///
/// Returns an error if a prompt fails or the run itself fails.
pub fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("Lead Cleaner");
    println!();

    let input: String = Input::new()
        .with_prompt("Lead CSV to clean")
        .interact_text()?;
    let input = input.trim().to_string();
    if !Path::new(&input).is_file() {
        println!("No such file: {input}");
        return Ok(());
    }

    let labels: Vec<&str> = CleaningOption::ALL.iter().map(|o| o.label()).collect();
    let idx = Select::new()
        .with_prompt("Cleaning option")
        .items(&labels)
        .default(0)
        .interact()?;
    let option = CleaningOption::ALL[idx];
    println!("{}", option.description());

    let mut config = CleanerConfig::embedded();

    let format_labels: Vec<String> = FORMATS.iter().map(ToString::to_string).collect();
    let format_idx = Select::new()
        .with_prompt("Output format")
        .items(&format_labels)
        .default(0)
        .interact()?;
    config.format = FORMATS[format_idx];

    if option.is_batched() {
        let batch_size_str: String = Input::new()
            .with_prompt("Maximum rows per file")
            .default(config.batch_size.to_string())
            .interact_text()?;
        config.batch_size = batch_size_str.parse().unwrap_or(config.batch_size);
    }

    config.output_dir = Input::new()
        .with_prompt("Output directory")
        .default(config.output_dir.clone())
        .interact_text()?;

    let confirmed = Confirm::new()
        .with_prompt(format!("Process {input} with '{}'?", option.label()))
        .default(true)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    crate::run_clean(multi, Path::new(&input), option, &config)
}
