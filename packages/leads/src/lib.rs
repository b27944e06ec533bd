#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lead export cleaning pipeline.
//!
//! Reads a lead CSV into a [`LeadTable`], validates the columns a
//! [`CleaningOption`] needs, normalizes addresses, projects the option's
//! output shape, and splits the result into named [`OutputFile`]s that
//! [`export::write_outputs`] writes to disk.

pub mod archive;
pub mod duplicates;
pub mod export;
pub mod fields;
pub mod outputs;
pub mod progress;
pub mod projection;
pub mod table;

use std::sync::Arc;

use lead_cleaner_address::CachedNormalizer;
use lead_cleaner_leads_models::{CleanerConfig, CleaningOption};

pub use outputs::OutputFile;
pub use progress::{NullProgress, ProgressCallback, null_progress};
pub use table::{LeadTable, Row};

/// Errors from the cleaning pipeline.
#[derive(Debug, thiserror::Error)]
pub enum LeadsError {
    /// Malformed CSV input or a failed CSV write.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File system error on `path`.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the ZIP archive failed.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The input lacks columns the option requires.
    #[error("{option} requires missing columns: {}", columns.join(", "))]
    MissingColumns {
        /// The selected option.
        option: CleaningOption,
        /// Required columns not found in the input.
        columns: Vec<String>,
    },

    /// The input has none of a set of alternative columns.
    #[error("{option} requires at least one of: {}", columns.join(", "))]
    MissingAnyColumn {
        /// The selected option.
        option: CleaningOption,
        /// The alternatives, none of which were found.
        columns: Vec<String>,
    },
}

/// Checks that `table` has every column `option` needs.
///
/// # Errors
///
/// Returns [`LeadsError::MissingColumns`] listing every absent required
/// column, or [`LeadsError::MissingAnyColumn`] if none of the option's
/// alternative columns is present.
pub fn validate_columns(table: &LeadTable, option: CleaningOption) -> Result<(), LeadsError> {
    let missing: Vec<String> = option
        .required_columns()
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| (*c).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LeadsError::MissingColumns {
            option,
            columns: missing,
        });
    }

    let any_of = option.any_of_columns();
    if !any_of.is_empty() && !any_of.iter().any(|c| table.has_column(c)) {
        return Err(LeadsError::MissingAnyColumn {
            option,
            columns: any_of.iter().map(|c| (*c).to_string()).collect(),
        });
    }

    Ok(())
}

/// Runs `option` over `table` and returns the files to write.
///
/// Columns are validated before any row is touched. Address progress is
/// reported through `progress`.
///
/// # Errors
///
/// Returns an error if the table is missing columns `option` needs.
pub fn clean(
    table: &LeadTable,
    option: CleaningOption,
    config: &CleanerConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<OutputFile>, LeadsError> {
    validate_columns(table, option)?;

    log::info!("Running '{}' over {} rows", option.label(), table.len());

    let projected = if option.cleans_addresses() {
        let normalizer: CachedNormalizer = CachedNormalizer::default();
        let cleaned = projection::clean_addresses(table, &normalizer, progress);
        let dropped = table.len() - cleaned.len();
        if dropped > 0 {
            log::warn!("Dropped {dropped} rows with no PERSONAL_ADDRESS");
        }
        projection::project(&cleaned, option, config)
    } else {
        projection::project(table, option, config)
    };

    let files = outputs::split_outputs(projected, option, config.batch_size);
    progress.finish(format!("{} file(s) from {} rows", files.len(), table.len()));

    Ok(files)
}
