//! Encoding output tables and writing them to disk.

use std::path::{Path, PathBuf};

use lead_cleaner_leads_models::{CleanerConfig, ExportFormat};
use serde_json::{Map, Value};

use crate::LeadsError;
use crate::archive::{self, ARCHIVE_NAME};
use crate::outputs::OutputFile;
use crate::table::LeadTable;

/// Paths produced by [`write_outputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenOutputs {
    /// One path per output file, in input order.
    pub files: Vec<PathBuf>,
    /// The ZIP bundle, if one was written.
    pub archive: Option<PathBuf>,
}

/// Encodes `table` as CSV with a header row.
///
/// # Errors
///
/// Returns [`LeadsError::Csv`] if a record cannot be written.
pub fn to_csv_bytes(table: &LeadTable) -> Result<Vec<u8>, LeadsError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| LeadsError::Csv(csv::Error::from(e.into_error())))
}

/// Encodes `table` as a pretty-printed JSON array of objects.
///
/// Keys follow column order; empty cells become `null`.
///
/// # Errors
///
/// Returns [`LeadsError::Json`] if serialization fails.
pub fn to_json_bytes(table: &LeadTable) -> Result<Vec<u8>, LeadsError> {
    let records: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| {
            let object: Map<String, Value> = table
                .headers()
                .iter()
                .zip(row)
                .map(|(header, cell)| {
                    let value = if cell.trim().is_empty() {
                        Value::Null
                    } else {
                        Value::String(cell.clone())
                    };
                    (header.clone(), value)
                })
                .collect();
            Value::Object(object)
        })
        .collect();

    Ok(serde_json::to_vec_pretty(&records)?)
}

/// Encodes `table` in `format`.
///
/// # Errors
///
/// Propagates the encoder's error.
pub fn encode(table: &LeadTable, format: ExportFormat) -> Result<Vec<u8>, LeadsError> {
    match format {
        ExportFormat::Csv => to_csv_bytes(table),
        ExportFormat::Json => to_json_bytes(table),
    }
}

/// Writes every file to `config.output_dir` in `config.format`.
///
/// The directory is created if needed. When there is more than one file
/// and `config.zip_when_multiple` is set, the files are also bundled into
/// [`ARCHIVE_NAME`].
///
/// # Errors
///
/// Returns an error if encoding fails or a file cannot be written.
pub fn write_outputs(
    files: &[OutputFile],
    config: &CleanerConfig,
) -> Result<WrittenOutputs, LeadsError> {
    let dir = Path::new(&config.output_dir);
    std::fs::create_dir_all(dir).map_err(|e| LeadsError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut entries = Vec::with_capacity(files.len());
    let mut written = WrittenOutputs::default();

    for file in files {
        let file_name = format!("{}.{}", file.name, config.format.extension());
        let path = dir.join(&file_name);
        let bytes = encode(&file.table, config.format)?;

        std::fs::write(&path, &bytes).map_err(|e| LeadsError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        log::info!("Wrote {} ({} rows)", path.display(), file.table.len());

        written.files.push(path);
        entries.push((file_name, bytes));
    }

    if config.zip_when_multiple && entries.len() > 1 {
        let archive_path = dir.join(ARCHIVE_NAME);
        archive::pack(&entries, &archive_path)?;
        written.archive = Some(archive_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use lead_cleaner_leads_models::CleaningOption;

    use super::*;

    fn table(csv: &str) -> LeadTable {
        LeadTable::from_csv_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn csv_quotes_embedded_commas() {
        let bytes = to_csv_bytes(&table("ADDRESS,DATA\n\"1 Main St, Apt 2\",x\n")).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "ADDRESS,DATA\n\"1 Main St, Apt 2\",x\n"
        );
    }

    #[test]
    fn json_keeps_column_order_and_nulls_empty_cells() {
        let bytes = to_json_bytes(&table("Z,A\n1,\n")).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let object = value[0].as_object().unwrap();
        assert_eq!(object.keys().collect::<Vec<_>>(), ["Z", "A"]);
        assert_eq!(object["Z"], "1");
        assert!(object["A"].is_null());
    }

    #[test]
    fn writes_files_and_bundles_multiple() {
        let tmp = std::env::temp_dir().join("lead_cleaner_export_multi_test");
        let _ = std::fs::remove_dir_all(&tmp);

        let config = CleanerConfig {
            output_dir: tmp.display().to_string(),
            ..CleanerConfig::default()
        };
        let files = vec![
            OutputFile::new("output_a", table("A\n1\n")),
            OutputFile::new("output_b", table("B\n2\n")),
        ];
        let written = write_outputs(&files, &config).unwrap();

        assert_eq!(written.files, [tmp.join("output_a.csv"), tmp.join("output_b.csv")]);
        assert_eq!(written.archive, Some(tmp.join("all_files.zip")));
        assert_eq!(std::fs::read_to_string(tmp.join("output_b.csv")).unwrap(), "B\n2\n");
        assert!(tmp.join("all_files.zip").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn single_file_is_not_bundled() {
        let tmp = std::env::temp_dir().join("lead_cleaner_export_single_test");
        let _ = std::fs::remove_dir_all(&tmp);

        let config = CleanerConfig {
            output_dir: tmp.display().to_string(),
            format: ExportFormat::Json,
            ..CleanerConfig::default()
        };
        let written = write_outputs(&[OutputFile::new("output_a", table("A\n1\n"))], &config).unwrap();

        assert_eq!(written.files, [tmp.join("output_a.json")]);
        assert_eq!(written.archive, None);
        assert!(!tmp.join("all_files.zip").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn colliding_group_keys_write_and_bundle() {
        let tmp = std::env::temp_dir().join("lead_cleaner_export_collide_test");
        let _ = std::fs::remove_dir_all(&tmp);

        let config = CleanerConfig {
            output_dir: tmp.display().to_string(),
            ..CleanerConfig::default()
        };
        let files = crate::outputs::split_outputs(
            table("PERSONAL_STATE,FIRST_NAME\nN/A,Ann\nNA,Bob\n"),
            CleaningOption::SplitByState,
            0,
        );
        let written = write_outputs(&files, &config).unwrap();

        assert_eq!(
            written.files,
            [
                tmp.join("output_split_by_state_NA.csv"),
                tmp.join("output_split_by_state_NA_2.csv"),
            ]
        );
        assert!(
            std::fs::read_to_string(tmp.join("output_split_by_state_NA.csv"))
                .unwrap()
                .contains("Ann")
        );
        assert!(
            std::fs::read_to_string(tmp.join("output_split_by_state_NA_2.csv"))
                .unwrap()
                .contains("Bob")
        );
        assert_eq!(written.archive, Some(tmp.join("all_files.zip")));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn bundling_can_be_disabled() {
        let tmp = std::env::temp_dir().join("lead_cleaner_export_nozip_test");
        let _ = std::fs::remove_dir_all(&tmp);

        let config = CleanerConfig {
            output_dir: tmp.display().to_string(),
            zip_when_multiple: false,
            ..CleanerConfig::default()
        };
        let files = vec![
            OutputFile::new("output_a", table("A\n1\n")),
            OutputFile::new("output_b", table("B\n2\n")),
        ];
        let written = write_outputs(&files, &config).unwrap();
        assert_eq!(written.files.len(), 2);
        assert_eq!(written.archive, None);

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
