//! ZIP bundling of written output files.
//!
//! When a run produces several files they are also bundled into a single
//! archive so they can be downloaded or shared in one piece.

use std::io::Write;
use std::path::Path;

use crate::LeadsError;

/// File name of the bundle written next to the outputs.
pub const ARCHIVE_NAME: &str = "all_files.zip";

/// Writes `entries` (archive path, contents) into a Deflated ZIP at
/// `archive_path`.
///
/// The archive is written to a temp file first and renamed into place,
/// so an interrupted run never leaves a truncated bundle behind.
///
/// # Errors
///
/// Returns [`LeadsError::Io`] if the file cannot be created or renamed,
/// or [`LeadsError::Zip`] if an entry cannot be written.
pub fn pack(entries: &[(String, Vec<u8>)], archive_path: &Path) -> Result<u64, LeadsError> {
    log::info!(
        "Bundling {} files -> {}",
        entries.len(),
        archive_path.display()
    );

    let tmp_path = archive_path.with_extension("zip.tmp");

    let file = std::fs::File::create(&tmp_path).map_err(|e| LeadsError::Io {
        path: tmp_path.display().to_string(),
        source: e,
    })?;

    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, contents) in entries {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(contents).map_err(|e| LeadsError::Io {
            path: tmp_path.display().to_string(),
            source: e,
        })?;
    }
    writer.finish()?;

    // Atomic rename
    std::fs::rename(&tmp_path, archive_path).map_err(|e| LeadsError::Io {
        path: archive_path.display().to_string(),
        source: e,
    })?;

    let size = std::fs::metadata(archive_path).map_or(0, |m| m.len());

    #[allow(clippy::cast_precision_loss)]
    let kb = size as f64 / 1024.0;
    log::info!("  archive size: {kb:.1} KB");

    Ok(size)
}
