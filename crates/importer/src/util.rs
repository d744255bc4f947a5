use crate::error::ImportError;
use csv::Writer;
use database::services::ImportSummary;
use log::{info, warn};
use std::{
    fs::{self, File},
    path::Path,
};

/// Output directory for exported files
pub const DEFAULT_OUTPUT_DIR: &str = "./data/output";

/// Ensures a directory exists, creating it if necessary
pub fn ensure_dir(dir_path: &str) -> Result<(), ImportError> {
    let path = Path::new(dir_path);
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    Ok(())
}

/// Creates a CSV writer for `filename` inside `output_dir`
///
/// # Arguments
/// * `output_dir` - Directory to create the file in
/// * `filename` - Name of the CSV file
///
/// # Returns
/// The writer; headers are emitted by the first serialized record
pub fn create_csv_writer(output_dir: &str, filename: &str) -> Result<Writer<File>, ImportError> {
    ensure_dir(output_dir)?;

    let path = Path::new(output_dir).join(filename);
    Ok(Writer::from_writer(File::create(path)?))
}

/// Logs the outcome of an import, one warning per skipped line
pub fn log_summary(kind: &str, summary: &ImportSummary) {
    for skipped in &summary.skipped {
        warn!("Line {} skipped: {}", skipped.row, skipped.message);
    }

    info!(
        "Imported {kind}: {} inserted, {} updated, {} skipped",
        summary.inserted,
        summary.updated,
        summary.skipped.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_ensure_dir_creates_nested_path() {
        let base = env::temp_dir().join(format!("importer-util-{}", std::process::id()));
        let nested = base.join("a").join("b");
        let nested_str = nested.to_str().unwrap();

        ensure_dir(nested_str).unwrap();
        assert!(nested.is_dir());

        // Existing directories are left alone
        ensure_dir(nested_str).unwrap();

        fs::remove_dir_all(&base).unwrap();
    }
}
