//! Pre-flight checks for data asset paths.
//!
//! Catches the common mistakes (typo in the path, pointing at a directory, an empty
//! export) before reading, so the user gets a precise message instead of a JSON error.

use crate::error::{DdError, Result};
use std::path::Path;

/// Upper bound for a DD table. Real tables are a few hundred kilobytes.
const MAX_REASONABLE_SIZE: u64 = 64 * 1024 * 1024;

/// Validate that a path points at a readable, plausibly sized data asset.
///
/// # Error Cases
/// - Path does not exist
/// - Path points to a directory
/// - File is empty
/// - File is larger than 64MB
pub fn validate_data_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DdError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| DdError::file_error("Failed to read file metadata", e))?;

    if !metadata.is_file() {
        return Err(DdError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let file_size = metadata.len();
    if file_size == 0 {
        return Err(DdError::data(format!("File is empty: {}", path.display())));
    }

    if file_size > MAX_REASONABLE_SIZE {
        return Err(DdError::data(format!(
            "File is suspiciously large for a DD table ({}MB): {}",
            file_size / (1024 * 1024),
            path.display()
        )));
    }

    Ok(())
}
