//! Loading of benchmark log files.
//!
//! The whole file is read into memory in one go; logs are a few megabytes at most.

use std::fs;
use std::path::Path;

use crate::error::ReportError;

/// Read the complete log file as UTF-8 text.
///
/// # Parameters
///
/// * `path` - Path to the benchmark log
///
/// # Returns
///
/// The file contents, or `ReportError::LogRead` if the file is missing, unreadable or not valid UTF-8.
pub fn load_log(path: &Path) -> Result<String, ReportError> {
    let text = fs::read_to_string(path).map_err(|source| ReportError::LogRead {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Loaded {} bytes from {}", text.len(), path.display());
    Ok(text)
}
