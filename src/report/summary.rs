//! Machine-readable JSON copy of the aggregates.

use serde::Serialize;
use std::path::Path;

use crate::analyzer::types::PerformanceSummary;
use crate::error::ReportError;

#[derive(Serialize)]
struct SummaryDocument<'a> {
    generated_at: String,
    source_log: String,
    #[serde(flatten)]
    summary: &'a PerformanceSummary,
}

/// Write the summary as pretty-printed JSON.
///
/// # Parameters
///
/// * `path` - Destination file, overwritten if present
/// * `summary` - Aggregated results
/// * `source_log` - Log the summary was computed from, recorded in the document
pub fn write_summary(path: &Path, summary: &PerformanceSummary, source_log: &Path) -> Result<(), ReportError> {
    let document = SummaryDocument {
        generated_at: chrono::Utc::now().to_rfc3339(),
        source_log: source_log.display().to_string(),
        summary,
    };

    let json = serde_json::to_string_pretty(&document).map_err(|e| ReportError::Summary(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| ReportError::Summary(format!("{}: {}", path.display(), e)))?;

    log::info!("Saved summary to {}", path.display());
    Ok(())
}
