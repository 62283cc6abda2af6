//! Error type shared by the report pipeline.

use std::path::PathBuf;

/// Failures that stop the report from being produced.
#[derive(Debug)]
pub enum ReportError {
    /// The log file could not be read.
    LogRead { path: PathBuf, source: std::io::Error },
    /// `report.toml` exists but could not be read, parsed or validated.
    Config(String),
    /// A label pattern failed to compile.
    Pattern(regex::Error),
    /// No segment produced a complete run.
    NoValidResults,
    /// A thread count averaged to zero seconds, so speedup is undefined.
    ZeroMeanTime { threads: u32 },
    /// Drawing the charts failed.
    Render(String),
    /// Writing the PNG failed.
    Image(image::ImageError),
    /// Writing the JSON summary failed.
    Summary(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::LogRead { path, source } => write!(f, "Failed to read log file {}: {}", path.display(), source),
            ReportError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            ReportError::Pattern(e) => write!(f, "Failed to compile log pattern: {}", e),
            ReportError::NoValidResults => write!(f, "No valid results were parsed from the file"),
            ReportError::ZeroMeanTime { threads } => {
                write!(f, "Mean execution time for {} threads is zero, speedup is undefined", threads)
            }
            ReportError::Render(msg) => write!(f, "Failed to draw charts: {}", msg),
            ReportError::Image(e) => write!(f, "Failed to write chart image: {}", e),
            ReportError::Summary(msg) => write!(f, "Failed to write summary: {}", msg),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::LogRead { source, .. } => Some(source),
            ReportError::Pattern(e) => Some(e),
            ReportError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<regex::Error> for ReportError {
    fn from(e: regex::Error) -> Self {
        ReportError::Pattern(e)
    }
}

impl From<image::ImageError> for ReportError {
    fn from(e: image::ImageError) -> Self {
        ReportError::Image(e)
    }
}
