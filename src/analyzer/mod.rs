//! Analyzer module for benchmark log parsing and aggregation.
//!
//! Provides functionality for:
//! - Loading a benchmark log and splitting it into runs
//! - Extracting execution times and final best routes per thread count
//! - Aggregating time, speedup, efficiency and route quality across runs

pub mod aggregate;
pub mod log_loader;
pub mod log_parser;
pub mod types;

pub use aggregate::summarize;
pub use log_loader::load_log;
pub use log_parser::parse_results;
