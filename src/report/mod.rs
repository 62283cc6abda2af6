//! Report output: chart image, console tables and the optional JSON summary.

pub mod chart;
pub mod summary;
pub mod table;

pub use chart::render_charts;
pub use summary::write_summary;
pub use table::{format_performance_table, format_quality_table};
