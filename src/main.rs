use anyhow::Context;
use env_logger::{Builder, Target};
use log::{LevelFilter, info};
use std::path::{Path, PathBuf};

use crate::analyzer::{load_log, parse_results, summarize};
use crate::config::ReportConfig;
use crate::report::{format_performance_table, format_quality_table, render_charts, write_summary};

mod analyzer;
mod config;
mod error;
mod report;

const USAGE: &str = "Użycie: ga-bench-report <plik_wyników>";
const USAGE_EXIT_CODE: i32 = 1;

fn main() -> anyhow::Result<()> {
    // Logging setup; progress and parse errors belong on stdout next to the tables
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("ga_bench_report"), LevelFilter::Info)
        .target(Target::Stdout)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(log_path) = log_path_from_args(&args) else {
        println!("{}", USAGE);
        std::process::exit(USAGE_EXIT_CODE);
    };

    run(&log_path)
}

/// The log path, if the program was given exactly one argument.
fn log_path_from_args(args: &[String]) -> Option<PathBuf> {
    match args {
        [_, log_path] => Some(PathBuf::from(log_path)),
        _ => None,
    }
}

/// Read the log, aggregate every complete run and write the report.
fn run(log_path: &Path) -> anyhow::Result<()> {
    let config = ReportConfig::for_log(log_path).context("Failed to load report configuration")?;

    info!("Reading benchmark log {}", log_path.display());
    let text = load_log(log_path)?;
    let runs = parse_results(&text).with_context(|| format!("Failed to parse {}", log_path.display()))?;
    let summary = summarize(&runs)?;

    render_charts(&summary, &config).context("Failed to write performance charts")?;

    print!("{}", format_performance_table(&summary));
    print!("{}", format_quality_table(&summary));

    if let Some(json_path) = &config.summary_json {
        write_summary(json_path, &summary, log_path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_single_argument_is_the_log_path() {
        assert_eq!(log_path_from_args(&args(&["ga-bench-report", "results.txt"])), Some(PathBuf::from("results.txt")));
    }

    #[test]
    fn test_wrong_argument_count_is_usage_error() {
        assert_eq!(log_path_from_args(&args(&["ga-bench-report"])), None);
        assert_eq!(log_path_from_args(&args(&["ga-bench-report", "a.txt", "b.txt"])), None);
        assert_eq!(log_path_from_args(&[]), None);
        assert_eq!(USAGE_EXIT_CODE, 1);
        assert!(USAGE.contains("<plik_wyników>"));
    }
}
