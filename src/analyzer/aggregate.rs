//! Descriptive statistics across accepted runs.

use super::types::{PerformanceSummary, RawRun, THREAD_COUNTS, ThreadStats};
use crate::error::ReportError;

/// Arithmetic mean. Zero for an empty sample.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N). Zero for fewer than two values.
pub fn population_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    (ss / values.len() as f64).sqrt()
}

/// Aggregate time, speedup, efficiency and route quality per thread count.
///
/// Speedup is relative to the sequential mean time; efficiency is speedup per thread.
pub fn summarize(runs: &[RawRun]) -> Result<PerformanceSummary, ReportError> {
    if runs.is_empty() {
        return Err(ReportError::NoValidResults);
    }

    let mut rows = Vec::with_capacity(THREAD_COUNTS.len());
    let mut baseline = None;

    for (index, &threads) in THREAD_COUNTS.iter().enumerate() {
        let times: Vec<f64> = runs.iter().map(|run| run.time_at(index)).collect();
        let mean_time = mean(&times);
        if mean_time <= 0.0 {
            return Err(ReportError::ZeroMeanTime { threads });
        }
        let baseline_time = *baseline.get_or_insert(mean_time);
        let speedup = baseline_time / mean_time;

        // Shortest island route in each run's final generation
        let best_routes: Vec<f64> = runs
            .iter()
            .map(|run| run.routes_at(index).iter().copied().fold(f64::INFINITY, f64::min))
            .collect();

        rows.push(ThreadStats {
            threads,
            mean_time,
            std_time: population_std(&times),
            speedup,
            efficiency: speedup / threads as f64,
            mean_best_route: mean(&best_routes),
            best_route: best_routes.iter().copied().fold(f64::INFINITY, f64::min),
        });
    }

    log::debug!("Aggregated {} runs over {} thread counts", runs.len(), rows.len());

    Ok(PerformanceSummary {
        run_count: runs.len(),
        rows,
    })
}
