//! Type definitions specific to the analyzer module.

use serde::Serialize;
use std::collections::BTreeMap;

/// Thread counts under study, sequential baseline first.
///
/// Chart axes, table rows and summary rows all follow this order.
pub const THREAD_COUNTS: [u32; 5] = [1, 2, 4, 12, 24];

/// Thread count that labels the sequential run.
pub const SEQUENTIAL_THREADS: u32 = 1;

/// Fields pulled out of one run segment, possibly incomplete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedRun {
    /// Elapsed seconds per thread count.
    pub times: BTreeMap<u32, f64>,
    /// Best-route distances of the last generation block per thread count.
    pub routes: BTreeMap<u32, Vec<f64>>,
}

impl ExtractedRun {
    /// Turn the extraction into a complete run.
    ///
    /// Returns `None` unless both maps hold exactly the configured thread counts.
    pub fn into_complete(mut self) -> Option<RawRun> {
        if self.times.len() != THREAD_COUNTS.len() || self.routes.len() != THREAD_COUNTS.len() {
            return None;
        }

        let mut times = [0.0; THREAD_COUNTS.len()];
        let mut routes: [Vec<f64>; THREAD_COUNTS.len()] = Default::default();
        for (i, threads) in THREAD_COUNTS.iter().enumerate() {
            times[i] = self.times.remove(threads)?;
            routes[i] = self.routes.remove(threads)?;
        }

        Some(RawRun { times, routes })
    }
}

/// One accepted benchmark run.
///
/// Values are stored in `THREAD_COUNTS` order, so a run is always complete.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRun {
    times: [f64; THREAD_COUNTS.len()],
    routes: [Vec<f64>; THREAD_COUNTS.len()],
}

impl RawRun {
    /// Elapsed seconds for the thread count at `index` in `THREAD_COUNTS`.
    pub fn time_at(&self, index: usize) -> f64 {
        self.times[index]
    }

    /// Final-generation best routes for the thread count at `index` in `THREAD_COUNTS`.
    pub fn routes_at(&self, index: usize) -> &[f64] {
        &self.routes[index]
    }

    /// `(thread count, seconds)` pairs in configured order.
    pub fn times(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        THREAD_COUNTS.iter().copied().zip(self.times.iter().copied())
    }
}

/// Aggregated values for one thread count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadStats {
    pub threads: u32,
    /// Mean elapsed seconds across runs.
    pub mean_time: f64,
    /// Population standard deviation of elapsed seconds.
    pub std_time: f64,
    pub speedup: f64,
    pub efficiency: f64,
    /// Mean over runs of the shortest final route.
    pub mean_best_route: f64,
    /// Shortest final route seen in any run.
    pub best_route: f64,
}

/// Aggregates over every accepted run, one row per configured thread count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub run_count: usize,
    pub rows: Vec<ThreadStats>,
}

impl PerformanceSummary {
    /// Row for a given thread count, if it is part of the configuration.
    pub fn row(&self, threads: u32) -> Option<&ThreadStats> {
        self.rows.iter().find(|r| r.threads == threads)
    }
}
