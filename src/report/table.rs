//! Fixed-width text tables for standard output.

use std::fmt::Write;

use crate::analyzer::types::PerformanceSummary;

const PERFORMANCE_HEADER: &str = "Liczba wątków | Średni czas (s) | Przyspieszenie | Efektywność";
const QUALITY_HEADER: &str = "Liczba wątków | Średnia najlepsza trasa | Najlepsza trasa";

/// Time, speedup and efficiency per thread count, one centered row each.
pub fn format_performance_table(summary: &PerformanceSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nPodsumowanie wydajności:");
    let _ = writeln!(out, "{}", PERFORMANCE_HEADER);
    let _ = writeln!(out, "{}", "-".repeat(65));
    for row in &summary.rows {
        let _ = writeln!(
            out,
            "{:^12} | {:^13.2} | {:^13.2} | {:^10.2}",
            row.threads, row.mean_time, row.speedup, row.efficiency
        );
    }
    out
}

/// Final best route distances per thread count.
pub fn format_quality_table(summary: &PerformanceSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nJakość rozwiązań (ostatnie pokolenie, {} przebiegów):", summary.run_count);
    let _ = writeln!(out, "{}", QUALITY_HEADER);
    let _ = writeln!(out, "{}", "-".repeat(QUALITY_HEADER.chars().count()));
    for row in &summary.rows {
        let _ = writeln!(out, "{:^12} | {:^22.2} | {:^15.2}", row.threads, row.mean_best_route, row.best_route);
    }
    out
}
