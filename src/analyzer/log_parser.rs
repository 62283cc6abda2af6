//! Split a benchmark log into runs and extract timing and route data from each.
//!
//! Recognised line formats:
//!
//! ```text
//! Uruchamianie sekwencyjne...
//! Pokolenie 400 (Threads: 1)
//!   Wyspa 1, Najlepsza trasa: 1843.27
//! Czas wykonania sekwencyjnego: 10.4817 s
//! Uruchamianie dla 2 wątków...
//! Czas wykonania dla 2 wątków: 5.5012 s
//! ```
//!
//! The labels are matched literally and are the input contract of this tool.

use regex::Regex;

use super::types::{ExtractedRun, RawRun, SEQUENTIAL_THREADS, THREAD_COUNTS};
use crate::error::ReportError;

/// Marker line that starts every run.
pub const RUN_MARKER: &str = "Uruchamianie sekwencyjne...";

/// Failure while extracting fields from a single run segment.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    MalformedNumber { field: String, text: String },
    NonFiniteNumber { field: String, text: String },
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::MalformedNumber { field, text } => write!(f, "malformed number '{}' in {}", text, field),
            ExtractError::NonFiniteNumber { field, text } => write!(f, "number '{}' in {} is out of range", text, field),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Compiled label patterns, built once per log.
pub struct LogPatterns {
    sequential_time: Regex,
    parallel_times: Vec<(u32, Regex)>,
    generation_headers: Vec<(u32, Regex)>,
    block_end: Regex,
    best_route: Regex,
}

impl LogPatterns {
    pub fn new() -> Result<Self, regex::Error> {
        let sequential_time = Regex::new(r"Czas wykonania sekwencyjnego: (\d+\.\d+)")?;

        let parallel_times = THREAD_COUNTS
            .iter()
            .filter(|&&t| t != SEQUENTIAL_THREADS)
            .map(|&t| Regex::new(&format!(r"Czas wykonania dla {} wątków: (\d+\.\d+)", t)).map(|re| (t, re)))
            .collect::<Result<Vec<_>, _>>()?;

        let generation_headers = THREAD_COUNTS
            .iter()
            .map(|&t| Regex::new(&format!(r"Pokolenie \d+ \(Threads: {}\)", t)).map(|re| (t, re)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            sequential_time,
            parallel_times,
            generation_headers,
            block_end: Regex::new("Pokolenie|Czas")?,
            best_route: Regex::new(r"Najlepsza trasa: (\d+\.\d+)")?,
        })
    }
}

/// Split the log into run segments.
///
/// Text before the first marker precedes any run and is dropped.
pub fn split_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(RUN_MARKER).skip(1)
}

/// Extract times and final routes from one run segment.
///
/// Missing fields are simply absent from the result; only unparseable numbers are errors.
pub fn extract_run(patterns: &LogPatterns, segment: &str) -> Result<ExtractedRun, ExtractError> {
    let mut run = ExtractedRun::default();

    if let Some(caps) = patterns.sequential_time.captures(segment) {
        let seconds = parse_number("sequential time", &caps[1])?;
        run.times.insert(SEQUENTIAL_THREADS, seconds);
    }

    for (threads, pattern) in &patterns.parallel_times {
        if let Some(caps) = pattern.captures(segment) {
            let seconds = parse_number(&format!("time for {} threads", threads), &caps[1])?;
            run.times.insert(*threads, seconds);
        }
    }

    for (threads, header) in &patterns.generation_headers {
        if let Some(routes) = final_routes(patterns, header, *threads, segment)? {
            run.routes.insert(*threads, routes);
        }
    }

    Ok(run)
}

/// Best-route values of the last generation block for one thread count.
///
/// A block ends at the next `Pokolenie` or `Czas` label. Returns `None` when there is
/// no block or the last block lists no routes.
fn final_routes(patterns: &LogPatterns, header: &Regex, threads: u32, segment: &str) -> Result<Option<Vec<f64>>, ExtractError> {
    let Some(last_header) = header.find_iter(segment).last() else {
        return Ok(None);
    };

    let rest = &segment[last_header.end()..];
    let end = patterns.block_end.find(rest).map_or(rest.len(), |m| m.start());
    let block = &rest[..end];

    let field = format!("best route for {} threads", threads);
    let routes = patterns
        .best_route
        .captures_iter(block)
        .map(|caps| parse_number(&field, &caps[1]))
        .collect::<Result<Vec<_>, _>>()?;

    if routes.is_empty() { Ok(None) } else { Ok(Some(routes)) }
}

fn parse_number(field: &str, text: &str) -> Result<f64, ExtractError> {
    let value: f64 = text.parse().map_err(|_| ExtractError::MalformedNumber {
        field: field.to_string(),
        text: text.to_string(),
    })?;

    if !value.is_finite() {
        return Err(ExtractError::NonFiniteNumber {
            field: field.to_string(),
            text: text.to_string(),
        });
    }

    Ok(value)
}

/// Parse every complete run from the log text.
///
/// A segment whose numbers cannot be read is logged and skipped. A segment with missing
/// fields is dropped without a message.
///
/// # Returns
///
/// The accepted runs in log order, or `ReportError::NoValidResults` if there are none.
pub fn parse_results(text: &str) -> Result<Vec<RawRun>, ReportError> {
    let patterns = LogPatterns::new()?;
    let mut results = Vec::new();

    for (index, segment) in split_runs(text).enumerate() {
        match extract_run(&patterns, segment) {
            Ok(extracted) => {
                if let Some(run) = extracted.into_complete() {
                    log::debug!("Run {}: {:?}", index + 1, run.times().collect::<Vec<_>>());
                    results.push(run);
                }
            }
            Err(e) => {
                log::warn!("Error processing run {}: {}", index + 1, e);
            }
        }
    }

    if results.is_empty() {
        return Err(ReportError::NoValidResults);
    }

    log::info!("Successfully parsed {} complete runs", results.len());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation(threads: u32, number: u32, routes: &[f64]) -> String {
        let mut text = format!("Pokolenie {} (Threads: {})\n", number, threads);
        for (i, route) in routes.iter().enumerate() {
            text.push_str(&format!("  Wyspa {}, Najlepsza trasa: {:.2}\n", i + 1, route));
        }
        text
    }

    fn time_line(threads: u32, seconds: &str) -> String {
        if threads == SEQUENTIAL_THREADS {
            format!("Czas wykonania sekwencyjnego: {} s\n", seconds)
        } else {
            format!("Czas wykonania dla {} wątków: {} s\n", threads, seconds)
        }
    }

    /// A run in the benchmark's output format; `skip_time` and `skip_routes` leave out one thread count.
    fn run_text(times: [f64; 5], skip_time: Option<u32>, skip_routes: Option<u32>) -> String {
        let mut text = format!("{}\n", RUN_MARKER);
        for (i, &threads) in THREAD_COUNTS.iter().enumerate() {
            if threads != SEQUENTIAL_THREADS {
                text.push_str(&format!("Uruchamianie dla {} wątków...\n", threads));
            }
            if skip_routes != Some(threads) {
                text.push_str(&generation(threads, 1, &[2400.5, 2500.25]));
                text.push_str(&generation(threads, 2, &[1800.0 + i as f64, 1900.5]));
            }
            if skip_time != Some(threads) {
                text.push_str(&time_line(threads, &format!("{:.4}", times[i])));
            }
        }
        text
    }

    const TIMES: [f64; 5] = [10.0, 5.5, 3.0, 1.2, 0.9];

    #[test]
    fn test_single_run() {
        let runs = parse_results(&run_text(TIMES, None, None)).unwrap();
        assert_eq!(runs.len(), 1);

        let run = &runs[0];
        assert_eq!(run.times().count(), 5);
        assert!((0..5).all(|i| !run.routes_at(i).is_empty()));
        assert_eq!(run.times().collect::<Vec<_>>(), vec![(1, 10.0), (2, 5.5), (4, 3.0), (12, 1.2), (24, 0.9)]);
        assert_eq!(run.routes_at(0), &[1800.0, 1900.5]);
        assert_eq!(run.routes_at(4), &[1804.0, 1900.5]);
    }

    #[test]
    fn test_preamble_before_first_marker_is_ignored() {
        let text = format!("Pokolenie 9 (Threads: 1)\n  Wyspa 1, Najlepsza trasa: 1.50\n{}", run_text(TIMES, None, None));
        let runs = parse_results(&text).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].routes_at(0), &[1800.0, 1900.5]);
    }

    #[test]
    fn test_run_missing_time_is_excluded() {
        for threads in THREAD_COUNTS {
            let text = format!("{}{}", run_text(TIMES, Some(threads), None), run_text(TIMES, None, None));
            let runs = parse_results(&text).unwrap();
            assert_eq!(runs.len(), 1, "missing time for {} threads", threads);
        }
    }

    #[test]
    fn test_run_missing_routes_is_excluded() {
        for threads in THREAD_COUNTS {
            let text = format!("{}{}", run_text(TIMES, None, Some(threads)), run_text(TIMES, None, None));
            let runs = parse_results(&text).unwrap();
            assert_eq!(runs.len(), 1, "missing routes for {} threads", threads);
        }
    }

    #[test]
    fn test_no_marker_means_no_valid_results() {
        let text = "Czas wykonania sekwencyjnego: 10.0 s\nCzas wykonania dla 2 wątków: 5.0 s\n";
        assert!(matches!(parse_results(text), Err(ReportError::NoValidResults)));
        assert!(matches!(parse_results(""), Err(ReportError::NoValidResults)));
    }

    #[test]
    fn test_only_incomplete_runs_means_no_valid_results() {
        let text = run_text(TIMES, Some(24), None);
        assert!(matches!(parse_results(&text), Err(ReportError::NoValidResults)));
    }

    #[test]
    fn test_out_of_range_number_skips_only_that_run() {
        let huge = format!("{}.5", "9".repeat(400));
        let broken = run_text(TIMES, None, None).replace("Czas wykonania dla 4 wątków: 3.0000", &format!("Czas wykonania dla 4 wątków: {}", huge));

        let patterns = LogPatterns::new().unwrap();
        let segment = split_runs(&broken).next().unwrap();
        assert!(matches!(extract_run(&patterns, segment), Err(ExtractError::NonFiniteNumber { .. })));

        let text = format!("{}{}{}", run_text(TIMES, None, None), broken, run_text([20.0, 11.0, 6.0, 2.4, 1.8], None, None));
        let runs = parse_results(&text).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].time_at(0), 20.0);
    }

    #[test]
    fn test_non_ascii_digits_skip_only_that_run() {
        let broken = run_text(TIMES, None, None).replace("Czas wykonania dla 12 wątków: 1.2000", "Czas wykonania dla 12 wątków: ١٢.٥");

        let patterns = LogPatterns::new().unwrap();
        let segment = split_runs(&broken).next().unwrap();
        match extract_run(&patterns, segment) {
            Err(ExtractError::MalformedNumber { field, text }) => {
                assert_eq!(field, "time for 12 threads");
                assert_eq!(text, "١٢.٥");
            }
            other => panic!("Expected MalformedNumber, got {:?}", other),
        }

        let text = format!("{}{}", broken, run_text([20.0, 11.0, 6.0, 2.4, 1.8], None, None));
        let runs = parse_results(&text).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].time_at(0), 20.0);
    }

    #[test]
    fn test_thread_one_does_not_match_twelve() {
        let patterns = LogPatterns::new().unwrap();
        let segment = format!("{}{}", generation(12, 1, &[10.5]), time_line(12, "1.2000"));

        let run = extract_run(&patterns, &segment).unwrap();
        assert_eq!(run.routes.keys().copied().collect::<Vec<_>>(), vec![12]);
        assert_eq!(run.times.keys().copied().collect::<Vec<_>>(), vec![12]);
    }

    #[test]
    fn test_only_last_generation_counts() {
        let patterns = LogPatterns::new().unwrap();
        let segment = format!("{}{}{}", generation(2, 1, &[300.25]), generation(2, 2, &[200.5, 210.75]), time_line(2, "5.0000"));

        let run = extract_run(&patterns, &segment).unwrap();
        assert_eq!(run.routes.get(&2), Some(&vec![200.5, 210.75]));
    }

    #[test]
    fn test_last_generation_block_extends_past_lowercase_label() {
        let patterns = LogPatterns::new().unwrap();
        let segment = format!(
            "{}Ostatnie pokolenie (Threads: 4)\n  Wyspa 1, Najlepsza trasa: 150.00\n{}",
            generation(4, 7, &[150.0]),
            time_line(4, "3.0000")
        );

        let run = extract_run(&patterns, &segment).unwrap();
        assert_eq!(run.routes.get(&4), Some(&vec![150.0, 150.0]));
    }

    #[test]
    fn test_empty_last_generation_is_absent() {
        let patterns = LogPatterns::new().unwrap();
        let segment = format!("{}{}", generation(24, 1, &[99.5]), generation(24, 2, &[]));

        let run = extract_run(&patterns, &segment).unwrap();
        assert!(run.routes.get(&24).is_none());
    }

    #[test]
    fn test_integer_time_is_not_recognised() {
        let patterns = LogPatterns::new().unwrap();
        let run = extract_run(&patterns, "Czas wykonania sekwencyjnego: 10 s\n").unwrap();
        assert!(run.times.is_empty());
    }
}
