//! Three-panel chart of execution time, speedup and efficiency.
//!
//! Charts are drawn into an in-memory RGB buffer and then encoded as PNG.

use plotters::coord::Shift;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::prelude::*;
use std::ops::Range;

use crate::analyzer::types::{PerformanceSummary, THREAD_COUNTS};
use crate::config::ReportConfig;
use crate::error::ReportError;

/// Upper bound of the efficiency axis.
pub const EFFICIENCY_CEILING: f64 = 1.1;

/// Headroom above the largest plotted value.
const HEADROOM: f64 = 1.1;

const X_AXIS_LABEL: &str = "Liczba wątków";
const X_AXIS_MAX: f64 = 25.0;

/// Default matplotlib blue.
const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Linear thread-count axis whose ticks are exactly the configured thread counts.
#[derive(Debug, Clone, Copy)]
struct ThreadAxis {
    end: f64,
}

impl Ranged for ThreadAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let ratio = value / self.end;
        limit.0 + (ratio * (limit.1 - limit.0) as f64).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        THREAD_COUNTS.iter().map(|&t| t as f64).filter(|&t| t <= self.end).collect()
    }

    fn range(&self) -> Range<f64> {
        0.0..self.end
    }
}

/// Sizes in pixels, scaled with the image height so text stays readable at any DPI.
struct PanelStyle {
    caption_size: u32,
    label_size: u32,
    label_area: u32,
    margin: u32,
    line_width: u32,
    marker_size: u32,
    cap_width: u32,
}

impl PanelStyle {
    fn for_height(height: u32) -> Self {
        let scale = height as f64 / 1500.0;
        let px = |base: f64| ((base * scale).round() as u32).max(1);
        Self {
            caption_size: px(50.0),
            label_size: px(40.0),
            label_area: px(130.0),
            margin: px(30.0),
            line_width: px(5.0),
            marker_size: px(12.0),
            cap_width: px(40.0),
        }
    }
}

/// Y-axis ceiling of the time panel: largest mean plus largest deviation, with headroom.
pub fn time_ceiling(summary: &PerformanceSummary) -> f64 {
    let max_mean = summary.rows.iter().map(|r| r.mean_time).fold(0.0, f64::max);
    let max_std = summary.rows.iter().map(|r| r.std_time).fold(0.0, f64::max);
    drawable((max_mean + max_std) * HEADROOM)
}

/// Y-axis ceiling of the speedup panel.
pub fn speedup_ceiling(summary: &PerformanceSummary) -> f64 {
    drawable(summary.rows.iter().map(|r| r.speedup).fold(0.0, f64::max) * HEADROOM)
}

fn drawable(ceiling: f64) -> f64 {
    if ceiling > 0.0 && ceiling.is_finite() { ceiling } else { 1.0 }
}

/// Render the three charts and save them as a PNG at `config.output_image`.
pub fn render_charts(summary: &PerformanceSummary, config: &ReportConfig) -> Result<(), ReportError> {
    config.validate()?;
    let (width, height) = config.pixel_size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_report(&root, summary, &PanelStyle::for_height(height)).map_err(|e| ReportError::Render(e.to_string()))?;
        root.present().map_err(|e| ReportError::Render(e.to_string()))?;
    }

    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ReportError::Render(format!("pixel buffer does not match {}x{}", width, height)))?;
    image.save_with_format(&config.output_image, image::ImageFormat::Png)?;

    log::info!("Saved charts to {} ({}x{} px)", config.output_image.display(), width, height);
    Ok(())
}

fn draw_report(root: &Panel<'_>, summary: &PerformanceSummary, style: &PanelStyle) -> Result<(), Box<dyn std::error::Error>> {
    root.fill(&WHITE)?;

    let panels = root.split_evenly((1, 3));
    let [time_panel, speedup_panel, efficiency_panel] = panels.as_slice() else {
        return Err("expected three chart panels".into());
    };

    let times: Vec<(f64, f64)> = summary.rows.iter().map(|r| (r.threads as f64, r.mean_time)).collect();
    let deviations: Vec<f64> = summary.rows.iter().map(|r| r.std_time).collect();
    let speedups: Vec<(f64, f64)> = summary.rows.iter().map(|r| (r.threads as f64, r.speedup)).collect();
    let efficiencies: Vec<(f64, f64)> = summary.rows.iter().map(|r| (r.threads as f64, r.efficiency)).collect();

    draw_panel(
        time_panel,
        style,
        "Czas wykonania vs Liczba wątków",
        "Czas wykonania (s)",
        time_ceiling(summary),
        &times,
        Some(deviations.as_slice()),
    )?;
    draw_panel(
        speedup_panel,
        style,
        "Przyspieszenie vs Liczba wątków",
        "Przyspieszenie",
        speedup_ceiling(summary),
        &speedups,
        None,
    )?;
    draw_panel(
        efficiency_panel,
        style,
        "Efektywność vs Liczba wątków",
        "Efektywność",
        EFFICIENCY_CEILING,
        &efficiencies,
        None,
    )?;

    Ok(())
}

/// One line+marker chart with ticks at the configured thread counts.
fn draw_panel(
    area: &Panel<'_>,
    style: &PanelStyle,
    caption: &str,
    y_label: &str,
    y_max: f64,
    points: &[(f64, f64)],
    error_bars: Option<&[f64]>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", style.caption_size))
        .margin(style.margin)
        .x_label_area_size(style.label_area)
        .y_label_area_size(style.label_area)
        .build_cartesian_2d(ThreadAxis { end: X_AXIS_MAX }, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(X_AXIS_LABEL)
        .y_desc(y_label)
        .x_label_formatter(&|x: &f64| format!("{}", x.round() as u32))
        .label_style(("sans-serif", style.label_size))
        .axis_desc_style(("sans-serif", style.label_size))
        .draw()?;

    let line_style = SERIES_COLOR.stroke_width(style.line_width);

    chart.draw_series(LineSeries::new(points.iter().copied(), line_style))?;
    chart.draw_series(points.iter().map(|&point| Circle::new(point, style.marker_size, SERIES_COLOR.filled())))?;

    if let Some(deviations) = error_bars {
        chart.draw_series(
            points
                .iter()
                .zip(deviations)
                .map(|(&(x, y), &dev)| ErrorBar::new_vertical(x, y - dev, y, y + dev, line_style, style.cap_width)),
        )?;
    }

    Ok(())
}
