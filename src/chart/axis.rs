//! Axis tick labels

use std::fmt::Write;

use chrono::DateTime;

use super::viewport::Viewport;
use crate::common::markup::escape;

#[derive(Debug, Clone, Copy)]
pub enum LabelFormatter {
    /// x values are seconds since the Unix epoch
    DateTime { format: &'static str },
    Numeric { precision: usize },
}

impl LabelFormatter {
    pub fn format(&self, value: f64) -> String {
        match self {
            LabelFormatter::DateTime { format } => DateTime::from_timestamp(value.round() as i64, 0)
                .map(|t| t.naive_utc().format(format).to_string())
                .unwrap_or_default(),
            LabelFormatter::Numeric { precision } => format!("{:.*}", precision, value),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AxisConfig {
    pub label_count: usize,
    pub label_formatter: LabelFormatter,
}

/// Evenly spaced values from `min` to `max`, both ends included.
fn ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![(min + max) / 2.0],
        _ => (0..count)
            .map(|i| min + (max - min) * i as f64 / (count - 1) as f64)
            .collect(),
    }
}

pub(super) fn write_x_axis(svg: &mut String, config: &AxisConfig, viewport: &Viewport) {
    let area = viewport.plot_area();
    let bounds = viewport.data_bounds();
    let last = config.label_count.saturating_sub(1);

    for (i, value) in ticks(bounds.x_min, bounds.x_max, config.label_count)
        .into_iter()
        .enumerate()
    {
        let x = viewport.map_x(value);
        let anchor = if i == 0 {
            "start"
        } else if i == last {
            "end"
        } else {
            "middle"
        };

        let _ = write!(
            svg,
            r#"<line class="tick" x1="{x:.1}" y1="{b:.1}" x2="{x:.1}" y2="{t:.1}" stroke="currentColor" stroke-width="1" stroke-opacity="0.1"/>"#,
            b = area.bottom(),
            t = area.bottom() + 5.0,
        );
        let _ = write!(
            svg,
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="{anchor}" font-size="12">{label}</text>"#,
            y = area.bottom() + 20.0,
            label = escape(&config.label_formatter.format(value)),
        );
    }
}

pub(super) fn write_y_axis(svg: &mut String, config: &AxisConfig, viewport: &Viewport) {
    let area = viewport.plot_area();
    let bounds = viewport.data_bounds();

    for value in ticks(bounds.y_min, bounds.y_max, config.label_count) {
        let y = viewport.map_y(value);

        let _ = write!(
            svg,
            r#"<line class="grid" x1="{l:.1}" y1="{y:.1}" x2="{r:.1}" y2="{y:.1}" stroke="currentColor" stroke-opacity="0.1"/>"#,
            l = area.left,
            r = area.right(),
        );
        let _ = write!(
            svg,
            r#"<text x="{x:.1}" y="{ty:.1}" text-anchor="end" font-size="12">{label}</text>"#,
            x = area.left - 6.0,
            ty = y + 4.0,
            label = escape(&config.label_formatter.format(value)),
        );
    }
}
