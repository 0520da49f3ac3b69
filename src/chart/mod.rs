//! Server-side SVG line charts
//!
//! A [`LineChart`] holds any number of line series, shaded bands and
//! horizontal reference lines. [`LineChart::render_svg`] fits the data
//! bounds around all of them and writes a self-contained `<svg>` element
//! with axis labels and a legend, ready to be inlined in a page.
//!
//! ```ignore
//! let svg = LineChart::new("Time", "Vibration (g)")
//!     .with_series(Series::new("Vibration RMS", points))
//!     .with_reference_line(ReferenceLine::new("Threshold", 0.04))
//!     .render_svg();
//! ```

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::common::markup::escape;

pub mod axis;
pub mod viewport;

pub use axis::{AxisConfig, LabelFormatter};
pub use viewport::{DataBounds, PlotArea, Viewport};

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 400.0;

const SERIES_COLORS: [&str; 3] = ["#1f77b4", "#2ca02c", "#9467bd"];
const BAND_COLOR: &str = "#ff7f0e";
const REFERENCE_COLOR: &str = "#d62728";

/// x position of a timestamp on a chart: seconds since the Unix epoch.
pub fn timestamp_x(timestamp: NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp() as f64
}

#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: &str, points: Vec<(f64, f64)>) -> Self {
        Series {
            label: label.to_string(),
            points,
        }
    }
}

/// Shaded area between a lower and an upper curve sharing x values.
#[derive(Debug, Clone)]
pub struct Band {
    pub label: String,
    /// `(x, lower, upper)`
    pub points: Vec<(f64, f64, f64)>,
}

impl Band {
    pub fn new(label: &str, points: Vec<(f64, f64, f64)>) -> Self {
        Band {
            label: label.to_string(),
            points,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceLine {
    pub label: String,
    pub y: f64,
}

impl ReferenceLine {
    pub fn new(label: &str, y: f64) -> Self {
        ReferenceLine {
            label: label.to_string(),
            y,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineChart {
    x_label: String,
    y_label: String,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    series: Vec<Series>,
    bands: Vec<Band>,
    reference_lines: Vec<ReferenceLine>,
}

impl LineChart {
    pub fn new(x_label: &str, y_label: &str) -> Self {
        LineChart {
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x_axis: AxisConfig {
                label_count: 6,
                label_formatter: LabelFormatter::DateTime {
                    format: "%Y-%m-%d %H:%M",
                },
            },
            y_axis: AxisConfig {
                label_count: 5,
                label_formatter: LabelFormatter::Numeric { precision: 3 },
            },
            series: vec![],
            bands: vec![],
            reference_lines: vec![],
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_band(mut self, band: Band) -> Self {
        self.bands.push(band);
        self
    }

    pub fn with_reference_line(mut self, line: ReferenceLine) -> Self {
        self.reference_lines.push(line);
        self
    }

    fn data_bounds(&self) -> Option<DataBounds> {
        let series_points = self.series.iter().flat_map(|s| s.points.iter().copied());
        let band_points = self
            .bands
            .iter()
            .flat_map(|b| b.points.iter())
            .flat_map(|&(x, lower, upper)| [(x, lower), (x, upper)]);
        let reference_ys: Vec<f64> = self.reference_lines.iter().map(|l| l.y).collect();

        DataBounds::fit(series_points.chain(band_points), &reference_ys)
    }

    /// `None` when there is not a single finite point to draw.
    pub fn render_svg(&self) -> Option<String> {
        let bounds = self.data_bounds()?;
        let area = PlotArea {
            left: 80.0,
            top: 20.0,
            width: WIDTH - 80.0 - 20.0,
            height: HEIGHT - 20.0 - 60.0,
        };
        let viewport = Viewport::new(area, bounds);

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img">"#
        );
        let _ = write!(
            svg,
            r#"<rect class="plot-area" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="currentColor" stroke-opacity="0.4"/>"#,
            area.left, area.top, area.width, area.height
        );

        axis::write_x_axis(&mut svg, &self.x_axis, &viewport);
        axis::write_y_axis(&mut svg, &self.y_axis, &viewport);

        for band in &self.bands {
            write_band(&mut svg, band, &viewport);
        }
        for (i, series) in self.series.iter().enumerate() {
            write_series(&mut svg, series, SERIES_COLORS[i % SERIES_COLORS.len()], &viewport);
        }
        for line in &self.reference_lines {
            write_reference_line(&mut svg, line, &viewport);
        }

        let _ = write!(
            svg,
            r#"<text class="axis-label" x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">{}</text>"#,
            area.left + area.width / 2.0,
            HEIGHT - 10.0,
            escape(&self.x_label)
        );
        let _ = write!(
            svg,
            r#"<text class="axis-label" x="16" y="{y:.1}" text-anchor="middle" font-size="14" transform="rotate(-90 16 {y:.1})">{}</text>"#,
            escape(&self.y_label),
            y = area.top + area.height / 2.0,
        );

        self.write_legend(&mut svg, &area);

        svg.push_str("</svg>");

        Some(svg)
    }

    fn write_legend(&self, svg: &mut String, area: &PlotArea) {
        let x = area.right() - 190.0;
        let mut y = area.top + 18.0;

        svg.push_str(r#"<g class="legend" font-size="12">"#);

        for (i, series) in self.series.iter().enumerate() {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            let _ = write!(
                svg,
                r##"<line x1="{x:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{color}" stroke-width="2"/>"##,
                x2 = x + 24.0,
            );
            write_legend_text(svg, x + 32.0, y, &series.label);
            y += 18.0;
        }

        for band in &self.bands {
            let _ = write!(
                svg,
                r##"<rect x="{x:.1}" y="{ry:.1}" width="24" height="10" fill="{BAND_COLOR}" fill-opacity="0.3"/>"##,
                ry = y - 5.0,
            );
            write_legend_text(svg, x + 32.0, y, &band.label);
            y += 18.0;
        }

        for line in &self.reference_lines {
            let _ = write!(
                svg,
                r##"<line x1="{x:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{REFERENCE_COLOR}" stroke-width="2" stroke-dasharray="6 4"/>"##,
                x2 = x + 24.0,
            );
            write_legend_text(svg, x + 32.0, y, &line.label);
            y += 18.0;
        }

        svg.push_str("</g>");
    }
}

fn write_legend_text(svg: &mut String, x: f64, y: f64, label: &str) {
    let _ = write!(
        svg,
        r#"<text x="{x:.1}" y="{:.1}">{}</text>"#,
        y + 4.0,
        escape(label)
    );
}

fn write_series(svg: &mut String, series: &Series, color: &str, viewport: &Viewport) {
    let points: Vec<String> = series
        .points
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|&(x, y)| format!("{:.1},{:.1}", viewport.map_x(x), viewport.map_y(y)))
        .collect();

    let _ = write!(
        svg,
        r#"<polyline class="series" points="{}" fill="none" stroke="{color}" stroke-width="2"/>"#,
        points.join(" ")
    );
}

fn write_band(svg: &mut String, band: &Band, viewport: &Viewport) {
    let finite: Vec<(f64, f64, f64)> = band
        .points
        .iter()
        .copied()
        .filter(|(x, lower, upper)| x.is_finite() && lower.is_finite() && upper.is_finite())
        .collect();

    // Upper edge left to right, then lower edge back
    let outline: Vec<String> = finite
        .iter()
        .map(|&(x, _, upper)| (x, upper))
        .chain(finite.iter().rev().map(|&(x, lower, _)| (x, lower)))
        .map(|(x, y)| format!("{:.1},{:.1}", viewport.map_x(x), viewport.map_y(y)))
        .collect();

    let _ = write!(
        svg,
        r##"<polygon class="band" points="{}" fill="{BAND_COLOR}" fill-opacity="0.3" stroke="none"/>"##,
        outline.join(" ")
    );
}

fn write_reference_line(svg: &mut String, line: &ReferenceLine, viewport: &Viewport) {
    let area = viewport.plot_area();
    let y = viewport.map_y(line.y);

    let _ = write!(
        svg,
        r##"<line class="threshold" x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{REFERENCE_COLOR}" stroke-width="1.5" stroke-dasharray="6 4"/>"##,
        area.left,
        area.right(),
    );
}
