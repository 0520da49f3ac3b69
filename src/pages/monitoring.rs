use crate::chart::{timestamp_x, LineChart, ReferenceLine, Series};
use crate::common::constants::THRESHOLD;
use crate::common::model::HistoricalReading;
use crate::pages::{text, Notice};

pub fn chart(readings: &[HistoricalReading]) -> LineChart {
    let points = readings
        .iter()
        .map(|reading| (timestamp_x(reading.timestamp), reading.acceleration_rms))
        .collect();

    LineChart::new(text::AXIS_TIME, text::AXIS_VIBRATION)
        .with_series(Series::new(text::SERIES_RMS, points))
        .with_reference_line(ReferenceLine::new(text::THRESHOLD_LINE, THRESHOLD))
}

pub fn render(readings: &[HistoricalReading]) -> String {
    let mut html = format!("<h1>{}</h1>", text::MONITORING_TITLE);

    let svg = if readings.is_empty() {
        None
    } else {
        chart(readings).render_svg()
    };

    match svg {
        Some(svg) => html.push_str(&svg),
        None => html.push_str(&Notice::Error(text::HISTORICAL_NOT_FOUND.to_string()).render()),
    }

    html
}
