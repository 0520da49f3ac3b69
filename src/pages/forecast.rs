use std::fmt::Write;

use crate::alerts::alerts;
use crate::chart::{timestamp_x, Band, LineChart, ReferenceLine, Series};
use crate::common::constants::THRESHOLD;
use crate::common::model::{Alert, ForecastPoint};
use crate::pages::{escape, text, Notice};

pub fn chart(points: &[ForecastPoint]) -> LineChart {
    let estimate = points
        .iter()
        .map(|point| (timestamp_x(point.ds), point.yhat))
        .collect();
    let interval = points
        .iter()
        .map(|point| (timestamp_x(point.ds), point.yhat_lower, point.yhat_upper))
        .collect();

    LineChart::new(text::AXIS_TIME, text::AXIS_VIBRATION)
        .with_band(Band::new(text::BAND_INTERVAL, interval))
        .with_series(Series::new(text::SERIES_FORECAST, estimate))
        .with_reference_line(ReferenceLine::new(text::THRESHOLD_LINE, THRESHOLD))
}

fn alert_table(alerts: &[Alert]) -> String {
    let mut table = format!(
        r#"<table class="alerts"><thead><tr><th>{}</th><th>{}</th></tr></thead><tbody>"#,
        escape(text::COLUMN_TIME),
        escape(text::COLUMN_PREDICTED)
    );

    for alert in alerts {
        let _ = write!(
            table,
            "<tr><td>{}</td><td>{}</td></tr>",
            alert.ds.format("%Y-%m-%d %H:%M:%S"),
            alert.yhat
        );
    }

    table.push_str("</tbody></table>");
    table
}

pub fn render(points: &[ForecastPoint]) -> String {
    let mut html = format!("<h1>{}</h1>", text::FORECAST_TITLE);

    let svg = if points.is_empty() {
        None
    } else {
        chart(points).render_svg()
    };

    let Some(svg) = svg else {
        html.push_str(&Notice::Error(text::FORECAST_NOT_FOUND.to_string()).render());
        return html;
    };

    html.push_str(&svg);

    let alerts = alerts(points, THRESHOLD);

    if alerts.is_empty() {
        html.push_str(&Notice::Success(text::ALL_CLEAR.to_string()).render());
    } else {
        html.push_str(&Notice::Warning(text::alert_warning(alerts.len())).render());
        html.push_str(&alert_table(&alerts));
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read::parse_timestamp;

    fn point(ds: &str, yhat: f64) -> ForecastPoint {
        ForecastPoint {
            ds: parse_timestamp(ds).unwrap(),
            yhat,
            yhat_lower: yhat - 0.005,
            yhat_upper: yhat + 0.005,
        }
    }

    #[test]
    fn empty_forecast_shows_only_not_found() {
        let html = render(&[]);

        assert!(html.contains(text::FORECAST_NOT_FOUND));
        assert!(!html.contains("<svg"));
        assert!(!html.contains(text::ALL_CLEAR));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn reports_points_above_threshold() {
        let html = render(&[
            point("2024-01-08 00:00:00", 0.03),
            point("2024-01-08 01:00:00", 0.05),
            point("2024-01-08 02:00:00", 0.04),
        ]);

        assert!(html.contains(&text::alert_warning(1)));
        assert!(html.contains("⚠️ 1 upcoming hours"));
        assert!(!html.contains(text::ALL_CLEAR));
        assert!(html.contains("<th>Time</th><th>Predicted Vibration (g)</th>"));
        assert!(html.contains("<tr><td>2024-01-08 01:00:00</td><td>0.05</td></tr>"));
        assert_eq!(html.matches("<tr><td>").count(), 1);
    }

    #[test]
    fn all_clear_when_nothing_exceeds_threshold() {
        let html = render(&[
            point("2024-01-08 00:00:00", 0.01),
            point("2024-01-08 01:00:00", 0.04),
        ]);

        assert!(html.contains(text::ALL_CLEAR));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn chart_has_band_estimate_and_threshold() {
        let svg = chart(&[
            point("2024-01-08 00:00:00", 0.01),
            point("2024-01-08 01:00:00", 0.02),
        ])
        .render_svg()
        .unwrap();

        assert_eq!(svg.matches(r#"class="band""#).count(), 1);
        assert_eq!(svg.matches(r#"class="series""#).count(), 1);
        assert_eq!(svg.matches(r#"class="threshold""#).count(), 1);
        assert!(svg.contains(">Confidence Interval</text>"));
        assert!(svg.contains(">Forecast</text>"));
    }
}
