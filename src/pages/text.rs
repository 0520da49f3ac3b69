//! Every piece of user-facing copy on the dashboard, in one place.

pub const NAV_TITLE: &str = "🧭 Navigation";
pub const NAV_PROMPT: &str = "Choose page:";

pub const PAGE_MONITORING: &str = "📊 Monitoring";
pub const PAGE_FORECAST: &str = "🔮 Forecast";
pub const PAGE_UPLOAD: &str = "⬆️ Upload Data";

pub const AXIS_TIME: &str = "Time";
pub const AXIS_VIBRATION: &str = "Vibration (g)";
pub const THRESHOLD_LINE: &str = "Threshold";

pub const MONITORING_TITLE: &str = "📊 Historical Vibration Monitoring";
pub const HISTORICAL_NOT_FOUND: &str = "Historical data not found.";
pub const SERIES_RMS: &str = "Vibration RMS";

pub const FORECAST_TITLE: &str = "🔮 7-Day Vibration Forecast";
pub const FORECAST_NOT_FOUND: &str = "Forecast data not found.";
pub const SERIES_FORECAST: &str = "Forecast";
pub const BAND_INTERVAL: &str = "Confidence Interval";
pub const COLUMN_TIME: &str = "Time";
pub const COLUMN_PREDICTED: &str = "Predicted Vibration (g)";
pub const ALL_CLEAR: &str = "✅ All forecasts are below the threshold.";

pub fn alert_warning(count: usize) -> String {
    format!("⚠️ {} upcoming hours are forecast to exceed the vibration limit!", count)
}

pub const UPLOAD_TITLE: &str = "⬆️ Upload New CSV Data";
pub const UPLOAD_HISTORICAL: &str = "Upload historical file";
pub const UPLOAD_FORECAST: &str = "Upload forecast file";
pub const UPLOAD_BUTTON: &str = "Upload";
pub const HISTORICAL_UPLOADED: &str =
    "✅ Historical file uploaded. Open the Monitoring page to view it.";
pub const FORECAST_UPLOADED: &str = "✅ Forecast file uploaded. Open the Forecast page to view it.";
pub const FILE_NAME_NOTE: &str = "📌 File names must match for the system to recognise them.";

pub fn not_csv(file_name: &str) -> String {
    format!("{} is not a CSV file and was not uploaded.", file_name)
}
