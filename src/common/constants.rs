use std::time::Duration;

/// Vibration level (g) above which a reading or forecast is a concern.
pub const THRESHOLD: f64 = 0.04;

/// How long a loaded snapshot is served before the files are read again.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

pub const HISTORICAL_FILE: &str = "historis_vibrasi_simulasi.csv";
pub const FORECAST_FILE: &str = "forecast_vibrasi_7hari.csv";
