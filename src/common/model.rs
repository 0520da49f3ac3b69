use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::data::read::{deserialize_reading, deserialize_timestamp};

/// One row of the historical vibration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalReading {
    #[serde(rename = "Timestamp", deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Acceleration RMS (g)", deserialize_with = "deserialize_reading")]
    pub acceleration_rms: f64,
}

/// One row of the 7 day forecast file. The band is expected to contain
/// `yhat` but nothing checks it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub ds: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_reading")]
    pub yhat: f64,
    #[serde(deserialize_with = "deserialize_reading")]
    pub yhat_lower: f64,
    #[serde(deserialize_with = "deserialize_reading")]
    pub yhat_upper: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub ds: NaiveDateTime,
    pub yhat: f64,
}

impl From<&ForecastPoint> for Alert {
    fn from(point: &ForecastPoint) -> Self {
        Alert {
            ds: point.ds,
            yhat: point.yhat,
        }
    }
}
