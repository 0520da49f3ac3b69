use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::common::model::{ForecastPoint, HistoricalReading};

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Cell spellings read as a missing value.
const MISSING_VALUES: [&str; 5] = ["", "NA", "N/A", "null", "NULL"];

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(timestamp);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default());
        }
    }

    Err(anyhow!("'{}' is not a datetime", raw))
}

pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Missing cells load as NaN so the rest of the row is kept. Charts skip
/// NaN and it never compares above the threshold.
pub fn deserialize_reading<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if MISSING_VALUES.contains(&raw) {
        return Ok(f64::NAN);
    }

    raw.parse::<f64>().map_err(serde::de::Error::custom)
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("Couldn't open {}", path.to_string_lossy()))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = vec![];

    for (index, record) in reader.deserialize::<T>().enumerate() {
        // Header is line 1
        let row = record.with_context(|| {
            format!(
                "Bad record at line {} of {}",
                index + 2,
                path.to_string_lossy()
            )
        })?;
        rows.push(row);
    }

    Ok(rows)
}

pub fn read_historical(path: &Path) -> Result<Vec<HistoricalReading>> {
    read_rows(path)
}

pub fn read_forecast(path: &Path) -> Result<Vec<ForecastPoint>> {
    read_rows(path)
}
