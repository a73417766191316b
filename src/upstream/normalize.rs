//! Upstream response -> `ForecastRecord`

use super::http::HttpResponse;
use crate::forecast::{ForecastRecord, HourSample};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Deserialize;

/// Timestamp format of `forecast.forecastday[].hour[].time`
const UPSTREAM_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    forecast: Option<Forecast>,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    #[serde(default)]
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    #[serde(default)]
    hour: Option<Vec<HourEntry>>,
}

#[derive(Debug, Deserialize)]
struct HourEntry {
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    temp_c: Option<f64>,
}

/// Build the record for `city` from an upstream response.
///
/// Never fails: a non-200 status, an unparseable body or a missing hour list
/// all yield an empty `hourly`. The record is dated `today`, whatever date the
/// payload carries.
pub fn normalize(city: &str, response: &HttpResponse, today: NaiveDate) -> ForecastRecord {
    ForecastRecord::new(city, today, extract_hourly(city, response))
}

fn extract_hourly(city: &str, response: &HttpResponse) -> Vec<HourSample> {
    if response.status != 200 {
        log::warn!("weather API returned status {} for {}", response.status, city);
        return Vec::new();
    }

    let parsed: ForecastResponse = match serde_json::from_str(&response.body) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("unexpected weather API response for {}: {}", city, e);
            return Vec::new();
        }
    };

    let hours = parsed
        .forecast
        .and_then(|f| f.forecastday.into_iter().next())
        .and_then(|day| day.hour)
        .unwrap_or_default();

    hours
        .into_iter()
        .filter_map(|entry| to_sample(city, entry))
        .collect()
}

/// One hour entry, or `None` (with a warning) if it lacks a usable time or temperature
fn to_sample(city: &str, entry: HourEntry) -> Option<HourSample> {
    let (Some(raw_time), Some(temperature)) = (entry.time, entry.temp_c) else {
        log::warn!("skipping incomplete hour entry for {}", city);
        return None;
    };

    match NaiveDateTime::parse_from_str(&raw_time, UPSTREAM_TIME_FORMAT) {
        Ok(time) => Some(HourSample {
            hour: time.hour(),
            display_time: time.format("%H:%M").to_string(),
            temperature,
        }),
        Err(e) => {
            log::warn!("skipping hour '{}' for {}: {}", raw_time, city, e);
            None
        }
    }
}
