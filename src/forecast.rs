//! Forecast record carried on the stream
//!
//! The same JSON shape is written by the publisher and read back by the
//! reader:
//!
//! ```json
//! {"city": "Moscow", "date": "2025-08-09",
//!  "hourly_forecast": [{"hour": 0, "display_time": "00:00", "temperature": 18.5}]}
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Date format used in records
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Key of the hourly samples in the wire format
pub const HOURLY_FIELD: &str = "hourly_forecast";

/// One hour of forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourSample {
    /// Local hour of day, 0-23
    pub hour: u32,
    /// "HH:MM"
    pub display_time: String,
    /// Degrees Celsius, as reported upstream
    pub temperature: f64,
}

/// Forecast for one city and one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub city: String,
    /// "YYYY-MM-DD"
    pub date: String,
    /// Chronological order of the source day; empty when no data is available
    #[serde(rename = "hourly_forecast")]
    pub hourly: Vec<HourSample>,
}

impl ForecastRecord {
    /// Create a record for the given city and date
    pub fn new(city: impl Into<String>, date: NaiveDate, hourly: Vec<HourSample>) -> Self {
        Self {
            city: city.into(),
            date: date.format(DATE_FORMAT).to_string(),
            hourly,
        }
    }

    /// Placeholder served when no live forecast can be obtained for `city_key`
    pub fn fallback(city_key: &str, today: NaiveDate) -> Self {
        Self::new(capitalize(city_key), today, Vec::new())
    }

    /// A new record holding only the samples up to and including `current_hour`
    pub fn up_to_hour(&self, current_hour: u32) -> Self {
        Self {
            city: self.city.clone(),
            date: self.date.clone(),
            hourly: self
                .hourly
                .iter()
                .filter(|s| s.hour <= current_hour)
                .cloned()
                .collect(),
        }
    }

    /// Serialize to the stream payload
    pub fn to_payload(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Keep only hourly entries with `hour <= current_hour` in a raw payload.
///
/// A payload whose `hourly_forecast` is not an array is returned unchanged.
/// Entries without a numeric `hour` are kept as-is.
pub fn filter_payload(mut payload: Value, current_hour: u32) -> Value {
    if let Some(Value::Array(hours)) = payload.get_mut(HOURLY_FIELD) {
        hours.retain(|entry| {
            entry
                .get("hour")
                .and_then(Value::as_u64)
                .map_or(true, |h| h <= u64::from(current_hour))
        });
    }
    payload
}

/// First character upper-cased, the rest lower-cased ("moscow" -> "Moscow")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
