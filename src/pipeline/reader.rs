//! Consumer side: latest forecast per city, trimmed to the current hour

use crate::error::ReadError;
use crate::forecast::{filter_payload, ForecastRecord, HOURLY_FIELD};
use crate::stream::{subject_for, JetStreamTransport, StreamTransport, STREAM_NAME};
use chrono::{Local, NaiveDateTime, Timelike};
use serde_json::Value;
use std::collections::BTreeMap;

/// Serves the last published forecast for each requested city.
///
/// Never fails: any city whose forecast cannot be read gets a placeholder
/// record with no hours.
pub struct ForecastReader<T> {
    transport: Option<T>,
}

impl ForecastReader<JetStreamTransport> {
    /// Connect to the stream at `url`.
    ///
    /// A failed connection is logged and leaves the reader without a
    /// transport, so every read falls back.
    pub async fn connect(url: &str) -> Self {
        match JetStreamTransport::connect(url).await {
            Ok(transport) => Self::new(Some(transport)),
            Err(e) => {
                log::error!("failed to connect to stream: {}", e);
                Self::new(None)
            }
        }
    }
}

impl<T: StreamTransport> ForecastReader<T> {
    pub fn new(transport: Option<T>) -> Self {
        Self { transport }
    }

    /// Read every key, using the local clock for the hour filter and fallback dates
    pub async fn read(&self, city_keys: &[String]) -> BTreeMap<String, ForecastRecord> {
        self.read_at(city_keys, Local::now().naive_local()).await
    }

    /// Read every key as of `now`
    pub async fn read_at(&self, city_keys: &[String], now: NaiveDateTime) -> BTreeMap<String, ForecastRecord> {
        let mut forecasts = BTreeMap::new();

        for key in city_keys {
            let record = match self.read_city(key, now.hour()).await {
                Ok(record) => record,
                Err(e) => {
                    log_read_error(key, &e);
                    ForecastRecord::fallback(key, now.date())
                }
            };
            forecasts.insert(key.clone(), record);
        }

        forecasts
    }

    async fn read_city(&self, key: &str, current_hour: u32) -> Result<ForecastRecord, ReadError> {
        let transport = self
            .transport
            .as_ref()
            .filter(|t| t.is_connected())
            .ok_or(ReadError::Unavailable)?;

        let payload = transport.last_message(STREAM_NAME, &subject_for(key)).await?;
        let value: Value = serde_json::from_slice(&payload)?;
        let mut value = filter_payload(value, current_hour);

        // Served unfiltered, but a typed record can only carry a list of hours
        if let Some(hourly) = value.get_mut(HOURLY_FIELD).filter(|h| !h.is_array()) {
            log::warn!("hourly forecast for {} is not a list, serving it without hours", key);
            *hourly = Value::Array(Vec::new());
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Release the reader's connection, if any
    pub async fn close(self) {
        if let Some(transport) = self.transport {
            if let Err(e) = transport.close().await {
                log::warn!("failed to close stream connection: {}", e);
            }
        }
    }
}

fn log_read_error(key: &str, error: &ReadError) {
    match error {
        ReadError::Unavailable => log::warn!("stream unavailable, no weather data for {}", key),
        ReadError::NotFound(_) => log::warn!("no weather data found for {}", key),
        ReadError::Malformed(e) => log::error!("failed to parse weather data for {}: {}", key, e),
        ReadError::Transport(e) => log::error!("error fetching weather for {}: {}", key, e),
    }
}
