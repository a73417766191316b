//! Producer side: fetch, normalize and publish every configured city

use crate::config::CityConfig;
use crate::error::{ConfigError, PublishError};
use crate::stream::{ensure_stream, subject_for, StreamTransport, STREAM_NAME, SUBJECT_PATTERN};
use crate::upstream::{normalize, HttpGet, WeatherApiClient};
use chrono::Local;

/// One producer run over a fixed list of cities.
///
/// Owns the stream connection for the duration of the run. `run` consumes the
/// pipeline and closes the connection whether the batch succeeded or not.
pub struct PublishPipeline<H, T> {
    api: WeatherApiClient<H>,
    transport: T,
    cities: Vec<CityConfig>,
}

impl<H: HttpGet, T: StreamTransport> PublishPipeline<H, T> {
    /// Create a pipeline. Fails if `cities` is empty.
    pub fn new(api: WeatherApiClient<H>, transport: T, cities: Vec<CityConfig>) -> Result<Self, ConfigError> {
        if cities.is_empty() {
            return Err(ConfigError::NoCities);
        }
        Ok(Self { api, transport, cities })
    }

    /// Publish every city in order, stopping at the first failure.
    ///
    /// The failure is logged once here; its message names the failing subject.
    pub async fn run(self) -> Result<(), PublishError> {
        let result = self.publish_all().await;

        if let Err(e) = &result {
            log::error!("publish run aborted: {}", e);
        }
        if let Err(e) = self.transport.close().await {
            log::warn!("failed to close stream connection: {}", e);
        }

        result
    }

    async fn publish_all(&self) -> Result<(), PublishError> {
        ensure_stream(&self.transport, STREAM_NAME, SUBJECT_PATTERN)
            .await
            .map_err(PublishError::Provision)?;

        for city in &self.cities {
            self.publish_city(city).await?;
        }

        log::info!("published forecasts for {} cities", self.cities.len());
        Ok(())
    }

    async fn publish_city(&self, city: &CityConfig) -> Result<(), PublishError> {
        let subject = subject_for(&city.key);

        let response = match self.api.get_weather(&city.name).await {
            Ok(response) => response,
            Err(source) => return Err(PublishError::Fetch { subject, source }),
        };

        let record = normalize(&city.name, &response, Local::now().date_naive());
        let payload = record.to_payload().map_err(|source| PublishError::Encode {
            subject: subject.clone(),
            source,
        })?;

        if let Err(source) = self.transport.publish(&subject, payload).await {
            return Err(PublishError::Publish { subject, source });
        }

        log::info!("published to {} ({} hours)", subject, record.hourly.len());
        Ok(())
    }
}
