//! weatherapi.com forecast client

use super::http::{HttpGet, HttpResponse, RetryingHttpFetcher};
use crate::error::{ConfigError, FetchError};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Days of forecast requested per call
const FORECAST_DAYS: u32 = 1;

/// Language of condition texts in the response
const LANGUAGE: &str = "ru";

/// Client for the `forecast.json` endpoint
pub struct WeatherApiClient<H> {
    fetcher: RetryingHttpFetcher<H>,
    api_key: String,
    base_url: String,
}

impl<H: HttpGet> WeatherApiClient<H> {
    /// Create a client. Fails immediately if no API key is configured.
    pub fn new(api_key: Option<&str>, base_url: &str, http: H) -> Result<Self, ConfigError> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key.to_string(),
            _ => return Err(ConfigError::MissingApiKey),
        };

        Ok(Self {
            fetcher: RetryingHttpFetcher::new(http),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch today's hourly forecast for `city`
    pub async fn get_weather(&self, city: &str) -> Result<HttpResponse, FetchError> {
        self.fetcher.fetch(&self.forecast_url(city)).await
    }

    fn forecast_url(&self, city: &str) -> String {
        format!(
            "{}/forecast.json?key={}&q={}&days={}&lang={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(city),
            FORECAST_DAYS,
            LANGUAGE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::fake::FakeHttp;
    use std::sync::Arc;

    #[test]
    fn test_missing_api_key() {
        let http = FakeHttp::ok(HttpResponse::new(200, "{}"));
        let result = WeatherApiClient::new(None, DEFAULT_BASE_URL, http);
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_blank_api_key() {
        let http = FakeHttp::ok(HttpResponse::new(200, "{}"));
        let result = WeatherApiClient::new(Some("  "), DEFAULT_BASE_URL, http);
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_forecast_url() {
        let http = FakeHttp::ok(HttpResponse::new(200, "{}"));
        let client = WeatherApiClient::new(Some("abc123"), DEFAULT_BASE_URL, http).unwrap();

        assert_eq!(
            client.forecast_url("Moscow"),
            "https://api.weatherapi.com/v1/forecast.json?key=abc123&q=Moscow&days=1&lang=ru"
        );
    }

    #[test]
    fn test_forecast_url_encodes_city() {
        let http = FakeHttp::ok(HttpResponse::new(200, "{}"));
        let client = WeatherApiClient::new(Some("abc123"), "http://localhost:8080/v1/", http).unwrap();

        let url = client.forecast_url("Nizhny Novgorod");
        assert!(url.starts_with("http://localhost:8080/v1/forecast.json?"));
        assert!(url.contains("q=Nizhny%20Novgorod"));
    }

    #[tokio::test]
    async fn test_get_weather_delegates_to_fetcher() {
        let http = Arc::new(FakeHttp::ok(HttpResponse::new(200, "{\"forecast\":{}}")));
        let client = WeatherApiClient::new(Some("abc123"), DEFAULT_BASE_URL, Arc::clone(&http)).unwrap();

        let response = client.get_weather("Saint-Petersburg").await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(
            http.urls(),
            vec!["https://api.weatherapi.com/v1/forecast.json?key=abc123&q=Saint-Petersburg&days=1&lang=ru"]
        );
    }
}
