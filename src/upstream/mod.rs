//! Upstream weather API
//!
//! Fetching (with retries) and normalization of weatherapi.com forecasts.

mod http;
mod normalize;
mod weather_api;

#[cfg(test)]
pub(crate) mod fake;

pub use http::{backoff, HttpGet, HttpResponse, ReqwestHttp, RetryingHttpFetcher, MAX_ATTEMPTS, REQUEST_TIMEOUT};
pub use normalize::normalize;
pub use weather_api::{WeatherApiClient, DEFAULT_BASE_URL};
