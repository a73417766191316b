//! Forecast relay - hourly weather forecasts over a durable message stream
//!
//! The publisher fetches each configured city's forecast from weatherapi.com
//! and publishes it on `weather.<city_key>`. The reader serves the latest
//! forecast per city, trimmed to the hours up to now, and falls back to an
//! empty placeholder whenever live data is unavailable.

pub mod config;
pub mod error;
pub mod forecast;
pub mod pipeline;
pub mod stream;
pub mod upstream;

pub use config::RelayConfig;
pub use forecast::{ForecastRecord, HourSample};
pub use pipeline::{ForecastReader, PublishPipeline};
