//! Forecast relay - hourly weather forecasts over a durable message stream

use anyhow::Result;
use clap::Parser;
use forecast_relay::config::{self, RelayConfig};
use forecast_relay::stream::JetStreamTransport;
use forecast_relay::upstream::{ReqwestHttp, WeatherApiClient};
use forecast_relay::{ForecastReader, PublishPipeline};
use std::time::Duration;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let cli = Cli::parse();

    match cli.command {
        Commands::Publish { config: config_path, interval_secs } => {
            log::info!("Loading configuration from {:?}...", config_path);
            let cfg = config::load_config(&config_path)?;

            match interval_secs {
                None => publish_once(&cfg).await?,
                Some(secs) => publish_every(&cfg, Duration::from_secs(secs)).await?,
            }
        }

        Commands::Read { config: config_path, cities } => {
            let cfg = config::load_config(&config_path)?;
            let keys = if cities.is_empty() { cfg.reader.cities.clone() } else { cities };

            let reader = ForecastReader::connect(&cfg.stream.url).await;
            let forecasts = reader.read(&keys).await;
            reader.close().await;

            println!("{}", serde_json::to_string_pretty(&forecasts)?);
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Weather API: {}", cfg.weather_api.base_url);
                    println!(
                        "  API key: {}",
                        if cfg.weather_api.api_key.is_some() { "set" } else { "NOT SET" }
                    );
                    println!("  Stream: {}", cfg.stream.url);
                    println!("  Cities: {}", cfg.cities.len());
                    for city in &cfg.cities {
                        println!("    - {} -> weather.{}", city.name, city.key);
                    }
                    println!("  Reader cities: {}", cfg.reader.cities.join(", "));
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../forecast-relay.example.yaml");

            let path = "forecast-relay.yaml";
            if std::path::Path::new(path).exists() {
                println!("forecast-relay.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created forecast-relay.yaml with example configuration.");
            }
        }
    }

    Ok(())
}

/// One producer run on a fresh connection
async fn publish_once(cfg: &RelayConfig) -> Result<()> {
    // A missing API key surfaces before any network call; the city list was validated on load
    let api = WeatherApiClient::new(
        cfg.weather_api.api_key.as_deref(),
        &cfg.weather_api.base_url,
        ReqwestHttp::new(),
    )?;

    let transport = JetStreamTransport::connect(&cfg.stream.url).await?;
    PublishPipeline::new(api, transport, cfg.cities.clone())?.run().await?;
    Ok(())
}

/// Producer runs every `interval` until Ctrl+C. Failed runs are logged, not fatal.
async fn publish_every(cfg: &RelayConfig, interval: Duration) -> Result<()> {
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);
    ctrlc::set_handler(move || {
        log::info!("Received Ctrl+C, stopping after the current run...");
        let _ = shutdown_tx.send(true);
    })?;

    log::info!("Publishing every {:?}", interval);
    loop {
        if let Err(e) = publish_once(cfg).await {
            log::error!("publish run failed: {:#}", e);
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown_rx.changed() => break,
        }
    }

    Ok(())
}
