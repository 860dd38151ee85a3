//! Open-Meteo API client
//!
//! HTTP client for the Open-Meteo forecast and geocoding APIs (no API key
//! required), with retry middleware, timeout and error handling. The forecast
//! endpoint is asked for the hourly `temperature_2m` and `weather_code`
//! variables with `timezone=auto`, so timestamps arrive already localized to
//! the forecast location.

use std::time::Duration;

use crate::SkycastError;
use crate::config::SkycastConfig;
use crate::models::Location;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// The three parallel hourly series a forecast response boils down to.
///
/// Index-aligned by construction of the API response; the aggregator still
/// verifies the shape before using them.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    /// Civil timestamps, localized to the forecast location
    pub times: Vec<NaiveDateTime>,
    /// Temperatures in Celsius
    pub temperatures: Vec<f32>,
    /// WMO weather codes
    pub codes: Vec<u16>,
}

/// Narrow interface the rest of the application consumes forecasts through.
/// Lets tests substitute a fixture source for the real API.
#[async_trait]
pub trait WeatherDataSource: Send + Sync {
    /// Fetch the hourly forecast series for a location.
    async fn hourly_series(&self, location: &Location, days: u32) -> Result<HourlySeries>;
}

/// Client for the Open-Meteo forecast and geocoding APIs
pub struct OpenMeteoClient {
    http: ClientWithMiddleware,
    base_url: String,
    geocoding_url: String,
}

impl OpenMeteoClient {
    /// Create a new client with timeout and retry policy from config
    pub fn new(config: &SkycastConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("skycast/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.weather.max_retries);
        let http = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            http,
            base_url: config.weather.base_url.clone(),
            geocoding_url: config.weather.geocoding_url.clone(),
        })
    }

    /// Geocode a location name via the Open-Meteo geocoding API.
    /// Returns up to five candidate locations, best match first.
    #[instrument(skip(self))]
    pub async fn geocode(&self, location_name: &str) -> Result<Vec<Location>> {
        let url = format!(
            "{}/search?name={}&count=5&language=en&format=json",
            self.geocoding_url,
            urlencoding::encode(location_name)
        );
        debug!("Geocoding request URL: {}", url);

        let response = self.http.get(url).send().await?;
        let geocoding: GeocodingResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Open-Meteo geocoding response")?;

        let locations: Vec<Location> = geocoding
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Location::from)
            .collect();

        info!(
            "Geocoded '{}' to {} result(s)",
            location_name,
            locations.len()
        );
        Ok(locations)
    }

    /// Fetch the raw hourly forecast for a location.
    #[instrument(skip(self, location), fields(lat = location.latitude, lon = location.longitude))]
    async fn fetch_forecast(&self, location: &Location, days: u32) -> Result<ForecastResponse> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly=temperature_2m,weather_code&timezone=auto&forecast_days={}",
            self.base_url, location.latitude, location.longitude, days
        );
        debug!("Forecast request URL: {}", url);

        let response = self.http.get(url).send().await?;
        let forecast: ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Open-Meteo forecast response")?;
        Ok(forecast)
    }
}

#[async_trait]
impl WeatherDataSource for OpenMeteoClient {
    async fn hourly_series(&self, location: &Location, days: u32) -> Result<HourlySeries> {
        let forecast = self.fetch_forecast(location, days).await?;

        let hourly = forecast.hourly.ok_or_else(|| {
            SkycastError::api("No hourly data in Open-Meteo forecast response")
        })?;
        let series = HourlySeries::try_from(hourly)?;

        info!(
            "Fetched {} hourly samples for {}",
            series.times.len(),
            location.name
        );
        Ok(series)
    }
}

impl TryFrom<HourlyData> for HourlySeries {
    type Error = anyhow::Error;

    fn try_from(hourly: HourlyData) -> Result<Self> {
        let times = hourly
            .time
            .iter()
            .map(|t| {
                NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M")
                    .with_context(|| format!("Invalid timestamp in forecast response: {t}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(HourlySeries {
            times,
            temperatures: hourly.temperature_2m,
            codes: hourly.weather_code,
        })
    }
}

/// Forecast response from Open-Meteo
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyData>,
}

/// Hourly block of an Open-Meteo forecast response
#[derive(Debug, Deserialize)]
struct HourlyData {
    time: Vec<String>,
    temperature_2m: Vec<f32>,
    weather_code: Vec<u16>,
}

/// Geocoding response from Open-Meteo
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location {
            latitude: result.latitude,
            longitude: result.longitude,
            name: result.name,
            country: result.country,
        }
    }
}
