//! Forecast service
//!
//! Orchestrates one forecast request end to end: cache lookup, fetch from the
//! weather data source, aggregation into a snapshot, cache store. Shared by
//! the terminal and web presenters.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, instrument};

use crate::SkycastError;
use crate::cache;
use crate::config::SkycastConfig;
use crate::forecast;
use crate::models::{Location, WeatherSnapshot};
use crate::open_meteo::WeatherDataSource;

/// Produces [`WeatherSnapshot`]s for resolved locations
pub struct ForecastService<'a> {
    source: &'a dyn WeatherDataSource,
    config: &'a SkycastConfig,
    use_cache: bool,
}

impl<'a> ForecastService<'a> {
    /// Create a service on top of a data source
    #[must_use]
    pub fn new(source: &'a dyn WeatherDataSource, config: &'a SkycastConfig) -> Self {
        Self {
            source,
            config,
            use_cache: true,
        }
    }

    /// Disable the forecast cache for this service instance
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    /// Fetch and aggregate the forecast for a location
    #[instrument(skip(self, location), fields(location = %location.name))]
    pub async fn snapshot_for(&self, location: &Location) -> Result<WeatherSnapshot> {
        let days = self.config.defaults.forecast_days;
        let key = location.cache_key(days as usize);

        if self.cache_enabled() {
            if let Some(snapshot) = cache::get::<WeatherSnapshot>(&key).await? {
                debug!("Serving forecast from cache");
                return Ok(snapshot);
            }
        }

        let series = self.source.hourly_series(location, days).await?;
        let snapshot = forecast::aggregate(&series.times, &series.temperatures, &series.codes)
            .map_err(|e| SkycastError::api(format!("Unusable forecast data: {e}")))?;

        info!(
            "Aggregated {} samples into {} day(s)",
            snapshot.sample_count(),
            snapshot.days.len()
        );

        if self.cache_enabled() {
            let ttl = Duration::from_secs(u64::from(self.config.cache.ttl_minutes) * 60);
            cache::put(&key, snapshot.clone(), cache::jittered(ttl)).await?;
        }

        Ok(snapshot)
    }

    fn cache_enabled(&self) -> bool {
        self.use_cache && cache::is_initialized()
    }
}
