//! Skycast - hourly weather forecasts for the terminal and web
//!
//! This library turns Open-Meteo hourly forecast responses into classified,
//! per-day weather snapshots: WMO weather codes become display categories,
//! and the flat hourly series becomes calendar-day buckets with a
//! well-defined current sample.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod forecast_service;
pub mod location_resolver;
pub mod models;
pub mod open_meteo;
pub mod presenter;
pub mod solar;
pub mod web;

// Re-export core types for public API
pub use config::SkycastConfig;
pub use error::SkycastError;
pub use forecast::{ForecastError, aggregate};
pub use forecast_service::ForecastService;
pub use location_resolver::{LocationInput, LocationResolver};
pub use models::{
    DailyForecast, HourlySample, IconKey, Location, WeatherCategory, WeatherSnapshot, classify,
};
pub use open_meteo::{HourlySeries, OpenMeteoClient, WeatherDataSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
