//! Data models for the Skycast application
//!
//! Core domain models organized by concern:
//! - Location: geographic coordinates and metadata
//! - Weather code: WMO code classification into display categories
//! - Sample: one classified hourly forecast value
//! - Snapshot: per-day buckets plus the current sample

pub mod location;
pub mod sample;
pub mod snapshot;
pub mod weather_code;

// Re-export all public types for convenient access
pub use location::Location;
pub use sample::HourlySample;
pub use snapshot::{DailyForecast, WeatherSnapshot};
pub use weather_code::{IconKey, WeatherCategory, classify};
