//! Hourly weather sample and display methods

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::weather_code::WeatherCategory;

/// One classified hourly forecast sample.
///
/// Timestamps are civil date-times: they are interpreted in the timezone the
/// data source already localized them to and carry no offset of their own.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlySample {
    /// Civil timestamp of this sample
    pub time: NaiveDateTime,
    /// Temperature in Celsius
    pub temperature_celsius: f32,
    /// Display category derived from the WMO weather code
    pub category: WeatherCategory,
}

impl HourlySample {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature_celsius)
    }

    /// Format the hour of day for display ("14:00")
    #[must_use]
    pub fn format_hour(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}
