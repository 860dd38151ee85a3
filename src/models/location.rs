//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Location name (city, region, etc.)
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
        }
    }

    /// Create location with country
    #[must_use]
    pub fn with_country(latitude: f64, longitude: f64, name: String, country: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: Some(country),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Round coordinates for cache key generation
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }

    /// Generate cache key for forecasts at this location
    #[must_use]
    pub fn cache_key(&self, days: usize) -> String {
        let (lat, lon) = self.rounded_coordinates(2);
        format!("forecast:{lat:.2}:{lon:.2}:{days}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_rounds_coordinates_and_carries_the_day_count() {
        let location = Location::new(64.1466, -21.9426, "Reykjavik".to_string());
        assert_eq!(location.cache_key(7), "forecast:64.15:-21.94:7");
        assert_eq!(location.cache_key(3), "forecast:64.15:-21.94:3");
    }

    #[test]
    fn nearby_points_share_a_cache_key() {
        // Two fixes a few hundred meters apart round to the same key.
        let a = Location::new(64.1466, -21.9426, "Reykjavik".to_string());
        let b = Location::new(64.1491, -21.9422, "Reykjavik harbour".to_string());
        assert_eq!(a.cache_key(7), b.cache_key(7));
    }

    #[test]
    fn rounding_respects_the_requested_precision() {
        let location = Location::new(69.649_66, 18.955_24, "Tromsø".to_string());
        assert_eq!(location.rounded_coordinates(2), (69.65, 18.96));
        assert_eq!(location.rounded_coordinates(0), (70.0, 19.0));
    }

    #[test]
    fn coordinates_format_with_four_decimals() {
        let location = Location::new(52.52, 13.405, "Berlin".to_string());
        assert_eq!(location.format_coordinates(), "52.5200, 13.4050");
    }
}
