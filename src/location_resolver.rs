//! Location resolution
//!
//! Resolves user-supplied location inputs (place names or raw coordinates)
//! into structured [`Location`] values via the Open-Meteo geocoding API.
//! Resolved names are cached so repeated lookups skip the geocoding call.

use std::time::Duration;

use crate::SkycastError;
use crate::cache;
use crate::models::Location;
use crate::open_meteo::OpenMeteoClient;
use anyhow::Result;
use tracing::debug;

// Place names move rarely; geocoding entries outlive forecast entries by far.
const GEOCODE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// A location as the user supplied it
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Raw latitude/longitude
    Coordinates(f64, f64),
    /// Place name to geocode
    Name(String),
}

/// Reject coordinates outside the WGS84 range. Applied both when parsing
/// CLI input and when resolving, so raw web query parameters get the same
/// validation as parsed strings.
fn check_coordinate_range(lat: f64, lon: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(
            SkycastError::validation(format!("Latitude {lat} out of range (-90..90)")).into(),
        );
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(
            SkycastError::validation(format!("Longitude {lon} out of range (-180..180)")).into(),
        );
    }
    Ok(())
}

impl LocationInput {
    /// Parse a CLI argument: `"52.52,13.40"` becomes coordinates,
    /// anything else is treated as a place name.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SkycastError::validation("Location cannot be empty").into());
        }

        if let Some((lat, lon)) = trimmed.split_once(',') {
            if let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
                check_coordinate_range(lat, lon)?;
                return Ok(LocationInput::Coordinates(lat, lon));
            }
        }

        Ok(LocationInput::Name(trimmed.to_string()))
    }
}

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a location input into a structured [`Location`]
    pub async fn resolve(client: &OpenMeteoClient, input: LocationInput) -> Result<Location> {
        debug!("Resolving location input: {:?}", input);

        let location = match input {
            LocationInput::Coordinates(lat, lon) => {
                check_coordinate_range(lat, lon)?;
                // No reverse geocoding needed for a weather lookup; the
                // formatted coordinates serve as the display name.
                Location::new(lat, lon, format!("{lat:.4}, {lon:.4}"))
            }
            LocationInput::Name(name) => Self::resolve_name(client, &name).await?,
        };

        debug!(
            "Resolved location: {} at ({}, {})",
            location.name, location.latitude, location.longitude
        );
        Ok(location)
    }

    /// Resolve a place name to coordinates via geocoding, consulting the
    /// cache first.
    async fn resolve_name(client: &OpenMeteoClient, name: &str) -> Result<Location> {
        let key = geocode_cache_key(name);

        if cache::is_initialized() {
            if let Some(location) = cache::get::<Location>(&key).await? {
                debug!("Serving geocoding result from cache");
                return Ok(location);
            }
        }

        let mut results = client.geocode(name).await?;
        if results.is_empty() {
            return Err(SkycastError::not_found(format!("Location not found: {name}")).into());
        }

        // First result is the best match
        let location = results.remove(0);

        if cache::is_initialized() {
            cache::put(&key, location.clone(), cache::jittered(GEOCODE_TTL)).await?;
        }

        Ok(location)
    }
}

fn geocode_cache_key(name: &str) -> String {
    format!("geocode:{}", name.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkycastConfig;

    #[test]
    fn parses_coordinates() {
        let input = LocationInput::parse("52.52, 13.40").unwrap();
        assert_eq!(input, LocationInput::Coordinates(52.52, 13.40));
    }

    #[test]
    fn parses_name() {
        let input = LocationInput::parse("Berlin").unwrap();
        assert_eq!(input, LocationInput::Name("Berlin".to_string()));
    }

    #[test]
    fn comma_in_a_name_still_parses_as_name() {
        let input = LocationInput::parse("Gornau, Erzgebirge").unwrap();
        assert_eq!(input, LocationInput::Name("Gornau, Erzgebirge".to_string()));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(LocationInput::parse("   ").is_err());
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(LocationInput::parse("91.0,0.0").is_err());
        assert!(LocationInput::parse("0.0,181.0").is_err());
    }

    #[test]
    fn geocode_cache_key_normalizes_the_name() {
        assert_eq!(geocode_cache_key("  Berlin "), "geocode:berlin");
        assert_eq!(geocode_cache_key("BERLIN"), "geocode:berlin");
    }

    #[tokio::test]
    async fn coordinates_resolve_without_network() {
        let config = SkycastConfig::default();
        let client = OpenMeteoClient::new(&config).unwrap();
        let location =
            LocationResolver::resolve(&client, LocationInput::Coordinates(46.8182, 8.2275))
                .await
                .unwrap();
        assert_eq!(location.name, "46.8182, 8.2275");
    }

    #[tokio::test]
    async fn out_of_range_coordinates_fail_resolution() {
        // Raw web query parameters arrive as Coordinates without going
        // through parse, so resolve must enforce the range itself.
        let config = SkycastConfig::default();
        let client = OpenMeteoClient::new(&config).unwrap();
        let err = LocationResolver::resolve(&client, LocationInput::Coordinates(95.0, 200.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SkycastError>(),
            Some(SkycastError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn cached_geocoding_results_skip_the_network() {
        let cache_dir = std::env::temp_dir().join(format!(
            "skycast-geocode-test-{}",
            std::process::id()
        ));
        cache::init(&cache_dir).unwrap();

        let cached = Location::with_country(
            64.1466,
            -21.9426,
            "Reykjavik".to_string(),
            "Iceland".to_string(),
        );
        cache::put(
            &geocode_cache_key("Reykjavik"),
            cached.clone(),
            Duration::from_secs(600),
        )
        .await
        .unwrap();

        // The client points at the real API but is never reached on a hit.
        let config = SkycastConfig::default();
        let client = OpenMeteoClient::new(&config).unwrap();
        let location =
            LocationResolver::resolve(&client, LocationInput::Name("Reykjavik".to_string()))
                .await
                .unwrap();
        assert_eq!(location, cached);
    }
}
