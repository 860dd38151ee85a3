//! JSON API for the web presenter
//!
//! A single endpoint, `GET /forecast`, taking either a `location` query
//! parameter (place name or "lat,lon") or explicit `lat`/`lon` parameters,
//! and returning the aggregated snapshot as JSON DTOs.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::SkycastError;
use crate::config::SkycastConfig;
use crate::forecast_service::ForecastService;
use crate::location_resolver::{LocationInput, LocationResolver};
use crate::models::{DailyForecast, HourlySample, Location, WeatherSnapshot};
use crate::open_meteo::OpenMeteoClient;
use crate::solar;

/// Shared state of the web presenter
pub struct AppState {
    pub config: SkycastConfig,
    pub client: OpenMeteoClient,
}

#[derive(Serialize, Deserialize)]
pub struct ApiLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiHour {
    pub time: String,
    pub temperature_celsius: f32,
    pub description: String,
    pub icon: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApiDay {
    pub date: String,
    pub temperature_min: Option<f32>,
    pub temperature_max: Option<f32>,
    pub sunrise_utc: Option<String>,
    pub sunset_utc: Option<String>,
    pub hours: Vec<ApiHour>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiSnapshot {
    pub location: ApiLocation,
    pub current: ApiHour,
    pub days: Vec<ApiDay>,
}

impl From<&Location> for ApiLocation {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            name: location.name.clone(),
            country: location.country.clone(),
        }
    }
}

impl From<&HourlySample> for ApiHour {
    fn from(sample: &HourlySample) -> Self {
        Self {
            time: sample.time.format("%Y-%m-%dT%H:%M").to_string(),
            temperature_celsius: sample.temperature_celsius,
            description: sample.category.description().to_string(),
            icon: sample.category.icon().asset_name().to_string(),
        }
    }
}

impl ApiDay {
    fn build(location: &Location, day: &DailyForecast) -> Self {
        let (temperature_min, temperature_max) = match day.temperature_range() {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        };
        let (sunrise_utc, sunset_utc) = match solar::sunrise_sunset(location, day.date) {
            Ok((sunrise, sunset)) => (
                Some(sunrise.format("%H:%M").to_string()),
                Some(sunset.format("%H:%M").to_string()),
            ),
            Err(_) => (None, None),
        };

        Self {
            date: day.date.to_string(),
            temperature_min,
            temperature_max,
            sunrise_utc,
            sunset_utc,
            hours: day.hours.iter().map(ApiHour::from).collect(),
        }
    }
}

impl ApiSnapshot {
    /// Map a domain snapshot to the wire shape
    #[must_use]
    pub fn build(location: &Location, snapshot: &WeatherSnapshot) -> Self {
        Self {
            location: ApiLocation::from(location),
            current: ApiHour::from(&snapshot.current),
            days: snapshot
                .days
                .iter()
                .map(|day| ApiDay::build(location, day))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    location: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/forecast", get(get_forecast))
        .with_state(state)
}

async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<ApiSnapshot>, (StatusCode, String)> {
    let input = match (params.location, params.lat, params.lon) {
        (_, Some(lat), Some(lon)) => LocationInput::Coordinates(lat, lon),
        (Some(location), _, _) => {
            LocationInput::parse(&location).map_err(|e| error_response(&e))?
        }
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Missing query parameters: either location or lat and lon".to_string(),
            ));
        }
    };

    let location = LocationResolver::resolve(&state.client, input)
        .await
        .map_err(|e| error_response(&e))?;

    let service = ForecastService::new(&state.client, &state.config);
    let snapshot = service
        .snapshot_for(&location)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(ApiSnapshot::build(&location, &snapshot)))
}

fn error_response(err: &anyhow::Error) -> (StatusCode, String) {
    match err.downcast_ref::<SkycastError>() {
        Some(e @ SkycastError::Validation { .. }) => (StatusCode::BAD_REQUEST, e.user_message()),
        Some(e @ SkycastError::NotFound { .. }) => (StatusCode::NOT_FOUND, e.user_message()),
        Some(e) => (StatusCode::BAD_GATEWAY, e.user_message()),
        None => (StatusCode::BAD_GATEWAY, err.to_string()),
    }
}
