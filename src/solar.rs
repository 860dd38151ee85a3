//! Sunrise and sunset calculation

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::models::Location;

/// Sunrise and sunset for a location and date, as UTC instants.
///
/// Fails for invalid coordinates and for polar day/night, where the sun
/// never crosses the horizon; presenters omit the sunrise line in that case.
pub fn sunrise_sunset(
    location: &Location,
    date: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let coordinates =
        Coordinates::new(location.latitude, location.longitude).with_context(|| {
            format!(
                "Invalid coordinates: lat={}, lng={}",
                location.latitude, location.longitude
            )
        })?;

    let solar_day = SolarDay::new(coordinates, date);
    let sunrise = solar_day
        .event_time(SolarEvent::Sunrise)
        .with_context(|| format!("No sunrise at {} on {date}", location.name))?;
    let sunset = solar_day
        .event_time(SolarEvent::Sunset)
        .with_context(|| format!("No sunset at {} on {date}", location.name))?;

    Ok((sunrise, sunset))
}
