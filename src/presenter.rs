//! Terminal presenter
//!
//! Renders an aggregated [`WeatherSnapshot`] as text: a current-conditions
//! banner followed by one section per forecast day. Errors render as a
//! single-line banner built from the user-facing error message.

use chrono::Datelike;

use crate::SkycastError;
use crate::models::{IconKey, Location, WeatherSnapshot};
use crate::solar;

/// Terminal glyph for an icon key
#[must_use]
pub fn glyph(icon: IconKey) -> &'static str {
    match icon {
        IconKey::Sunny => "☀",
        IconKey::SunnyWithClouds => "⛅",
        IconKey::VeryCloudy => "☁",
        IconKey::Rainy => "🌧",
        IconKey::CloudyWithSnow => "🌨",
        IconKey::Snowy => "❄",
        IconKey::HeavySnow => "❄❄",
        IconKey::RainWithThunder => "⛈",
    }
}

/// Render a full snapshot for the terminal
#[must_use]
pub fn render_snapshot(location: &Location, snapshot: &WeatherSnapshot) -> String {
    let mut out = String::new();

    match &location.country {
        Some(country) => {
            out.push_str(&format!("Weather for {} ({})\n", location.name, country));
        }
        None => out.push_str(&format!("Weather for {}\n", location.name)),
    }

    let current = &snapshot.current;
    out.push_str(&format!(
        "Now: {} {} {}\n",
        current.format_temperature(),
        glyph(current.category.icon()),
        current.category.description()
    ));

    for day in &snapshot.days {
        out.push('\n');
        out.push_str(&format!("{} {}", day.date.weekday(), day.date));

        if let Some((min, max)) = day.temperature_range() {
            out.push_str(&format!("  ({min:.1}°C … {max:.1}°C)"));
        }
        if let Ok((sunrise, sunset)) = solar::sunrise_sunset(location, day.date) {
            out.push_str(&format!(
                "  ↑{} ↓{} UTC",
                sunrise.format("%H:%M"),
                sunset.format("%H:%M")
            ));
        }
        out.push('\n');

        for sample in &day.hours {
            out.push_str(&format!(
                "  {}  {:>7}  {} {}\n",
                sample.format_hour(),
                sample.format_temperature(),
                glyph(sample.category.icon()),
                sample.category.description()
            ));
        }
    }

    out
}

/// One-line error banner for the terminal
#[must_use]
pub fn error_banner(err: &anyhow::Error) -> String {
    let message = err
        .downcast_ref::<SkycastError>()
        .map_or_else(|| err.to_string(), SkycastError::user_message);
    format!("⚠  {message}")
}
