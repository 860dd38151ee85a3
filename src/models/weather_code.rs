//! WMO weather code classification
//!
//! Maps the integer weather codes returned by Open-Meteo (WMO code table 4677)
//! to display categories. The mapping is data, not logic: it lives in a static
//! table so adding a code is a one-line change.

use serde::{Deserialize, Serialize};

/// Icon asset referenced by a weather category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconKey {
    Sunny,
    SunnyWithClouds,
    VeryCloudy,
    Rainy,
    CloudyWithSnow,
    Snowy,
    HeavySnow,
    RainWithThunder,
}

impl IconKey {
    /// Stable asset name used by presenters (file stem of the icon)
    #[must_use]
    pub fn asset_name(self) -> &'static str {
        match self {
            IconKey::Sunny => "sunny",
            IconKey::SunnyWithClouds => "sunny_with_clouds",
            IconKey::VeryCloudy => "very_cloudy",
            IconKey::Rainy => "rainy",
            IconKey::CloudyWithSnow => "cloudy_with_snow",
            IconKey::Snowy => "snowy",
            IconKey::HeavySnow => "heavy_snow",
            IconKey::RainWithThunder => "rain_with_thunder",
        }
    }
}

/// Weather display category derived from a WMO code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCategory {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Foggy,
    DepositingRimeFog,
    LightDrizzle,
    ModerateDrizzle,
    DenseDrizzle,
    LightFreezingDrizzle,
    DenseFreezingDrizzle,
    SlightRain,
    ModerateRain,
    HeavyRain,
    HeavyFreezingRain,
    SlightSnowFall,
    ModerateSnowFall,
    HeavySnowFall,
    SnowGrains,
    SlightRainShowers,
    ModerateRainShowers,
    ViolentRainShowers,
    SlightSnowShowers,
    HeavySnowShowers,
    ModerateThunderstorm,
    SlightHailThunderstorm,
    HeavyHailThunderstorm,
}

/// WMO code table. Codes 56 and 66 both read as light freezing drizzle.
const WMO_CODES: &[(u16, WeatherCategory)] = &[
    (0, WeatherCategory::ClearSky),
    (1, WeatherCategory::MainlyClear),
    (2, WeatherCategory::PartlyCloudy),
    (3, WeatherCategory::Overcast),
    (45, WeatherCategory::Foggy),
    (48, WeatherCategory::DepositingRimeFog),
    (51, WeatherCategory::LightDrizzle),
    (53, WeatherCategory::ModerateDrizzle),
    (55, WeatherCategory::DenseDrizzle),
    (56, WeatherCategory::LightFreezingDrizzle),
    (57, WeatherCategory::DenseFreezingDrizzle),
    (61, WeatherCategory::SlightRain),
    (63, WeatherCategory::ModerateRain),
    (65, WeatherCategory::HeavyRain),
    (66, WeatherCategory::LightFreezingDrizzle),
    (67, WeatherCategory::HeavyFreezingRain),
    (71, WeatherCategory::SlightSnowFall),
    (73, WeatherCategory::ModerateSnowFall),
    (75, WeatherCategory::HeavySnowFall),
    (77, WeatherCategory::SnowGrains),
    (80, WeatherCategory::SlightRainShowers),
    (81, WeatherCategory::ModerateRainShowers),
    (82, WeatherCategory::ViolentRainShowers),
    (85, WeatherCategory::SlightSnowShowers),
    (86, WeatherCategory::HeavySnowShowers),
    (95, WeatherCategory::ModerateThunderstorm),
    (96, WeatherCategory::SlightHailThunderstorm),
    (99, WeatherCategory::HeavyHailThunderstorm),
];

/// Classify a WMO weather code into a display category.
///
/// Total function: codes outside the table fall back to `ClearSky` rather
/// than failing — an unrecognized code is not an application error.
#[must_use]
pub fn classify(code: u16) -> WeatherCategory {
    WMO_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(WeatherCategory::ClearSky, |(_, category)| *category)
}

impl WeatherCategory {
    /// Human-readable description shown next to the icon
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            WeatherCategory::ClearSky => "Clear sky",
            WeatherCategory::MainlyClear => "Mainly clear",
            WeatherCategory::PartlyCloudy => "Partly cloudy",
            WeatherCategory::Overcast => "Overcast",
            WeatherCategory::Foggy => "Foggy",
            WeatherCategory::DepositingRimeFog => "Depositing rime fog",
            WeatherCategory::LightDrizzle => "Light drizzle",
            WeatherCategory::ModerateDrizzle => "Moderate drizzle",
            WeatherCategory::DenseDrizzle => "Dense drizzle",
            WeatherCategory::LightFreezingDrizzle => "Slight freezing drizzle",
            WeatherCategory::DenseFreezingDrizzle => "Dense freezing drizzle",
            WeatherCategory::SlightRain => "Slight rain",
            WeatherCategory::ModerateRain => "Rainy",
            WeatherCategory::HeavyRain => "Heavy rain",
            WeatherCategory::HeavyFreezingRain => "Heavy freezing rain",
            WeatherCategory::SlightSnowFall => "Slight snow fall",
            WeatherCategory::ModerateSnowFall => "Moderate snow fall",
            WeatherCategory::HeavySnowFall => "Heavy snow fall",
            WeatherCategory::SnowGrains => "Snow grains",
            WeatherCategory::SlightRainShowers => "Slight rain showers",
            WeatherCategory::ModerateRainShowers => "Moderate rain showers",
            WeatherCategory::ViolentRainShowers => "Violent rain showers",
            WeatherCategory::SlightSnowShowers => "Light snow showers",
            WeatherCategory::HeavySnowShowers => "Heavy snow showers",
            WeatherCategory::ModerateThunderstorm => "Moderate thunderstorm",
            WeatherCategory::SlightHailThunderstorm => "Thunderstorm with slight hail",
            WeatherCategory::HeavyHailThunderstorm => "Thunderstorm with heavy hail",
        }
    }

    /// Icon asset for this category
    #[must_use]
    pub fn icon(self) -> IconKey {
        match self {
            WeatherCategory::ClearSky | WeatherCategory::MainlyClear => IconKey::Sunny,
            WeatherCategory::PartlyCloudy | WeatherCategory::Overcast => IconKey::SunnyWithClouds,
            WeatherCategory::Foggy | WeatherCategory::DepositingRimeFog => IconKey::VeryCloudy,
            WeatherCategory::LightDrizzle
            | WeatherCategory::ModerateDrizzle
            | WeatherCategory::DenseDrizzle
            | WeatherCategory::SlightRain
            | WeatherCategory::ModerateRain
            | WeatherCategory::HeavyRain
            | WeatherCategory::SlightRainShowers
            | WeatherCategory::ModerateRainShowers
            | WeatherCategory::ViolentRainShowers => IconKey::Rainy,
            WeatherCategory::LightFreezingDrizzle
            | WeatherCategory::DenseFreezingDrizzle
            | WeatherCategory::HeavyFreezingRain => IconKey::CloudyWithSnow,
            WeatherCategory::SlightSnowFall
            | WeatherCategory::SlightSnowShowers
            | WeatherCategory::HeavySnowShowers => IconKey::Snowy,
            WeatherCategory::ModerateSnowFall
            | WeatherCategory::HeavySnowFall
            | WeatherCategory::SnowGrains => IconKey::HeavySnow,
            WeatherCategory::ModerateThunderstorm
            | WeatherCategory::SlightHailThunderstorm
            | WeatherCategory::HeavyHailThunderstorm => IconKey::RainWithThunder,
        }
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
