//! Aggregated forecast snapshot models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::sample::HourlySample;

/// All hourly samples belonging to one contiguous calendar-day run,
/// in original chronological order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    /// Calendar date shared by every sample in `hours`
    pub date: NaiveDate,
    /// Hourly samples for this day, timestamp ascending
    pub hours: Vec<HourlySample>,
}

impl DailyForecast {
    /// Minimum and maximum temperature of the day, `None` for an empty day
    #[must_use]
    pub fn temperature_range(&self) -> Option<(f32, f32)> {
        let mut hours = self.hours.iter();
        let first = hours.next()?.temperature_celsius;
        Some(hours.fold((first, first), |(min, max), sample| {
            (
                min.min(sample.temperature_celsius),
                max.max(sample.temperature_celsius),
            )
        }))
    }
}

/// The aggregated forecast a presenter binds to: the current sample plus
/// per-day buckets in first-seen date order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// First sample of the original series
    pub current: HourlySample,
    /// Daily buckets, date ascending as delivered by the source
    pub days: Vec<DailyForecast>,
}

impl WeatherSnapshot {
    /// Samples of the first day in the snapshot
    #[must_use]
    pub fn today(&self) -> &[HourlySample] {
        self.days.first().map_or(&[], |day| day.hours.as_slice())
    }

    /// Total number of hourly samples across all days
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.days.iter().map(|day| day.hours.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weather_code::classify;
    use chrono::NaiveDate;

    fn hour(day: u32, hour: u32, temp: f32) -> HourlySample {
        HourlySample {
            time: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            temperature_celsius: temp,
            category: classify(0),
        }
    }

    #[test]
    fn test_temperature_range() {
        let day = DailyForecast {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            hours: vec![hour(1, 0, 4.0), hour(1, 1, -2.5), hour(1, 2, 7.0)],
        };
        assert_eq!(day.temperature_range(), Some((-2.5, 7.0)));
    }

    #[test]
    fn test_temperature_range_empty_day() {
        let day = DailyForecast {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            hours: vec![],
        };
        assert_eq!(day.temperature_range(), None);
    }

    #[test]
    fn test_today_and_sample_count() {
        let snapshot = WeatherSnapshot {
            current: hour(1, 0, 4.0),
            days: vec![
                DailyForecast {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    hours: vec![hour(1, 0, 4.0), hour(1, 1, 5.0)],
                },
                DailyForecast {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    hours: vec![hour(2, 0, 6.0)],
                },
            ],
        };
        assert_eq!(snapshot.today().len(), 2);
        assert_eq!(snapshot.sample_count(), 3);
    }
}
