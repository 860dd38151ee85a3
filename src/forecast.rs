//! Hourly series aggregation
//!
//! Turns the three parallel series delivered by the weather data source
//! (civil timestamps, Celsius temperatures, WMO codes) into a
//! [`WeatherSnapshot`]: every sample classified, samples bucketed into
//! contiguous calendar-day runs, the first sample promoted to "current".
//!
//! The aggregator trusts the caller's ordering. It never sorts, merges or
//! drops samples, so a date that reappears in a non-contiguous run becomes a
//! second bucket — an anomaly in the input stays visible in the output.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::{DailyForecast, HourlySample, WeatherSnapshot, weather_code};

/// Failures of [`aggregate`]. Both are caller errors; neither is retried.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ForecastError {
    /// The three input series must be index-aligned
    #[error(
        "input series lengths disagree: {times} timestamps, {temperatures} temperatures, {codes} codes"
    )]
    ShapeMismatch {
        times: usize,
        temperatures: usize,
        codes: usize,
    },

    /// No samples, so no "current" sample can be derived
    #[error("empty forecast series")]
    EmptySeries,
}

/// Aggregate parallel hourly series into a [`WeatherSnapshot`].
///
/// Grouping uses the civil timestamp exactly as supplied; the data source is
/// expected to deliver timestamps already localized to the forecast location.
pub fn aggregate(
    times: &[NaiveDateTime],
    temperatures: &[f32],
    codes: &[u16],
) -> Result<WeatherSnapshot, ForecastError> {
    if times.len() != temperatures.len() || times.len() != codes.len() {
        return Err(ForecastError::ShapeMismatch {
            times: times.len(),
            temperatures: temperatures.len(),
            codes: codes.len(),
        });
    }
    if times.is_empty() {
        return Err(ForecastError::EmptySeries);
    }

    let mut days: Vec<DailyForecast> = Vec::new();
    for ((&time, &temperature_celsius), &code) in times.iter().zip(temperatures).zip(codes) {
        let sample = HourlySample {
            time,
            temperature_celsius,
            category: weather_code::classify(code),
        };
        match days.last_mut() {
            // Extend the current run only while the date is unchanged.
            Some(day) if day.date == time.date() => day.hours.push(sample),
            _ => days.push(DailyForecast {
                date: time.date(),
                hours: vec![sample],
            }),
        }
    }

    let current = days[0].hours[0].clone();
    Ok(WeatherSnapshot { current, days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherCategory;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn groups_contiguous_days_and_picks_first_sample_as_current() {
        let times = [ts(2024, 1, 1, 0), ts(2024, 1, 1, 1), ts(2024, 1, 2, 0)];
        let temps = [10.0, 9.5, 8.0];
        let codes = [0, 3, 61];

        let snapshot = aggregate(&times, &temps, &codes).unwrap();

        assert_eq!(snapshot.days.len(), 2);
        assert_eq!(snapshot.days[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(snapshot.days[0].hours.len(), 2);
        assert_eq!(snapshot.days[0].hours[0].category, WeatherCategory::ClearSky);
        assert_eq!(snapshot.days[0].hours[1].category, WeatherCategory::Overcast);
        assert_eq!(snapshot.days[1].hours.len(), 1);
        assert_eq!(snapshot.days[1].hours[0].category, WeatherCategory::SlightRain);

        assert_eq!(snapshot.current.temperature_celsius, 10.0);
        assert_eq!(snapshot.current.category, WeatherCategory::ClearSky);
    }

    #[test]
    fn mismatched_lengths_fail_with_shape_mismatch() {
        let times = [ts(2024, 1, 1, 0), ts(2024, 1, 1, 1), ts(2024, 1, 1, 2)];
        let temps = [10.0, 9.5];
        let codes = [0, 3, 61];

        let err = aggregate(&times, &temps, &codes).unwrap_err();
        assert_eq!(
            err,
            ForecastError::ShapeMismatch {
                times: 3,
                temperatures: 2,
                codes: 3,
            }
        );
    }

    #[test]
    fn empty_series_fails() {
        assert_eq!(aggregate(&[], &[], &[]).unwrap_err(), ForecastError::EmptySeries);
    }

    #[test]
    fn concatenated_days_reproduce_the_input_order_exactly() {
        let times: Vec<_> = (0u32..48)
            .map(|i| ts(2024, 3, 1 + i / 24, i % 24))
            .collect();
        let temps: Vec<f32> = (0u32..48).map(|i| i as f32 * 0.5).collect();
        let codes: Vec<u16> = (0u16..48).map(|i| if i % 2 == 0 { 0 } else { 61 }).collect();

        let snapshot = aggregate(&times, &temps, &codes).unwrap();

        let flattened: Vec<_> = snapshot.days.iter().flat_map(|d| d.hours.iter()).collect();
        assert_eq!(flattened.len(), 48);
        for (i, sample) in flattened.iter().enumerate() {
            assert_eq!(sample.time, times[i]);
            assert_eq!(sample.temperature_celsius, temps[i]);
            assert_eq!(sample.category, weather_code::classify(codes[i]));
        }
    }

    #[test]
    fn non_contiguous_repeat_of_a_date_stays_two_buckets() {
        // A timezone rollover glitch in the input: day 1 reappears after day 2.
        let times = [ts(2024, 1, 1, 22), ts(2024, 1, 2, 0), ts(2024, 1, 1, 23)];
        let temps = [1.0, 2.0, 3.0];
        let codes = [0, 0, 0];

        let snapshot = aggregate(&times, &temps, &codes).unwrap();

        assert_eq!(snapshot.days.len(), 3);
        assert_eq!(snapshot.days[0].date, snapshot.days[2].date);
        assert_eq!(snapshot.days[2].hours[0].temperature_celsius, 3.0);
    }

    #[test]
    fn single_sample_series() {
        let snapshot = aggregate(&[ts(2024, 6, 15, 12)], &[21.5], &[2]).unwrap();
        assert_eq!(snapshot.days.len(), 1);
        assert_eq!(snapshot.current.category, WeatherCategory::PartlyCloudy);
        assert_eq!(snapshot.sample_count(), 1);
    }
}
