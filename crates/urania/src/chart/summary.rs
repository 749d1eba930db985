//! Lightweight Sun / Moon / Ascendant summary for display contexts.
//!
//! Unlike the full chart this path tolerates a failing ephemeris: the Sun is
//! then estimated from the day of the year and everything else is left out.

use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::chart::validate_coordinates;
use crate::ephemeris::types::Body;
use crate::ephemeris::Ephemeris;
use crate::error::{CalculationError, ChartError};
use crate::time::{to_julian_day_ut, BirthTime, JulianDay};
use crate::zodiac::Placement;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NatalSummary {
    pub sun: Placement,
    pub moon: Option<Placement>,
    pub ascendant: Option<Placement>,
    pub time_known: bool,
    /// The Sun was estimated from the calendar date.
    pub approximate: bool,
}

/// Rough solar longitude from the day of the year, with day 80 as 0° Aries.
pub fn approximate_sun_longitude(date: NaiveDate) -> f64 {
    let day_of_year = date.ordinal() as f64;
    (day_of_year - 80.0).rem_euclid(365.0) * (360.0 / 365.0)
}

fn exact_summary(
    ephemeris: &Ephemeris,
    julian_day: JulianDay,
    birth_time: BirthTime,
    latitude: f64,
    longitude: f64,
) -> Result<NatalSummary, CalculationError> {
    let sun = ephemeris.position(Body::Sun, julian_day)?;
    let moon = ephemeris.position(Body::Moon, julian_day)?;
    let ascendant = match birth_time {
        BirthTime::Known(_) => Some(ephemeris.houses(julian_day, latitude, longitude)?.ascendant),
        BirthTime::Unknown => None,
    };
    Ok(NatalSummary {
        sun: Placement::from_longitude(sun),
        moon: Some(Placement::from_longitude(moon)),
        ascendant: ascendant.map(Placement::from_longitude),
        time_known: birth_time.is_known(),
        approximate: false,
    })
}

/// Sun, Moon and (with a known time) Ascendant.
///
/// Invalid timezone or coordinates still fail; a calculation failure
/// degrades to an approximate Sun with `time_known = false`.
pub fn compute_natal_summary(
    ephemeris: &Ephemeris,
    birth_date: NaiveDate,
    birth_time: BirthTime,
    latitude: f64,
    longitude: f64,
    timezone: &str,
) -> Result<NatalSummary, ChartError> {
    let julian_day = to_julian_day_ut(birth_date, birth_time, timezone)?;
    validate_coordinates(latitude, longitude)?;

    match exact_summary(ephemeris, julian_day, birth_time, latitude, longitude) {
        Ok(summary) => {
            debug!(
                "natal summary calculated: date={} time_known={} sun={} moon={}",
                birth_date,
                summary.time_known,
                summary.sun,
                summary.moon.map_or_else(|| "unknown".to_string(), |m| m.to_string())
            );
            Ok(summary)
        }
        Err(err) => {
            warn!(
                "natal summary for {} falls back to approximate sun: {}",
                birth_date, err
            );
            Ok(NatalSummary {
                sun: Placement::from_longitude(approximate_sun_longitude(birth_date)),
                moon: None,
                ascendant: None,
                time_known: false,
                approximate: true,
            })
        }
    }
}
