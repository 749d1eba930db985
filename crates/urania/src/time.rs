//! Civil time to Universal Time Julian Day conversion.
//!
//! Every calculation in the crate runs on a [`JulianDay`] in UT. Local birth
//! times are resolved through the IANA timezone database; an unknown birth
//! time is pinned to 12:00 UTC of the civil date so that repeated
//! calculations stay consistent.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000: f64 = 2_451_545.0;

/// How far back a skipped wall-clock time looks for the offset before the gap.
const MAX_GAP_HOURS: i64 = 48;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// A Julian Day number on the Universal Time scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDay(pub f64);

impl JulianDay {
    /// Gregorian calendar date plus decimal hour (UT) to Julian Day.
    pub fn from_calendar(year: i32, month: u32, day: u32, hour: f64) -> Self {
        let (y, m) = if month <= 2 {
            (year - 1, month + 12)
        } else {
            (year, month)
        };
        let a = (y as f64 / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();
        let jd = (365.25 * (y as f64 + 4716.0)).floor()
            + (30.6001 * (m as f64 + 1.0)).floor()
            + day as f64
            + b
            - 1524.5
            + hour / 24.0;
        JulianDay(jd)
    }

    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        let seconds = dt.second() as f64 + dt.nanosecond() as f64 * 1e-9;
        let hour = dt.hour() as f64 + dt.minute() as f64 / 60.0 + seconds / 3600.0;
        Self::from_calendar(dt.year(), dt.month(), dt.day(), hour)
    }

    /// Inverse of [`JulianDay::from_utc`], rounded to the millisecond.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let shifted = self.0 + 0.5;
        let z = shifted.floor();
        let fraction = shifted - z;
        let a = if z < 2_299_161.0 {
            z
        } else {
            let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
            z + 1.0 + alpha - (alpha / 4.0).floor()
        };
        let b = a + 1524.0;
        let c = ((b - 122.1) / 365.25).floor();
        let d = (365.25 * c).floor();
        let e = ((b - d) / 30.6001).floor();

        let day = (b - d - (30.6001 * e).floor()) as u32;
        let month = (if e < 14.0 { e - 1.0 } else { e - 13.0 }) as u32;
        let year = (if month > 2 { c - 4716.0 } else { c - 4715.0 }) as i32;

        let millis = (fraction * 86_400_000.0).round() as i64;
        let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
        Some(Utc.from_utc_datetime(&(midnight + Duration::milliseconds(millis))))
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries_since_j2000(self) -> f64 {
        (self.0 - J2000) / DAYS_PER_CENTURY
    }
}

/// Birth time of day. `Unknown` is a real state, not a default hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirthTime {
    Known(NaiveTime),
    Unknown,
}

impl BirthTime {
    pub fn is_known(&self) -> bool {
        matches!(self, BirthTime::Known(_))
    }

    pub fn known(&self) -> Option<NaiveTime> {
        match self {
            BirthTime::Known(t) => Some(*t),
            BirthTime::Unknown => None,
        }
    }
}

impl From<Option<NaiveTime>> for BirthTime {
    fn from(value: Option<NaiveTime>) -> Self {
        value.map_or(BirthTime::Unknown, BirthTime::Known)
    }
}

/// Parse an IANA timezone identifier such as `Europe/Moscow`.
pub fn parse_timezone(timezone: &str) -> Result<Tz, ConfigError> {
    timezone
        .trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::InvalidTimezone {
            timezone: timezone.to_string(),
        })
}

/// Resolve a wall-clock time in `tz` to a UTC instant.
///
/// Ambiguous times take the earliest instant. A time skipped by a transition
/// is read with the UTC offset in force just before the gap, which lands it
/// past the gap by the gap's length (02:30 in a one-hour spring gap is 03:30).
pub fn resolve_local(tz: &Tz, local: NaiveDateTime) -> Result<DateTime<Utc>, ConfigError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let before = (1..=MAX_GAP_HOURS)
                .find_map(|h| tz.from_local_datetime(&(local - Duration::hours(h))).latest())
                .ok_or_else(|| ConfigError::NonexistentLocalTime {
                    local: local.to_string(),
                    timezone: tz.name().to_string(),
                })?;
            let offset = i64::from(before.offset().fix().local_minus_utc());
            Ok(Utc.from_utc_datetime(&(local - Duration::seconds(offset))))
        }
    }
}

/// Convert a civil birth date and optional time to a UT Julian Day.
///
/// The timezone is validated even when the time is unknown.
pub fn to_julian_day_ut(
    date: NaiveDate,
    time: BirthTime,
    timezone: &str,
) -> Result<JulianDay, ConfigError> {
    let tz = parse_timezone(timezone)?;
    let jd = match time {
        BirthTime::Known(t) => JulianDay::from_utc(resolve_local(&tz, date.and_time(t))?),
        BirthTime::Unknown => JulianDay::from_calendar(date.year(), date.month(), date.day(), 12.0),
    };
    Ok(jd)
}

/// Julian Day of local noon on `date` in `timezone`.
pub fn local_noon_julian_day(date: NaiveDate, timezone: &str) -> Result<JulianDay, ConfigError> {
    to_julian_day_ut(date, BirthTime::Known(noon()), timezone)
}

pub(crate) fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}
