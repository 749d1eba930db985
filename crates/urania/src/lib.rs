//! Natal chart and transit calculations.
//!
//! Birth data is normalised to a Universal Time Julian Day, positions come
//! from an [`Ephemeris`] handle, and aspects are found by the shared
//! [`AspectCalculator`].

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod service;
pub mod time;
pub mod zodiac;

use chrono::NaiveDate;

pub use aspects::{angular_separation, Aspect, AspectCalculator, AspectKind};
pub use chart::{
    compute_natal_summary, house_containing, Angles, BodyPosition, ChartPoint,
    DailyTransitResult, HouseCusp, HouseData, NatalCalculator, NatalChart, NatalHouse, NatalSummary,
    TransitAspect, TransitCalculator, TransitPosition,
};
pub use ephemeris::{
    AnalyticEphemeris, Body, EclipticMotion, Ephemeris, EphemerisBackend, GeoLocation,
    HouseFrame, HouseSystem,
};
pub use error::{CalculationError, ChartError, ConfigError};
pub use service::ChartService;
pub use time::{to_julian_day_ut, BirthTime, JulianDay};
pub use zodiac::{Placement, ZodiacSign};

/// Full natal chart: all bodies, and angles and houses when the time is known.
pub fn compute_full_natal_chart(
    ephemeris: &Ephemeris,
    birth_date: NaiveDate,
    birth_time: BirthTime,
    latitude: f64,
    longitude: f64,
    timezone: &str,
) -> Result<NatalChart, ChartError> {
    NatalCalculator::new(ephemeris).compute_full_natal_chart(
        birth_date, birth_time, latitude, longitude, timezone,
    )
}

/// Transits at local noon of `date` against a natal chart.
pub fn compute_daily_transits(
    ephemeris: &Ephemeris,
    natal: &NatalChart,
    date: NaiveDate,
    timezone: &str,
) -> Result<DailyTransitResult, ChartError> {
    TransitCalculator::new(ephemeris).compute_daily_transits(natal, date, timezone)
}
