pub mod natal;
pub mod summary;
pub mod transit;

pub use natal::{Angles, HouseCusp, HouseData, NatalCalculator, NatalChart};
pub use summary::{approximate_sun_longitude, compute_natal_summary, NatalSummary};
pub use transit::{DailyTransitResult, NatalHouse, TransitAspect, TransitCalculator, TransitPosition};

use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{Body, EclipticMotion};
use crate::error::ConfigError;
use crate::zodiac::Placement;

/// Anything that can be placed on the chart wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartPoint {
    Body(Body),
    Ascendant,
    Midheaven,
}

impl ChartPoint {
    pub fn name_ru(self) -> &'static str {
        match self {
            ChartPoint::Body(body) => body.name_ru(),
            ChartPoint::Ascendant => "Асцендент",
            ChartPoint::Midheaven => "Середина неба",
        }
    }
}

impl From<Body> for ChartPoint {
    fn from(body: Body) -> Self {
        ChartPoint::Body(body)
    }
}

/// A body's placement plus its daily motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    pub placement: Placement,
    /// Degrees per day
    pub speed: f64,
    pub retrograde: bool,
}

impl BodyPosition {
    pub fn new(body: Body, motion: EclipticMotion) -> Self {
        Self {
            body,
            placement: Placement::from_longitude(motion.longitude),
            speed: motion.speed,
            retrograde: motion.is_retrograde(),
        }
    }

    pub fn longitude(&self) -> f64 {
        self.placement.longitude
    }
}

/// House (1-12) whose arc contains `longitude`.
///
/// Each arc runs from its cusp (inclusive) to the next cusp (exclusive); the
/// arc that crosses 0° Aries is split into `[cusp, 360)` and `[0, next)`.
pub fn house_containing(cusps: &[f64; 12], longitude: f64) -> Option<u8> {
    (0..12).find_map(|i| {
        let cusp = cusps[i];
        let next = cusps[(i + 1) % 12];
        let inside = if next < cusp {
            longitude >= cusp || longitude < next
        } else {
            cusp <= longitude && longitude < next
        };
        inside.then_some(i as u8 + 1)
    })
}

/// Reject coordinates no house routine can use.
pub(crate) fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ConfigError> {
    let valid = latitude.is_finite()
        && longitude.is_finite()
        && latitude.abs() <= 90.0
        && longitude.abs() <= 180.0;
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidCoordinates {
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_walk_handles_the_wrap_arc() {
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = (350.0 + 30.0 * i as f64) % 360.0;
        }
        // house 1 spans 350 -> 20
        assert_eq!(house_containing(&cusps, 359.0), Some(1));
        assert_eq!(house_containing(&cusps, 5.0), Some(1));
        assert_eq!(house_containing(&cusps, 20.0), Some(2));
        assert_eq!(house_containing(&cusps, 349.99), Some(12));
    }

    #[test]
    fn degenerate_cusps_match_nothing() {
        assert_eq!(house_containing(&[10.0; 12], 10.0), None);
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert!(validate_coordinates(55.75, 37.62).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::NAN).is_err());
    }
}
