use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::aspects::{Aspect, AspectCalculator};
use crate::chart::{house_containing, validate_coordinates, BodyPosition, ChartPoint};
use crate::ephemeris::types::{Body, GeoLocation, HouseSystem};
use crate::ephemeris::Ephemeris;
use crate::error::ChartError;
use crate::time::{to_julian_day_ut, BirthTime, JulianDay};
use crate::zodiac::Placement;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    pub ascendant: Placement,
    pub midheaven: Placement,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// 1..=12
    pub number: u8,
    pub placement: Placement,
}

/// Houses of a timed chart, labelled with the system that produced the cusps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseData {
    pub system: HouseSystem,
    pub angles: Angles,
    pub cusps: [HouseCusp; 12],
}

/// Natal chart snapshot. Houses exist only when the birth time is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub birth_date: NaiveDate,
    pub birth_time: BirthTime,
    pub location: GeoLocation,
    pub timezone: String,
    pub julian_day: JulianDay,
    /// All tracked bodies in [`Body::ALL`] order
    pub bodies: Vec<BodyPosition>,
    pub houses: Option<HouseData>,
    /// Sorted by orb, tightest first
    pub aspects: Vec<Aspect<Body>>,
    pub time_known: bool,
}

impl NatalChart {
    pub fn body(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.iter().find(|p| p.body == body)
    }

    pub fn point(&self, point: ChartPoint) -> Option<Placement> {
        match point {
            ChartPoint::Body(body) => self.body(body).map(|p| p.placement),
            ChartPoint::Ascendant => self.houses.map(|h| h.angles.ascendant),
            ChartPoint::Midheaven => self.houses.map(|h| h.angles.midheaven),
        }
    }

    pub fn longitudes(&self) -> Vec<(Body, f64)> {
        self.bodies.iter().map(|p| (p.body, p.longitude())).collect()
    }

    pub fn cusp_longitudes(&self) -> Option<[f64; 12]> {
        self.houses
            .map(|houses| houses.cusps.map(|c| c.placement.longitude))
    }

    /// Natal house containing `longitude`, or `None` without houses.
    pub fn house_of(&self, longitude: f64) -> Option<u8> {
        self.cusp_longitudes()
            .and_then(|cusps| house_containing(&cusps, longitude))
    }
}

/// Computes natal charts against a borrowed ephemeris.
pub struct NatalCalculator<'a> {
    ephemeris: &'a Ephemeris,
    aspects: AspectCalculator,
}

impl<'a> NatalCalculator<'a> {
    pub fn new(ephemeris: &'a Ephemeris) -> Self {
        Self {
            ephemeris,
            aspects: AspectCalculator::new(),
        }
    }

    pub fn compute_full_natal_chart(
        &self,
        birth_date: NaiveDate,
        birth_time: BirthTime,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<NatalChart, ChartError> {
        let julian_day = to_julian_day_ut(birth_date, birth_time, timezone)?;
        validate_coordinates(latitude, longitude)?;

        let bodies = Body::ALL
            .iter()
            .map(|&body| {
                self.ephemeris
                    .motion(body, julian_day)
                    .map(|motion| BodyPosition::new(body, motion))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let houses = if birth_time.is_known() {
            let frame = self.ephemeris.houses(julian_day, latitude, longitude)?;
            Some(HouseData {
                system: frame.system,
                angles: Angles {
                    ascendant: Placement::from_longitude(frame.ascendant),
                    midheaven: Placement::from_longitude(frame.midheaven),
                },
                cusps: std::array::from_fn(|i| HouseCusp {
                    number: i as u8 + 1,
                    placement: Placement::from_longitude(frame.cusps[i]),
                }),
            })
        } else {
            None
        };

        let longitudes: Vec<(Body, f64)> =
            bodies.iter().map(|p| (p.body, p.longitude())).collect();
        let aspects = self.aspects.find_aspects(&longitudes);

        debug!(
            "natal chart calculated: date={} time_known={} bodies={} aspects={} houses={}",
            birth_date,
            birth_time.is_known(),
            bodies.len(),
            aspects.len(),
            houses.is_some()
        );

        Ok(NatalChart {
            birth_date,
            birth_time,
            location: GeoLocation {
                lat: latitude,
                lon: longitude,
            },
            timezone: timezone.to_string(),
            julian_day,
            bodies,
            houses,
            aspects,
            time_known: birth_time.is_known(),
        })
    }
}
