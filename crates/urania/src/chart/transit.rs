use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::aspects::{AspectCalculator, AspectKind};
use crate::chart::{BodyPosition, NatalChart};
use crate::ephemeris::types::Body;
use crate::ephemeris::Ephemeris;
use crate::error::ChartError;
use crate::time::{local_noon_julian_day, JulianDay};
use crate::zodiac::Placement;

/// Orb below which a transit aspect counts as exact.
pub const EXACT_ORB: f64 = 1.0;

/// Natal house of a transiting body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NatalHouse {
    Known(u8),
    /// The natal chart has no houses (birth time unknown)
    Unknown,
}

impl NatalHouse {
    pub fn number(self) -> Option<u8> {
        match self {
            NatalHouse::Known(n) => Some(n),
            NatalHouse::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitPosition {
    pub body: Body,
    pub placement: Placement,
    pub retrograde: bool,
    pub house: NatalHouse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitAspect {
    pub transit_body: Body,
    pub natal_body: Body,
    pub kind: AspectKind,
    pub orb: f64,
    pub exact: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTransitResult {
    pub date: NaiveDate,
    pub timezone: String,
    pub julian_day: JulianDay,
    /// Transiting bodies in [`Body::ALL`] order
    pub transits: Vec<TransitPosition>,
    /// Transit-to-natal aspects, tightest first
    pub aspects: Vec<TransitAspect>,
}

impl DailyTransitResult {
    pub fn transit(&self, body: Body) -> Option<&TransitPosition> {
        self.transits.iter().find(|t| t.body == body)
    }

    pub fn exact_aspects(&self) -> impl Iterator<Item = &TransitAspect> {
        self.aspects.iter().filter(|a| a.exact)
    }
}

/// Projects the tracked bodies to a target date against a natal chart.
pub struct TransitCalculator<'a> {
    ephemeris: &'a Ephemeris,
    aspects: AspectCalculator,
}

impl<'a> TransitCalculator<'a> {
    pub fn new(ephemeris: &'a Ephemeris) -> Self {
        Self {
            ephemeris,
            aspects: AspectCalculator::new(),
        }
    }

    /// Transits at local noon of `date` in `timezone`.
    pub fn compute_daily_transits(
        &self,
        natal: &NatalChart,
        date: NaiveDate,
        timezone: &str,
    ) -> Result<DailyTransitResult, ChartError> {
        let julian_day = local_noon_julian_day(date, timezone)?;

        let positions = Body::ALL
            .iter()
            .map(|&body| {
                self.ephemeris
                    .motion(body, julian_day)
                    .map(|motion| BodyPosition::new(body, motion))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let transits: Vec<TransitPosition> = positions
            .iter()
            .map(|p| TransitPosition {
                body: p.body,
                placement: p.placement,
                retrograde: p.retrograde,
                house: natal
                    .house_of(p.longitude())
                    .map_or(NatalHouse::Unknown, NatalHouse::Known),
            })
            .collect();

        let transit_longitudes: Vec<(Body, f64)> =
            positions.iter().map(|p| (p.body, p.longitude())).collect();
        let aspects: Vec<TransitAspect> = self
            .aspects
            .find_cross_aspects(&transit_longitudes, &natal.longitudes())
            .into_iter()
            .map(|a| TransitAspect {
                transit_body: a.first,
                natal_body: a.second,
                kind: a.kind,
                orb: a.orb,
                exact: a.orb < EXACT_ORB,
            })
            .collect();

        debug!(
            "daily transits calculated: date={} timezone={} transits={} aspects={} exact={}",
            date,
            timezone,
            transits.len(),
            aspects.len(),
            aspects.iter().filter(|a| a.exact).count()
        );

        Ok(DailyTransitResult {
            date,
            timezone: timezone.to_string(),
            julian_day,
            transits,
            aspects,
        })
    }
}
