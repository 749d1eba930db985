#![allow(dead_code)]

use urania::{
    Body, CalculationError, EclipticMotion, Ephemeris, EphemerisBackend, HouseFrame, HouseSystem,
    JulianDay,
};

/// Julian Days before this are "natal", after it "transit" for [`two_epoch`].
pub const EPOCH_SPLIT: f64 = 2_455_000.0;

type PositionFn = Box<dyn Fn(Body, JulianDay) -> Result<f64, CalculationError> + Send + Sync>;

/// Backend with scripted positions and fixed house cusps.
pub struct StubBackend {
    position: PositionFn,
    cusps: [f64; 12],
}

impl StubBackend {
    pub fn new(
        position: impl Fn(Body, JulianDay) -> Result<f64, CalculationError> + Send + Sync + 'static,
        cusps: [f64; 12],
    ) -> Self {
        Self {
            position: Box::new(position),
            cusps,
        }
    }
}

impl EphemerisBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn supports(&self, _system: HouseSystem) -> bool {
        true
    }

    fn body_position(
        &self,
        body: Body,
        jd_ut: JulianDay,
    ) -> Result<EclipticMotion, CalculationError> {
        Ok(EclipticMotion {
            longitude: (self.position)(body, jd_ut)?,
            speed: if body == Body::Mercury { -0.5 } else { 1.0 },
        })
    }

    fn houses(
        &self,
        _jd_ut: JulianDay,
        _latitude: f64,
        _longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, CalculationError> {
        Ok(HouseFrame {
            cusps: self.cusps,
            ascendant: self.cusps[0],
            midheaven: self.cusps[9],
            system,
        })
    }
}

/// Cusps where house 1 crosses 0° Aries: 350 -> 5.
pub const WRAP_CUSPS: [f64; 12] = [
    350.0, 5.0, 35.0, 65.0, 95.0, 125.0, 170.0, 185.0, 215.0, 245.0, 275.0, 305.0,
];

/// A fixed, distinct longitude for every body.
pub fn spread(body: Body) -> f64 {
    Body::ALL.iter().position(|b| *b == body).unwrap_or(0) as f64 * 33.0 + 2.0
}

/// Stub ephemeris using `natal` before [`EPOCH_SPLIT`] and `transit` after.
pub fn two_epoch(
    natal: impl Fn(Body) -> f64 + Send + Sync + 'static,
    transit: impl Fn(Body) -> f64 + Send + Sync + 'static,
    cusps: [f64; 12],
) -> Ephemeris {
    let backend = StubBackend::new(
        move |body, jd| {
            Ok(if jd.0 < EPOCH_SPLIT {
                natal(body)
            } else {
                transit(body)
            })
        },
        cusps,
    );
    Ephemeris::new(Box::new(backend), HouseSystem::Placidus).unwrap()
}

/// Stub ephemeris whose position calls always fail.
pub fn failing() -> Ephemeris {
    let backend = StubBackend::new(
        |body, jd| {
            Err(CalculationError::Body {
                body,
                julian_day: jd.0,
                message: "no data".to_string(),
            })
        },
        WRAP_CUSPS,
    );
    Ephemeris::new(Box::new(backend), HouseSystem::Placidus).unwrap()
}

/// How many house arcs contain `longitude`, checked arc by arc.
pub fn arcs_containing(cusps: &[f64; 12], longitude: f64) -> usize {
    (0..12)
        .filter(|&i| {
            let start = cusps[i];
            let end = cusps[(i + 1) % 12];
            let width = (end - start).rem_euclid(360.0);
            let offset = (longitude - start).rem_euclid(360.0);
            offset < width
        })
        .count()
}
