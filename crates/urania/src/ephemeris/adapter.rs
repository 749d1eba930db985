use std::env;
use std::path::{Path, PathBuf};

use log::debug;
use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

use crate::ephemeris::types::{Body, EclipticMotion, HouseFrame, HouseSystem};
use crate::ephemeris::EphemerisBackend;
use crate::error::{CalculationError, ConfigError};
use crate::time::JulianDay;
use crate::zodiac::normalize_degrees;

/// Environment variable overriding the ephemeris data directory.
pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// The path is registered with the Swiss Ephemeris library, which keeps a
    /// single process-wide search path; the last adapter built wins.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var(EPHEMERIS_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(ConfigError::EphemerisPathMissing {
                path: path.display().to_string(),
            });
        }

        set_ephe_path(&path.to_string_lossy());
        debug!("Swiss Ephemeris data path set to {}", path.display());

        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl EphemerisBackend for SwissEphemerisAdapter {
    fn name(&self) -> &'static str {
        "swiss"
    }

    fn supports(&self, _system: HouseSystem) -> bool {
        true
    }

    fn body_position(
        &self,
        body: Body,
        jd_ut: JulianDay,
    ) -> Result<EclipticMotion, CalculationError> {
        let result = calc_ut(jd_ut.0, body.swiss_id() as u32, CALC_FLAGS as u32).map_err(|e| {
            CalculationError::Body {
                body,
                julian_day: jd_ut.0,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(EclipticMotion {
            longitude: normalize_degrees(out[0]),
            speed: out[3],
        })
    }

    fn houses(
        &self,
        jd_ut: JulianDay,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, CalculationError> {
        let (c, a) = houses_ex(jd_ut.0, 0, latitude, longitude, system.swiss_code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let frame = HouseFrame {
            cusps: [
                cusps.first,
                cusps.second,
                cusps.third,
                cusps.fourth,
                cusps.fifth,
                cusps.sixth,
                cusps.seventh,
                cusps.eighth,
                cusps.ninth,
                cusps.tenth,
                cusps.eleventh,
                cusps.twelfth,
            ]
            .map(normalize_degrees),
            ascendant: normalize_degrees(ascmc.ascendant),
            midheaven: normalize_degrees(ascmc.mc),
            system,
        };

        // houses_ex reports failure only through zeroed output
        if frame.cusps.iter().all(|c| *c == 0.0) {
            return Err(CalculationError::Houses {
                julian_day: jd_ut.0,
                message: format!("Swiss Ephemeris returned no cusps for {}", system),
            });
        }
        Ok(frame)
    }
}
