//! Ephemeris backends and the handle the calculators borrow.

#[cfg(feature = "swisseph")]
pub mod adapter;
pub mod analytic;
pub mod houses;
pub mod types;

use std::fmt;

use urania_config::{BackendKind, EngineSettings};

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use analytic::AnalyticEphemeris;
pub use types::{Body, EclipticMotion, GeoLocation, HouseFrame, HouseSystem};

use crate::error::{CalculationError, ConfigError};
use crate::time::JulianDay;
use crate::zodiac::normalize_degrees;

/// A source of ecliptic positions and house cusps.
///
/// Implementations are pure functions of their inputs and must be safe to
/// call from any thread.
pub trait EphemerisBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether `houses` can compute this system.
    fn supports(&self, system: HouseSystem) -> bool;

    /// Geocentric tropical longitude and daily speed at a UT Julian Day.
    fn body_position(&self, body: Body, jd_ut: JulianDay)
        -> Result<EclipticMotion, CalculationError>;

    /// Cusps and angles for a UT moment and geographic position (east longitude positive).
    fn houses(
        &self,
        jd_ut: JulianDay,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, CalculationError>;
}

/// Explicitly initialised ephemeris context with a fixed house system.
///
/// Every value leaving the handle is finite and normalised to [0, 360).
pub struct Ephemeris {
    backend: Box<dyn EphemerisBackend>,
    house_system: HouseSystem,
}

impl fmt::Debug for Ephemeris {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ephemeris")
            .field("backend", &self.backend.name())
            .field("house_system", &self.house_system)
            .finish()
    }
}

impl Ephemeris {
    pub fn new(
        backend: Box<dyn EphemerisBackend>,
        house_system: HouseSystem,
    ) -> Result<Self, ConfigError> {
        if !backend.supports(house_system) {
            return Err(ConfigError::UnsupportedHouseSystem {
                system: house_system.to_string(),
                backend: backend.name().to_string(),
            });
        }
        Ok(Self {
            backend,
            house_system,
        })
    }

    /// Built-in backend with Placidus houses.
    pub fn analytic() -> Self {
        Self {
            backend: Box::new(AnalyticEphemeris::new()),
            house_system: HouseSystem::Placidus,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Result<Self, ConfigError> {
        let house_system: HouseSystem = settings.house_system.parse()?;
        let backend: Box<dyn EphemerisBackend> = match settings.backend {
            BackendKind::Analytic => Box::new(AnalyticEphemeris::new()),
            #[cfg(feature = "swisseph")]
            BackendKind::Swiss => {
                Box::new(SwissEphemerisAdapter::new(settings.ephemeris_path.clone())?)
            }
            #[cfg(not(feature = "swisseph"))]
            BackendKind::Swiss => {
                return Err(ConfigError::BackendUnavailable {
                    backend: "swiss".to_string(),
                })
            }
        };
        Self::new(backend, house_system)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    /// Ecliptic longitude in [0, 360).
    pub fn position(&self, body: Body, jd_ut: JulianDay) -> Result<f64, CalculationError> {
        self.motion(body, jd_ut).map(|m| m.longitude)
    }

    pub fn motion(&self, body: Body, jd_ut: JulianDay) -> Result<EclipticMotion, CalculationError> {
        let raw = self.backend.body_position(body, jd_ut)?;
        Ok(EclipticMotion {
            longitude: checked_longitude(&format!("{} longitude", body.key()), raw.longitude)?,
            speed: checked(&format!("{} speed", body.key()), raw.speed)?,
        })
    }

    /// House frame in the handle's house system, or the backend's fallback for it.
    pub fn houses(
        &self,
        jd_ut: JulianDay,
        latitude: f64,
        longitude: f64,
    ) -> Result<HouseFrame, CalculationError> {
        let raw = self
            .backend
            .houses(jd_ut, latitude, longitude, self.house_system)?;
        let mut cusps = [0.0; 12];
        for (i, (slot, value)) in cusps.iter_mut().zip(raw.cusps).enumerate() {
            *slot = checked_longitude(&format!("cusp {}", i + 1), value)?;
        }
        Ok(HouseFrame {
            cusps,
            ascendant: checked_longitude("ascendant", raw.ascendant)?,
            midheaven: checked_longitude("midheaven", raw.midheaven)?,
            system: raw.system,
        })
    }
}

fn checked(what: &str, value: f64) -> Result<f64, CalculationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::InvalidOutput {
            what: what.to_string(),
            value,
        })
    }
}

fn checked_longitude(what: &str, value: f64) -> Result<f64, CalculationError> {
    checked(what, value).map(normalize_degrees)
}
