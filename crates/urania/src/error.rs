use thiserror::Error;

use crate::ephemeris::types::Body;

/// Misconfiguration detected before any calculation runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid timezone identifier: {timezone}")]
    InvalidTimezone { timezone: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("House system {system} is not supported by the {backend} backend")]
    UnsupportedHouseSystem { system: String, backend: String },
    #[error("Ephemeris path not found: {path}. Please ensure Swiss Ephemeris data files are installed.")]
    EphemerisPathMissing { path: String },
    #[error("Ephemeris backend {backend} is not available in this build")]
    BackendUnavailable { backend: String },
    #[error("Local time {local} does not exist in {timezone}")]
    NonexistentLocalTime { local: String, timezone: String },
    #[error("Invalid geographic coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// The ephemeris backend could not produce a usable result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    Body {
        body: Body,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed at JD {julian_day}: {message}")]
    Houses { julian_day: f64, message: String },
    #[error("Ephemeris returned an invalid {what}: {value}")]
    InvalidOutput { what: String, value: f64 },
}

/// Error returned by the chart entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Calculation(#[from] CalculationError),
    #[error("Chart worker failed: {message}")]
    Worker { message: String },
}

impl ChartError {
    pub fn is_config(&self) -> bool {
        matches!(self, ChartError::Config(_))
    }
}
