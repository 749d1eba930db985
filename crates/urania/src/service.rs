//! Async front for callers running on a tokio runtime.
//!
//! Chart calculations are CPU-bound and synchronous; the service moves them
//! onto tokio's blocking pool so an event loop is never stalled.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::chart::{
    compute_natal_summary, DailyTransitResult, NatalCalculator, NatalChart, NatalSummary,
    TransitCalculator,
};
use crate::ephemeris::Ephemeris;
use crate::error::ChartError;
use crate::time::BirthTime;

#[derive(Debug, Clone)]
pub struct ChartService {
    ephemeris: Arc<Ephemeris>,
}

impl ChartService {
    pub fn new(ephemeris: Ephemeris) -> Self {
        Self {
            ephemeris: Arc::new(ephemeris),
        }
    }

    pub fn from_shared(ephemeris: Arc<Ephemeris>) -> Self {
        Self { ephemeris }
    }

    pub fn ephemeris(&self) -> &Ephemeris {
        &self.ephemeris
    }

    async fn run_blocking<T, F>(&self, job: F) -> Result<T, ChartError>
    where
        T: Send + 'static,
        F: FnOnce(&Ephemeris) -> Result<T, ChartError> + Send + 'static,
    {
        let ephemeris = Arc::clone(&self.ephemeris);
        tokio::task::spawn_blocking(move || job(&ephemeris))
            .await
            .map_err(|e| ChartError::Worker {
                message: e.to_string(),
            })?
    }

    pub async fn natal_chart(
        &self,
        birth_date: NaiveDate,
        birth_time: BirthTime,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<NatalChart, ChartError> {
        let timezone = timezone.to_string();
        self.run_blocking(move |eph| {
            NatalCalculator::new(eph).compute_full_natal_chart(
                birth_date, birth_time, latitude, longitude, &timezone,
            )
        })
        .await
    }

    pub async fn natal_summary(
        &self,
        birth_date: NaiveDate,
        birth_time: BirthTime,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<NatalSummary, ChartError> {
        let timezone = timezone.to_string();
        self.run_blocking(move |eph| {
            compute_natal_summary(eph, birth_date, birth_time, latitude, longitude, &timezone)
        })
        .await
    }

    /// Takes the natal chart by value since it crosses onto a worker thread.
    pub async fn daily_transits(
        &self,
        natal: NatalChart,
        date: NaiveDate,
        timezone: &str,
    ) -> Result<DailyTransitResult, ChartError> {
        let timezone = timezone.to_string();
        self.run_blocking(move |eph| {
            TransitCalculator::new(eph).compute_daily_transits(&natal, date, &timezone)
        })
        .await
    }
}
