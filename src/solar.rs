//! Solving the clock times at which the sun crosses a given angle.
//!
//! All results are whole minutes after 00:00 UTC of the requested date. They
//! go negative for a crossing on the previous UTC day and past 1440 for one on
//! the next. A crossing that does not happen that day (the sun never gets that
//! high or that low) is `None`.

use core::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate};

use crate::math::{checked_acos, cos_deg, trunc_minutes};
use crate::time::{instant_to_minutes, utc_midnight};
use crate::types::{Location, SolarEventResult, SunDirection, ZmanimError};

/// Highest absolute latitude at which the precise backend is trusted.
pub const PRECISE_MAX_LATITUDE: f64 = 50.0;

/// Zenith of the sun's upper limb at sunrise and sunset, including refraction.
pub const SUNRISE_ZENITH: f64 = 90.833;
/// Alot hashachar
pub const FIRST_LIGHT_ZENITH: f64 = 106.1;
pub const TALIT_ZENITH: f64 = 101.0;
/// Tzeit hakochavim
pub const FIRST_STARS_ZENITH: f64 = 96.0;
pub const THREE_STARS_ZENITH: f64 = 98.5;

/// An external astronomy capability able to time a single sun crossing.
pub trait TransitSolver {
    /// Returns the instant on `date` (UTC) at which the sun is at `zenith`
    /// degrees from the vertical, moving in `direction`.
    fn time_of_transit(
        &self,
        location: &Location,
        date: NaiveDate,
        zenith: f64,
        direction: SunDirection,
    ) -> Result<SolarEventResult, ZmanimError>;

    /// Absolute latitude beyond which results are not trusted.
    fn max_latitude(&self) -> f64 {
        PRECISE_MAX_LATITUDE
    }
}

/// Which algorithm produced a set of markers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SolverStrategy {
    Approximate,
    Precise,
}

impl fmt::Display for SolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStrategy::Approximate => f.write_str("approximate"),
            SolverStrategy::Precise => f.write_str("precise"),
        }
    }
}

/// The morning and evening crossing of one solar angle, in UTC minutes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Crossings {
    pub rising: Option<i64>,
    pub setting: Option<i64>,
}

/// A way of solving sun crossings for a location and date.
pub trait SunAngleSolver {
    fn strategy(&self) -> SolverStrategy;

    fn crossings(&self, location: &Location, date: NaiveDate, zenith: f64) -> Result<Crossings, ZmanimError>;

    /// Solves the six base markers of a day.
    fn markers(&self, location: &Location, date: NaiveDate) -> Result<SolarMarkerSet, ZmanimError> {
        let sun = self.crossings(location, date, SUNRISE_ZENITH)?;
        Ok(SolarMarkerSet {
            strategy: self.strategy(),
            sunrise: sun.rising,
            sunset: sun.setting,
            first_light: self.crossings(location, date, FIRST_LIGHT_ZENITH)?.rising,
            talit: self.crossings(location, date, TALIT_ZENITH)?.rising,
            first_stars: self.crossings(location, date, FIRST_STARS_ZENITH)?.setting,
            three_stars: self.crossings(location, date, THREE_STARS_ZENITH)?.setting,
        })
    }
}

/// The six solved base markers of one day, in UTC minutes from midnight.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SolarMarkerSet {
    pub strategy: SolverStrategy,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub first_light: Option<i64>,
    pub talit: Option<i64>,
    pub first_stars: Option<i64>,
    pub three_stars: Option<i64>,
}

/// Closed-form NOAA low-accuracy solution, usable at every latitude.
#[derive(Copy, Clone, Debug, Default)]
pub struct LowAccuracySolver;

impl SunAngleSolver for LowAccuracySolver {
    fn strategy(&self) -> SolverStrategy {
        SolverStrategy::Approximate
    }

    fn crossings(&self, location: &Location, date: NaiveDate, zenith: f64) -> Result<Crossings, ZmanimError> {
        let solved = sun_time_for_zenith(date.ordinal0(), location.latitude(), location.longitude(), zenith);
        Ok(Crossings {
            rising: solved.map(|(rising, _)| rising),
            setting: solved.map(|(_, setting)| setting),
        })
    }
}

/// Returns the (rising, setting) UTC minutes at which the sun is at `zenith`
/// degrees from the vertical, or `None` if it never gets there.
///
/// `day_of_year` counts from 0 on 1 January. Uses the NOAA low accuracy
/// equations for the equation of time and declination; minute values are
/// truncated toward zero.
pub fn sun_time_for_zenith(day_of_year: u32, latitude: f64, longitude: f64, zenith: f64) -> Option<(i64, i64)> {
    let gamma = 2.0 * core::f64::consts::PI * ((f64::from(day_of_year) - 1.0) / 365.0);

    let eqtime = 229.18
        * (0.000_075 + 0.001_868 * gamma.cos()
            - 0.032_077 * gamma.sin()
            - 0.014_615 * (2.0 * gamma).cos()
            - 0.040_849 * (2.0 * gamma).sin());

    let declination = 0.006_918 - 0.399_912 * gamma.cos() + 0.070_257 * gamma.sin()
        - 0.006_758 * (2.0 * gamma).cos()
        + 0.000_907 * (2.0 * gamma).sin()
        - 0.002_697 * (3.0 * gamma).cos()
        + 0.001_48 * (3.0 * gamma).sin();

    let latitude = latitude.to_radians();
    let hour_angle = checked_acos(
        cos_deg(zenith) / (latitude.cos() * declination.cos()) - latitude.tan() * declination.tan(),
    )?;
    let hour_angle = 720.0 * hour_angle / core::f64::consts::PI;

    Some((
        trunc_minutes(720.0 - 4.0 * longitude - hour_angle - eqtime),
        trunc_minutes(720.0 - 4.0 * longitude + hour_angle - eqtime),
    ))
}

/// Delegates every crossing to a [`TransitSolver`].
#[derive(Clone)]
pub struct PreciseSolver {
    transit: Arc<dyn TransitSolver + Send + Sync>,
}

impl PreciseSolver {
    pub fn new(transit: Arc<dyn TransitSolver + Send + Sync>) -> Self {
        Self { transit }
    }

    fn crossing(
        &self,
        location: &Location,
        date: NaiveDate,
        zenith: f64,
        direction: SunDirection,
    ) -> Result<Option<i64>, ZmanimError> {
        let result = self.transit.time_of_transit(location, date, zenith, direction)?;
        let Some(timestamp) = result.timestamp() else {
            log::debug!("Sun does not reach zenith {zenith} on {date}: {result:?}");
            return Ok(None);
        };
        let instant = DateTime::from_timestamp(timestamp, 0).ok_or(ZmanimError::TimeConversion)?;
        Ok(Some(instant_to_minutes(utc_midnight(date), instant)))
    }
}

impl fmt::Debug for PreciseSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreciseSolver").finish_non_exhaustive()
    }
}

impl SunAngleSolver for PreciseSolver {
    fn strategy(&self) -> SolverStrategy {
        SolverStrategy::Precise
    }

    fn crossings(&self, location: &Location, date: NaiveDate, zenith: f64) -> Result<Crossings, ZmanimError> {
        Ok(Crossings {
            rising: self.crossing(location, date, zenith, SunDirection::Rising)?,
            setting: self.crossing(location, date, zenith, SunDirection::Setting)?,
        })
    }

    // Only the crossings actually used are asked of the backend.
    fn markers(&self, location: &Location, date: NaiveDate) -> Result<SolarMarkerSet, ZmanimError> {
        Ok(SolarMarkerSet {
            strategy: SolverStrategy::Precise,
            sunrise: self.crossing(location, date, SUNRISE_ZENITH, SunDirection::Rising)?,
            sunset: self.crossing(location, date, SUNRISE_ZENITH, SunDirection::Setting)?,
            first_light: self.crossing(location, date, FIRST_LIGHT_ZENITH, SunDirection::Rising)?,
            talit: self.crossing(location, date, TALIT_ZENITH, SunDirection::Rising)?,
            first_stars: self.crossing(location, date, FIRST_STARS_ZENITH, SunDirection::Setting)?,
            three_stars: self.crossing(location, date, THREE_STARS_ZENITH, SunDirection::Setting)?,
        })
    }
}

/// Picks the solver for a location, once.
///
/// The precise backend is used only when one is supplied and the location is
/// within its latitude range; otherwise the low accuracy solver is used.
pub fn select_solver(
    location: &Location,
    transit: Option<Arc<dyn TransitSolver + Send + Sync>>,
) -> Box<dyn SunAngleSolver + Send + Sync> {
    match transit {
        Some(transit) if location.latitude().abs() <= transit.max_latitude() => {
            log::debug!("Using precise solver at latitude {}", location.latitude());
            Box::new(PreciseSolver::new(transit))
        }
        Some(transit) => {
            log::debug!(
                "Latitude {} beyond precise range ±{}, falling back to approximate solver",
                location.latitude(),
                transit.max_latitude()
            );
            Box::new(LowAccuracySolver)
        }
        None => {
            log::debug!("No precise backend configured, using approximate solver");
            Box::new(LowAccuracySolver)
        }
    }
}
