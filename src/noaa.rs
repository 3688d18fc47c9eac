//! Built-in precise astronomy backend.
//!
//! Solar declination and the equation of time come from the NOAA general solar
//! position equations (Jean Meeus, *Astronomical Algorithms*), evaluated at the
//! Julian century of the requested instant. A crossing time is found from the
//! hour angle of the requested zenith, then refined by re-evaluating the sun
//! at the first estimate.

use chrono::NaiveDate;
use julian_day_converter::unix_millis_to_julian_day;

use crate::math::{cos_deg, normalize_degrees_360, polynomial, sin_deg};
use crate::solar::TransitSolver;
use crate::time::utc_midnight;
use crate::types::{Location, SolarEventResult, SunDirection, ZmanimError};

const JD_J2000: f64 = 2_451_545.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
const MINUTES_PER_DAY: f64 = 1440.0;

/// Observer latitudes are clamped to this value; the hour angle degenerates
/// at the poles.
const MAX_OBSERVER_LATITUDE: f64 = 89.8;

const REFINEMENT_PASSES: usize = 2;

// Polynomial coefficients in Julian centuries, ascending powers
const GEOMETRIC_MEAN_LONGITUDE: [f64; 3] = [280.466_46, 36_000.769_83, 0.000_303_2];
const GEOMETRIC_MEAN_ANOMALY: [f64; 3] = [357.529_11, 35_999.050_29, -0.000_153_7];
const ORBIT_ECCENTRICITY: [f64; 3] = [0.016_708_634, -0.000_042_037, -0.000_000_126_7];
const EQUATION_OF_CENTER_1: [f64; 3] = [1.914_602, -0.004_817, -0.000_014];
const EQUATION_OF_CENTER_2: [f64; 2] = [0.019_993, -0.000_101];
/// Arcseconds beyond 23°26'
const MEAN_OBLIQUITY_SECONDS: [f64; 4] = [21.448, -46.815, -0.000_59, 0.001_813];

/// Solves sun crossings with the NOAA solar equations.
///
/// Stateless; one value can serve any number of snapshots.
///
/// ```
/// use chrono::NaiveDate;
/// use zmanim::{Location, NoaaTransit, SolarEventResult, SunDirection, TransitSolver};
///
/// let location = Location::new(32.08707, 34.88747, "Asia/Jerusalem").unwrap();
/// let date = NaiveDate::from_ymd_opt(2016, 4, 18).unwrap();
/// let sunrise = NoaaTransit.time_of_transit(&location, date, 90.833, SunDirection::Rising).unwrap();
/// assert!(matches!(sunrise, SolarEventResult::Occurs(_)));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct NoaaTransit;

impl TransitSolver for NoaaTransit {
    fn time_of_transit(
        &self,
        location: &Location,
        date: NaiveDate,
        zenith: f64,
        direction: SunDirection,
    ) -> Result<SolarEventResult, ZmanimError> {
        let latitude = location
            .latitude()
            .clamp(-MAX_OBSERVER_LATITUDE, MAX_OBSERVER_LATITUDE);
        let base = utc_midnight(date);
        let julian_day = unix_millis_to_julian_day(base.timestamp_millis());

        let mut adjustment = 0.0;
        let mut minutes_utc = 0.0;
        for _ in 0..REFINEMENT_PASSES {
            let t = julian_century(julian_day + adjustment);
            let hour_angle = match hour_angle(latitude, sun_declination(t), zenith, direction) {
                HourAngle::Crosses(degrees) => degrees,
                HourAngle::Never(result) => return Ok(result),
            };
            // Far east the morning crossing falls on the previous UTC day and
            // stays negative.
            let delta = -location.longitude() - hour_angle;
            minutes_utc = 720.0 + 4.0 * delta - equation_of_time(t);
            adjustment = minutes_utc / MINUTES_PER_DAY;
        }

        let seconds = (minutes_utc * 60.0).floor();
        if !seconds.is_finite() {
            return Err(ZmanimError::TimeConversion);
        }
        Ok(SolarEventResult::Occurs(base.timestamp() + seconds as i64))
    }
}

enum HourAngle {
    Crosses(f64),
    Never(SolarEventResult),
}

/// Julian century (T) from the given Julian Day (JD),
/// measured in Julian centuries since the J2000.0 epoch.
pub(crate) fn julian_century(julian_day: f64) -> f64 {
    (julian_day - JD_J2000) / DAYS_PER_JULIAN_CENTURY
}

pub(crate) fn geometric_mean_longitude(t: f64) -> f64 {
    normalize_degrees_360(polynomial(&GEOMETRIC_MEAN_LONGITUDE, t))
}

pub(crate) fn geometric_mean_anomaly(t: f64) -> f64 {
    polynomial(&GEOMETRIC_MEAN_ANOMALY, t)
}

pub(crate) fn orbit_eccentricity(t: f64) -> f64 {
    polynomial(&ORBIT_ECCENTRICITY, t)
}

pub(crate) fn equation_of_center(t: f64) -> f64 {
    let m = geometric_mean_anomaly(t);
    sin_deg(m) * polynomial(&EQUATION_OF_CENTER_1, t)
        + sin_deg(2.0 * m) * polynomial(&EQUATION_OF_CENTER_2, t)
        + sin_deg(3.0 * m) * 0.000_289
}

/// Longitude of the ascending node of the Moon's orbit, for the nutation terms.
fn omega(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

/// Apparent ecliptic longitude of the sun, corrected for nutation and
/// aberration, in degrees.
pub(crate) fn apparent_longitude(t: f64) -> f64 {
    let true_longitude = geometric_mean_longitude(t) + equation_of_center(t);
    true_longitude - 0.005_69 - 0.004_78 * sin_deg(omega(t))
}

pub(crate) fn mean_obliquity(t: f64) -> f64 {
    23.0 + (26.0 + polynomial(&MEAN_OBLIQUITY_SECONDS, t) / 60.0) / 60.0
}

pub(crate) fn obliquity_correction(t: f64) -> f64 {
    mean_obliquity(t) + 0.002_56 * cos_deg(omega(t))
}

/// Solar declination in degrees.
pub(crate) fn sun_declination(t: f64) -> f64 {
    (sin_deg(obliquity_correction(t)) * sin_deg(apparent_longitude(t)))
        .asin()
        .to_degrees()
}

/// Equation of time in minutes: apparent solar time minus mean solar time.
pub(crate) fn equation_of_time(t: f64) -> f64 {
    let epsilon = obliquity_correction(t);
    let l0 = geometric_mean_longitude(t).to_radians();
    let e = orbit_eccentricity(t);
    let m = geometric_mean_anomaly(t).to_radians();
    let y = (epsilon.to_radians() / 2.0).tan().powi(2);

    let eot = y * (2.0 * l0).sin() - 2.0 * e * m.sin() + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    4.0 * eot.to_degrees()
}

/// Hour angle in degrees at which the sun sits at `zenith`, negative for the
/// setting crossing.
fn hour_angle(latitude: f64, declination: f64, zenith: f64, direction: SunDirection) -> HourAngle {
    let h = (cos_deg(zenith) - sin_deg(latitude) * sin_deg(declination))
        / (cos_deg(latitude) * cos_deg(declination));
    if h > 1.0 {
        return HourAngle::Never(SolarEventResult::AllNight);
    }
    if h < -1.0 {
        return HourAngle::Never(SolarEventResult::AllDay);
    }
    let degrees = h.acos().to_degrees();
    match direction {
        SunDirection::Rising => HourAngle::Crosses(degrees),
        SunDirection::Setting => HourAngle::Crosses(-degrees),
    }
}
