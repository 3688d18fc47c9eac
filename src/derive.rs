use std::collections::BTreeMap;

use crate::solar::SolarMarkerSet;
use crate::types::Zman;

/// The full set of named zmanim of one day, in UTC minutes from midnight.
///
/// Values may carry fractional minutes. A zman whose inputs could not be
/// solved is absent.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedZmanim {
    sun_hour: Option<i64>,
    values: BTreeMap<Zman, f64>,
}

impl DerivedZmanim {
    /// Derives every zman from the day's base markers.
    ///
    /// The GRA halachic hour is a twelfth of sunrise to sunset and midday the
    /// midpoint, both in whole minutes (floor). The MGA hour is a sixth of
    /// first light to midday.
    pub fn derive(markers: &SolarMarkerSet) -> Self {
        let sunrise = markers.sunrise;
        let sunset = markers.sunset;
        let first_light = markers.first_light;

        let day = sunrise.zip(sunset);
        let sun_hour = day.map(|(sunrise, sunset)| (sunset - sunrise).div_euclid(12));
        let midday = day.map(|(sunrise, sunset)| (sunset + sunrise).div_euclid(2));
        let mga_hour = midday
            .zip(first_light)
            .map(|(midday, first_light)| (midday - first_light) as f64 / 6.0);

        let sunrise = sunrise.map(|m| m as f64);
        let sunset = sunset.map(|m| m as f64);
        let first_light = first_light.map(|m| m as f64);
        let hour = sun_hour.map(|h| h as f64);
        let midday = midday.map(|m| m as f64);

        let with_hour = |marker: Option<f64>, f: fn(f64, f64) -> f64| marker.zip(hour).map(|(m, h)| f(m, h));
        let with_mga = |factor: f64| first_light.zip(mga_hour).map(|(dawn, h)| dawn + factor * h);

        let candidates = [
            (Zman::Sunrise, sunrise),
            (Zman::Sunset, sunset),
            (Zman::Midday, midday),
            (Zman::FirstLight, first_light),
            (Zman::Talit, markers.talit.map(|m| m as f64)),
            (Zman::FirstStars, markers.first_stars.map(|m| m as f64)),
            (Zman::ThreeStars, markers.three_stars.map(|m| m as f64)),
            (Zman::PlagMincha, with_hour(sunset, |s, h| s - 1.25 * h)),
            (Zman::StarsOut, with_hour(sunset, |s, h| s + 18.0 * h / 60.0)),
            (Zman::SmallMincha, with_hour(sunrise, |r, h| r + 9.5 * h)),
            (Zman::BigMincha, with_hour(sunrise, |r, h| r + 6.5 * h)),
            (Zman::BigMincha30, midday.map(|m| m + 30.0)),
            (Zman::MgaEndShma, with_mga(3.0)),
            (Zman::GraEndShma, with_hour(sunrise, |r, h| r + 3.0 * h)),
            (Zman::MgaEndTfila, with_mga(4.0)),
            (Zman::GraEndTfila, with_hour(sunrise, |r, h| r + 4.0 * h)),
            (Zman::RabbeinuTam, with_hour(sunset, |s, h| s + 1.2 * h)),
            (Zman::Midnight, midday.map(|m| m + 720.0)),
        ];

        let values = candidates
            .into_iter()
            .filter_map(|(zman, value)| value.map(|v| (zman, v)))
            .collect();
        Self { sun_hour, values }
    }

    /// Length of the GRA halachic hour in minutes.
    pub fn sun_hour(&self) -> Option<i64> {
        self.sun_hour
    }

    pub fn get(&self, zman: Zman) -> Option<f64> {
        self.values.get(&zman).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zman, f64)> + '_ {
        self.values.iter().map(|(zman, minutes)| (*zman, *minutes))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
