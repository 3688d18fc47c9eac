use core::fmt;
use core::str::FromStr;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A place on Earth for which zmanim are computed.
///
/// Latitude and longitude are in degrees (positive north and east). The
/// timezone is used to interpret the caller's wall-clock input and to present
/// results. Elevation and the diaspora flag are carried through unchanged:
/// the solar solvers work at sea level, and the diaspora flag is only handed
/// to the rest-day calendar.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    name: Option<String>,
    latitude: f64,
    longitude: f64,
    timezone: Tz,
    elevation: Option<f64>,
    diaspora: bool,
}

impl Location {
    /// Creates a validated location.
    ///
    /// # Errors
    ///
    /// Returns [`ZmanimError::LatitudeOutOfRange`] or
    /// [`ZmanimError::LongitudeOutOfRange`] for coordinates outside
    /// [-90, 90] / [-180, 180], and [`ZmanimError::UnknownTimezone`] if
    /// `timezone` is not an IANA zone name.
    ///
    /// # Example
    ///
    /// ```
    /// use zmanim::Location;
    ///
    /// let petah_tikva = Location::new(32.08707, 34.88747, "Asia/Jerusalem").unwrap();
    /// assert!(!petah_tikva.diaspora());
    /// ```
    pub fn new(latitude: f64, longitude: f64, timezone: &str) -> Result<Self, ZmanimError> {
        let timezone = timezone
            .parse::<Tz>()
            .map_err(|_| ZmanimError::UnknownTimezone(timezone.to_owned()))?;
        Self::with_timezone(latitude, longitude, timezone)
    }

    /// Same as [`Location::new`] for an already parsed zone.
    pub fn with_timezone(latitude: f64, longitude: f64, timezone: Tz) -> Result<Self, ZmanimError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ZmanimError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ZmanimError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            name: None,
            latitude,
            longitude,
            timezone,
            elevation: None,
            diaspora: false,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_elevation(mut self, meters: f64) -> Self {
        self.elevation = Some(meters);
        self
    }

    pub fn in_diaspora(mut self, diaspora: bool) -> Self {
        self.diaspora = diaspora;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    pub fn diaspora(&self) -> bool {
        self.diaspora
    }
}

/// Which of the two daily crossings of a solar angle is wanted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SunDirection {
    /// Morning crossing, sun ascending
    Rising,
    /// Evening crossing, sun descending
    Setting,
}

/// Result of a solar event calculation (sunrise, sunset, twilight, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolarEventResult {
    /// Event occurs at the given timestamp in seconds since the Unix epoch
    Occurs(i64),
    /// Sun is always above the threshold (e.g., midnight sun)
    AllDay,
    /// Sun is always below the threshold (e.g., polar night)
    AllNight,
}

impl SolarEventResult {
    /// Extracts the timestamp from a solar event result.
    ///
    /// Returns `None` if the sun stays on one side of the threshold all day.
    pub fn timestamp(self) -> Option<i64> {
        match self {
            SolarEventResult::Occurs(ts) => Some(ts),
            _ => None,
        }
    }
}

/// Identifier of a named halachic time of day.
///
/// The identifiers are stable and language neutral (`"plag_mincha"`,
/// `"three_stars"`, ...). Turning them into human text is left to the
/// presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zman {
    /// Alot hashachar, sun 16.1° below the horizon in the morning
    FirstLight,
    /// Earliest time for talit and tefilin, sun 11° below the horizon
    Talit,
    Sunrise,
    MgaEndShma,
    GraEndShma,
    MgaEndTfila,
    GraEndTfila,
    /// Chatzot hayom
    Midday,
    BigMincha,
    BigMincha30,
    SmallMincha,
    PlagMincha,
    Sunset,
    /// Sun 6° below the horizon in the evening
    FirstStars,
    /// Sun 8.5° below the horizon in the evening
    ThreeStars,
    StarsOut,
    RabbeinuTam,
    /// Chatzot halayla
    Midnight,
}

impl Zman {
    pub const ALL: [Zman; 18] = [
        Zman::FirstLight,
        Zman::Talit,
        Zman::Sunrise,
        Zman::MgaEndShma,
        Zman::GraEndShma,
        Zman::MgaEndTfila,
        Zman::GraEndTfila,
        Zman::Midday,
        Zman::BigMincha,
        Zman::BigMincha30,
        Zman::SmallMincha,
        Zman::PlagMincha,
        Zman::Sunset,
        Zman::FirstStars,
        Zman::ThreeStars,
        Zman::StarsOut,
        Zman::RabbeinuTam,
        Zman::Midnight,
    ];

    /// The order in which zmanim are listed to users.
    ///
    /// `three_stars` and `stars_out` are computed but not listed; `three_stars`
    /// is surfaced through havdalah instead.
    pub const PRESENTATION_ORDER: [Zman; 16] = [
        Zman::FirstLight,
        Zman::Talit,
        Zman::Sunrise,
        Zman::MgaEndShma,
        Zman::GraEndShma,
        Zman::MgaEndTfila,
        Zman::GraEndTfila,
        Zman::Midday,
        Zman::BigMincha,
        Zman::BigMincha30,
        Zman::SmallMincha,
        Zman::PlagMincha,
        Zman::Sunset,
        Zman::FirstStars,
        Zman::RabbeinuTam,
        Zman::Midnight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Zman::FirstLight => "first_light",
            Zman::Talit => "talit",
            Zman::Sunrise => "sunrise",
            Zman::MgaEndShma => "mga_end_shma",
            Zman::GraEndShma => "gra_end_shma",
            Zman::MgaEndTfila => "mga_end_tfila",
            Zman::GraEndTfila => "gra_end_tfila",
            Zman::Midday => "midday",
            Zman::BigMincha => "big_mincha",
            Zman::BigMincha30 => "big_mincha_30",
            Zman::SmallMincha => "small_mincha",
            Zman::PlagMincha => "plag_mincha",
            Zman::Sunset => "sunset",
            Zman::FirstStars => "first_stars",
            Zman::ThreeStars => "three_stars",
            Zman::StarsOut => "stars_out",
            Zman::RabbeinuTam => "rabbeinu_tam",
            Zman::Midnight => "midnight",
        }
    }
}

impl fmt::Display for Zman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zman {
    type Err = ZmanimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zman::ALL
            .into_iter()
            .find(|zman| zman.as_str() == s)
            .ok_or_else(|| ZmanimError::UnknownZman(s.to_owned()))
    }
}

/// Errors raised while building or evaluating zmanim.
///
/// Solar angles the sun never reaches are not errors: they surface as absent
/// values (`Option::None`, [`SolarEventResult::AllDay`] or
/// [`SolarEventResult::AllNight`]).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZmanimError {
    /// The moment is neither a date nor a date with a time of day
    #[error("expected a date or a date and time, got {0:?}")]
    InvalidMoment(String),

    /// Latitude out of valid range [-90, 90] degrees
    #[error("latitude {0} out of range")]
    LatitudeOutOfRange(f64),

    /// Longitude out of valid range [-180, 180] degrees
    #[error("longitude {0} out of range")]
    LongitudeOutOfRange(f64),

    /// Timezone name not found in the IANA database
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),

    /// Text that is not a zman identifier
    #[error("unknown zman {0:?}")]
    UnknownZman(String),

    /// The wall-clock time does not exist in the location's zone
    #[error("local time {0} does not exist in the location's timezone")]
    NonexistentLocalTime(NaiveDateTime),

    /// Configuration value outside its allowed range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed TOML or unknown configuration key
    #[error("could not parse configuration: {0}")]
    ConfigParse(String),

    /// Error converting between time representations
    #[error("time conversion error")]
    TimeConversion,
}

impl From<toml::de::Error> for ZmanimError {
    fn from(err: toml::de::Error) -> Self {
        ZmanimError::ConfigParse(err.to_string())
    }
}
