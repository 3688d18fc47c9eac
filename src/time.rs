use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::types::ZmanimError;

const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// The moment a snapshot is built for.
///
/// A bare date stands for "this date, at the current time of day". A date
/// with a time is a wall-clock reading in the location's timezone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Moment {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Moment {
    pub fn date(&self) -> NaiveDate {
        match self {
            Moment::Date(date) => *date,
            Moment::DateTime(datetime) => datetime.date(),
        }
    }
}

impl From<NaiveDate> for Moment {
    fn from(date: NaiveDate) -> Self {
        Moment::Date(date)
    }
}

impl From<NaiveDateTime> for Moment {
    fn from(datetime: NaiveDateTime) -> Self {
        Moment::DateTime(datetime)
    }
}

/// A zone-aware value keeps only its wall-clock reading. The offset is
/// discarded and replaced by the location's zone during normalisation.
impl<T: TimeZone> From<DateTime<T>> for Moment {
    fn from(datetime: DateTime<T>) -> Self {
        log::debug!("Discarding offset of zone-aware input {:?}", datetime.naive_local());
        Moment::DateTime(datetime.naive_local())
    }
}

impl FromStr for Moment {
    type Err = ZmanimError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DD[T ]HH:MM[:SS]` or RFC 3339.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Moment::Date(date));
        }
        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Moment::DateTime(datetime));
            }
        }
        DateTime::parse_from_rfc3339(s)
            .map(Moment::from)
            .map_err(|_| ZmanimError::InvalidMoment(s.to_owned()))
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Moment::Date(date) => write!(f, "{date}"),
            Moment::DateTime(datetime) => write!(f, "{datetime}"),
        }
    }
}

/// The caller's moment pinned to UTC.
///
/// `date` is the calendar day (in the location's zone) the zmanim belong to;
/// `utc` is the instant used for the in-effect checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReferenceInstant {
    pub date: NaiveDate,
    pub utc: DateTime<Utc>,
}

impl ReferenceInstant {
    pub fn local(&self, timezone: Tz) -> DateTime<Tz> {
        self.utc.with_timezone(&timezone)
    }
}

/// Normalises `moment` against `timezone`, reading the clock for date-only input.
pub fn normalize(moment: Moment, timezone: Tz) -> Result<ReferenceInstant, ZmanimError> {
    normalize_at(moment, timezone, Utc::now())
}

/// Same as [`normalize`], with an explicit "now" for date-only input.
pub fn normalize_at(moment: Moment, timezone: Tz, now: DateTime<Utc>) -> Result<ReferenceInstant, ZmanimError> {
    let wall_clock = match moment {
        Moment::DateTime(datetime) => {
            log::debug!("Date input is a date and time: {datetime}");
            datetime
        }
        Moment::Date(date) => {
            log::debug!("Date input is a date: {date}");
            date.and_time(now.with_timezone(&timezone).time())
        }
    };
    log::debug!("Resetting timezone to UTC for calculations");
    let utc = localize(timezone, wall_clock)?.with_timezone(&Utc);
    Ok(ReferenceInstant {
        date: wall_clock.date(),
        utc,
    })
}

/// Attaches `timezone` to a wall-clock reading.
///
/// Readings repeated by a DST fall-back resolve to the earlier instant.
/// Readings skipped by a DST spring-forward are moved one hour later.
pub fn localize(timezone: Tz, wall_clock: NaiveDateTime) -> Result<DateTime<Tz>, ZmanimError> {
    match timezone.from_local_datetime(&wall_clock) {
        LocalResult::Single(datetime) => Ok(datetime),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => timezone
            .from_local_datetime(&(wall_clock + Duration::hours(1)))
            .earliest()
            .ok_or(ZmanimError::NonexistentLocalTime(wall_clock)),
    }
}

/// 00:00 UTC on `date`, the base all minute offsets are counted from.
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// The instant `minutes` after `base`, keeping the fractional part down to
/// the microsecond.
pub fn minutes_to_instant(base: DateTime<Utc>, minutes: f64) -> Result<DateTime<Utc>, ZmanimError> {
    let micros = (minutes * MICROS_PER_MINUTE).round();
    if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
        return Err(ZmanimError::TimeConversion);
    }
    base.checked_add_signed(Duration::microseconds(micros as i64))
        .ok_or(ZmanimError::TimeConversion)
}

/// Whole minutes from `base` to `instant`, rounding half a minute up.
///
/// Instants on following days count past 1440.
pub fn instant_to_minutes(base: DateTime<Utc>, instant: DateTime<Utc>) -> i64 {
    let seconds = (instant - base).num_milliseconds().div_euclid(1000);
    seconds.div_euclid(60) + i64::from(seconds.rem_euclid(60) >= 30)
}

/// Drops sub-second precision for display.
pub fn truncate_to_second(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0).unwrap_or(time)
}
