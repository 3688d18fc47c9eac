use core::fmt;
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::calendar::{RestDayCalendar, SabbathCalendar};
use crate::config::ZmanimConfig;
use crate::derive::DerivedZmanim;
use crate::noaa::NoaaTransit;
use crate::solar::{select_solver, SolarMarkerSet, SolverStrategy, SunAngleSolver, TransitSolver};
use crate::time::{minutes_to_instant, normalize_at, truncate_to_second, utc_midnight, Moment, ReferenceInstant};
use crate::transition::DayTransition;
use crate::types::{Location, Zman, ZmanimError};

/// The zmanim of one calendar day at one location, and the Sabbath/festival
/// status at one instant of it.
///
/// Times are reported for the day regardless of the instant: havdalah is the
/// same value before and after it. The instant is only used by
/// [`Zmanim::issur_melacha_in_effect`], [`Zmanim::erev_shabbat_chag`] and
/// [`Zmanim::motzei_shabbat_chag`].
///
/// Solar markers and derived zmanim are computed on first use and cached.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use zmanim::{Location, Zman, Zmanim};
///
/// let location = Location::new(32.08707, 34.88747, "Asia/Jerusalem").unwrap();
/// let date = NaiveDate::from_ymd_opt(2016, 4, 18).unwrap();
/// let zmanim = Zmanim::new(date, location).unwrap();
///
/// let sunrise = zmanim.zmanim().unwrap()[&Zman::Sunrise];
/// assert_eq!(sunrise.format("%H:%M:%S").to_string(), "06:08:00");
/// ```
pub struct Zmanim<C = SabbathCalendar> {
    location: Location,
    reference: ReferenceInstant,
    config: ZmanimConfig,
    calendar: C,
    solver: Box<dyn SunAngleSolver + Send + Sync>,
    markers: OnceCell<Result<SolarMarkerSet, ZmanimError>>,
    derived: OnceCell<Result<DerivedZmanim, ZmanimError>>,
}

impl Zmanim<SabbathCalendar> {
    /// Builds a snapshot with the default offsets, the built-in precise solver
    /// and Saturdays as the only rest days.
    ///
    /// # Errors
    ///
    /// Fails if the moment's wall-clock time cannot be placed in the
    /// location's timezone.
    pub fn new(moment: impl Into<Moment>, location: Location) -> Result<Self, ZmanimError> {
        ZmanimBuilder::new(location).build(moment)
    }

    pub fn builder(location: Location) -> ZmanimBuilder<SabbathCalendar> {
        ZmanimBuilder::new(location)
    }
}

impl<C: RestDayCalendar> Zmanim<C> {
    /// The calendar day the zmanim are for, in the location's zone.
    pub fn date(&self) -> NaiveDate {
        self.reference.date
    }

    /// The reference instant in UTC.
    pub fn instant(&self) -> DateTime<Utc> {
        self.reference.utc
    }

    pub fn local_instant(&self) -> DateTime<Tz> {
        self.reference.local(self.location.timezone())
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn config(&self) -> &ZmanimConfig {
        &self.config
    }

    pub fn strategy(&self) -> SolverStrategy {
        self.solver.strategy()
    }

    /// Days since 1 January of the date's year.
    pub fn day_of_year(&self) -> u32 {
        self.reference.date.ordinal0()
    }

    pub fn markers(&self) -> Result<&SolarMarkerSet, ZmanimError> {
        self.markers
            .get_or_init(|| self.solver.markers(&self.location, self.reference.date))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn derived(&self) -> Result<&DerivedZmanim, ZmanimError> {
        self.derived
            .get_or_init(|| self.markers().map(DerivedZmanim::derive))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Every solvable zman as a UTC instant. Unsolvable ones are left out.
    pub fn utc_zmanim(&self) -> Result<BTreeMap<Zman, DateTime<Utc>>, ZmanimError> {
        let base = utc_midnight(self.reference.date);
        log::debug!("Calculating UTC zmanim for {base}");
        self.derived()?
            .iter()
            .map(|(zman, minutes)| minutes_to_instant(base, minutes).map(|instant| (zman, instant)))
            .collect()
    }

    /// Every solvable zman in the location's timezone.
    pub fn zmanim(&self) -> Result<BTreeMap<Zman, DateTime<Tz>>, ZmanimError> {
        let timezone = self.location.timezone();
        Ok(self
            .utc_zmanim()?
            .into_iter()
            .map(|(zman, instant)| (zman, instant.with_timezone(&timezone)))
            .collect())
    }

    pub fn utc_zman(&self, zman: Zman) -> Result<Option<DateTime<Utc>>, ZmanimError> {
        self.derived()?
            .get(zman)
            .map(|minutes| minutes_to_instant(utc_midnight(self.reference.date), minutes))
            .transpose()
    }

    /// The listed zmanim, in display order, as local wall-clock times to the
    /// second.
    pub fn presentation(&self) -> Result<Vec<(Zman, NaiveTime)>, ZmanimError> {
        let zmanim = self.zmanim()?;
        Ok(Zman::PRESENTATION_ORDER
            .into_iter()
            .filter_map(|zman| zmanim.get(&zman).map(|instant| (zman, truncate_to_second(instant.time()))))
            .collect())
    }

    /// Asks the calendar about this day and the next one.
    pub fn day_transition(&self) -> Result<DayTransition, ZmanimError> {
        let date = self.reference.date;
        let tomorrow = date.checked_add_days(Days::new(1)).ok_or(ZmanimError::TimeConversion)?;
        let diaspora = self.location.diaspora();
        Ok(DayTransition::new(
            self.calendar.is_rest_day(date, diaspora),
            self.calendar.is_rest_day(tomorrow, diaspora),
            self.utc_zman(Zman::Sunset)?,
            self.utc_zman(Zman::ThreeStars)?,
            self.config,
        ))
    }

    /// When candles are lit, if tomorrow is a rest day.
    pub fn candle_lighting(&self) -> Result<Option<DateTime<Tz>>, ZmanimError> {
        Ok(self.localize(self.day_transition()?.candle_lighting()))
    }

    /// When the rest day ends, if today is one and tomorrow is not.
    pub fn havdalah(&self) -> Result<Option<DateTime<Tz>>, ZmanimError> {
        Ok(self.localize(self.day_transition()?.havdalah()))
    }

    /// Whether melacha is prohibited at the reference instant.
    pub fn issur_melacha_in_effect(&self) -> Result<bool, ZmanimError> {
        Ok(self.day_transition()?.issur_melacha_in_effect(self.reference.utc))
    }

    pub fn erev_shabbat_chag(&self) -> Result<bool, ZmanimError> {
        Ok(self.day_transition()?.erev_shabbat_chag(self.reference.utc))
    }

    pub fn motzei_shabbat_chag(&self) -> Result<bool, ZmanimError> {
        Ok(self.day_transition()?.motzei_shabbat_chag(self.reference.utc))
    }

    fn localize(&self, instant: Option<DateTime<Utc>>) -> Option<DateTime<Tz>> {
        let timezone = self.location.timezone();
        instant.map(|instant| instant.with_timezone(&timezone))
    }
}

impl<C: RestDayCalendar> fmt::Display for Zmanim<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.presentation().map_err(|_| fmt::Error)?;
        for (i, (zman, time)) in lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{zman} - {}", time.format("%H:%M:%S"))?;
        }
        Ok(())
    }
}

impl<C> fmt::Debug for Zmanim<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zmanim")
            .field("date", &self.reference.date)
            .field("instant", &self.reference.utc)
            .field("location", &self.location)
            .field("config", &self.config)
            .field("strategy", &self.solver.strategy())
            .finish_non_exhaustive()
    }
}

/// Configures and builds [`Zmanim`] snapshots.
///
/// ```
/// use chrono::NaiveDate;
/// use zmanim::{FixedRestDays, Location, Zmanim, ZmanimConfig};
///
/// let new_york = Location::new(40.7128, -74.0060, "America/New_York")
///     .unwrap()
///     .in_diaspora(true);
/// let pesach = FixedRestDays::new()
///     .festival(NaiveDate::from_ymd_opt(2019, 4, 20).unwrap())
///     .diaspora_only(NaiveDate::from_ymd_opt(2019, 4, 21).unwrap());
/// let zmanim = Zmanim::builder(new_york)
///     .config(ZmanimConfig::default())
///     .calendar(pesach)
///     .build("2019-04-21T09:00:00".parse::<zmanim::Moment>().unwrap())
///     .unwrap();
/// assert!(zmanim.issur_melacha_in_effect().unwrap());
/// ```
pub struct ZmanimBuilder<C = SabbathCalendar> {
    location: Location,
    config: ZmanimConfig,
    calendar: C,
    transit: Option<Arc<dyn TransitSolver + Send + Sync>>,
    now: Option<DateTime<Utc>>,
}

impl ZmanimBuilder<SabbathCalendar> {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            config: ZmanimConfig::default(),
            calendar: SabbathCalendar,
            transit: Some(Arc::new(NoaaTransit)),
            now: None,
        }
    }
}

impl<C: RestDayCalendar> ZmanimBuilder<C> {
    pub fn config(mut self, config: ZmanimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn calendar<D: RestDayCalendar>(self, calendar: D) -> ZmanimBuilder<D> {
        ZmanimBuilder {
            location: self.location,
            config: self.config,
            calendar,
            transit: self.transit,
            now: self.now,
        }
    }

    /// Replaces the precise astronomy backend.
    pub fn transit_solver(mut self, transit: Arc<dyn TransitSolver + Send + Sync>) -> Self {
        self.transit = Some(transit);
        self
    }

    /// Uses the low accuracy solver at every latitude.
    pub fn approximate_only(mut self) -> Self {
        self.transit = None;
        self
    }

    /// Fixes the clock used to complete a date-only moment.
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Normalises `moment`, picks the solver and returns the snapshot.
    ///
    /// # Errors
    ///
    /// [`ZmanimError::InvalidConfig`] for negative offsets and
    /// [`ZmanimError::NonexistentLocalTime`] for a wall-clock time the zone
    /// skips.
    pub fn build(self, moment: impl Into<Moment>) -> Result<Zmanim<C>, ZmanimError> {
        self.config.validate()?;
        let now = self.now.unwrap_or_else(Utc::now);
        let reference = normalize_at(moment.into(), self.location.timezone(), now)?;
        let solver = select_solver(&self.location, self.transit);
        Ok(Zmanim {
            location: self.location,
            reference,
            config: self.config,
            calendar: self.calendar,
            solver,
            markers: OnceCell::new(),
            derived: OnceCell::new(),
        })
    }
}
