use chrono::{DateTime, Duration, Utc};

use crate::config::ZmanimConfig;

/// Where a day stands relative to Sabbaths and festivals, from whether it and
/// the following day are rest days.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DayKind {
    /// Neither today nor tomorrow is a rest day
    Ordinary,
    /// A weekday followed by a rest day
    Erev,
    /// A rest day followed by another one
    InsideRest,
    /// A rest day followed by a weekday
    Exiting,
}

impl DayKind {
    pub fn from_flags(today_is_rest_day: bool, tomorrow_is_rest_day: bool) -> Self {
        match (today_is_rest_day, tomorrow_is_rest_day) {
            (false, false) => DayKind::Ordinary,
            (false, true) => DayKind::Erev,
            (true, true) => DayKind::InsideRest,
            (true, false) => DayKind::Exiting,
        }
    }
}

/// Candle lighting, havdalah and the issur melacha status of one day.
///
/// Built from the two rest-day answers and the day's sunset and three stars
/// instants. It holds no other state; every answer is recomputed from those.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DayTransition {
    today_is_rest_day: bool,
    tomorrow_is_rest_day: bool,
    sunset: Option<DateTime<Utc>>,
    three_stars: Option<DateTime<Utc>>,
    config: ZmanimConfig,
}

impl DayTransition {
    pub fn new(
        today_is_rest_day: bool,
        tomorrow_is_rest_day: bool,
        sunset: Option<DateTime<Utc>>,
        three_stars: Option<DateTime<Utc>>,
        config: ZmanimConfig,
    ) -> Self {
        Self {
            today_is_rest_day,
            tomorrow_is_rest_day,
            sunset,
            three_stars,
            config,
        }
    }

    pub fn kind(&self) -> DayKind {
        DayKind::from_flags(self.today_is_rest_day, self.tomorrow_is_rest_day)
    }

    pub fn today_is_rest_day(&self) -> bool {
        self.today_is_rest_day
    }

    pub fn tomorrow_is_rest_day(&self) -> bool {
        self.tomorrow_is_rest_day
    }

    /// When candles are lit for the coming rest day.
    ///
    /// Between two consecutive rest days this is the end of the first one.
    pub fn candle_lighting(&self) -> Option<DateTime<Utc>> {
        match self.kind() {
            DayKind::InsideRest => self.havdalah_value(),
            DayKind::Erev => self
                .sunset
                .zip(Duration::try_minutes(self.config.candle_lighting_offset))
                .and_then(|(sunset, offset)| sunset.checked_sub_signed(offset)),
            DayKind::Ordinary | DayKind::Exiting => None,
        }
    }

    /// End of the day's sanctity, regardless of what the next day is.
    pub fn havdalah_value(&self) -> Option<DateTime<Utc>> {
        match self.config.havdalah_offset {
            0 => self.three_stars,
            offset => self
                .sunset
                .zip(Duration::try_minutes(offset))
                .and_then(|(sunset, offset)| sunset.checked_add_signed(offset)),
        }
    }

    /// Havdalah, only when a rest day is followed by a weekday.
    pub fn havdalah(&self) -> Option<DateTime<Utc>> {
        match self.kind() {
            DayKind::Exiting => self.havdalah_value(),
            _ => None,
        }
    }

    pub fn issur_melacha_in_effect(&self, instant: DateTime<Utc>) -> bool {
        if self.today_is_rest_day && self.tomorrow_is_rest_day {
            return true;
        }
        if self.today_is_rest_day && self.havdalah().is_some_and(|havdalah| instant < havdalah) {
            return true;
        }
        self.tomorrow_is_rest_day && self.candle_lighting().is_some_and(|candles| instant >= candles)
    }

    /// Before candle lighting on the eve of a rest day.
    pub fn erev_shabbat_chag(&self, instant: DateTime<Utc>) -> bool {
        self.kind() == DayKind::Erev && self.candle_lighting().is_some_and(|candles| instant < candles)
    }

    /// After havdalah at the end of a rest day.
    pub fn motzei_shabbat_chag(&self, instant: DateTime<Utc>) -> bool {
        self.kind() == DayKind::Exiting && self.havdalah().is_some_and(|havdalah| instant > havdalah)
    }
}
