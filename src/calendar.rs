//! The rest-day capability the day-transition logic is evaluated against.
//!
//! Deciding whether a civil date is a Sabbath or festival belongs to a Hebrew
//! calendar engine. This crate only consumes the answer.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Answers whether a civil date is a day on which melacha is prohibited.
///
/// `diaspora` is the location's flag, for festivals observed an extra day
/// outside Israel. Any `Fn(NaiveDate, bool) -> bool` closure is a calendar.
pub trait RestDayCalendar {
    fn is_rest_day(&self, date: NaiveDate, diaspora: bool) -> bool;
}

impl<F> RestDayCalendar for F
where
    F: Fn(NaiveDate, bool) -> bool,
{
    fn is_rest_day(&self, date: NaiveDate, diaspora: bool) -> bool {
        self(date, diaspora)
    }
}

/// Only Saturdays are rest days.
#[derive(Copy, Clone, Debug, Default)]
pub struct SabbathCalendar;

impl RestDayCalendar for SabbathCalendar {
    fn is_rest_day(&self, date: NaiveDate, _diaspora: bool) -> bool {
        date.weekday() == Weekday::Sat
    }
}

/// Saturdays plus an explicit list of festival dates.
///
/// Dates added with [`FixedRestDays::diaspora_only`] count only for diaspora
/// locations, like the second day of a festival.
///
/// ```
/// use chrono::NaiveDate;
/// use zmanim::{FixedRestDays, RestDayCalendar};
///
/// let seventh_of_pesach = NaiveDate::from_ymd_opt(2019, 4, 26).unwrap();
/// let calendar = FixedRestDays::new().festival(seventh_of_pesach);
/// assert!(calendar.is_rest_day(seventh_of_pesach, false));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedRestDays {
    festivals: BTreeSet<NaiveDate>,
    diaspora_festivals: BTreeSet<NaiveDate>,
}

impl FixedRestDays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn festival(mut self, date: NaiveDate) -> Self {
        self.festivals.insert(date);
        self
    }

    pub fn festivals(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.festivals.extend(dates);
        self
    }

    pub fn diaspora_only(mut self, date: NaiveDate) -> Self {
        self.diaspora_festivals.insert(date);
        self
    }
}

impl RestDayCalendar for FixedRestDays {
    fn is_rest_day(&self, date: NaiveDate, diaspora: bool) -> bool {
        SabbathCalendar.is_rest_day(date, diaspora)
            || self.festivals.contains(&date)
            || (diaspora && self.diaspora_festivals.contains(&date))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn saturday_is_rest_day() {
        assert!(SabbathCalendar.is_rest_day(date(2018, 11, 10), false));
        assert!(!SabbathCalendar.is_rest_day(date(2018, 11, 9), true));
    }

    #[test]
    fn second_festival_day_only_in_diaspora() {
        let calendar = FixedRestDays::new()
            .festival(date(2019, 4, 20))
            .diaspora_only(date(2019, 4, 21));
        assert!(calendar.is_rest_day(date(2019, 4, 21), true));
        assert!(!calendar.is_rest_day(date(2019, 4, 21), false));
        assert!(calendar.is_rest_day(date(2019, 4, 20), false));
        // plain Saturday
        assert!(calendar.is_rest_day(date(2019, 4, 13), false));
    }

    #[test]
    fn closures_are_calendars() {
        let never = |_: NaiveDate, _: bool| false;
        assert!(!never.is_rest_day(date(2018, 11, 10), false));
    }
}
