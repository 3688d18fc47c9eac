use chrono::{Days, NaiveDate, Utc};
use proptest::prelude::*;

use crate::*;

/// Zones paired with a longitude they cover.
const ZONES: [(&str, f64); 10] = [
    ("Asia/Jerusalem", 35.0),
    ("America/New_York", -74.0),
    ("Europe/London", 0.0),
    ("Australia/Sydney", 151.2),
    ("America/Sao_Paulo", -46.6),
    ("Asia/Tokyo", 139.7),
    ("Pacific/Auckland", 174.8),
    ("Pacific/Honolulu", -157.9),
    ("Asia/Kolkata", 88.4),
    ("America/Los_Angeles", -118.2),
];

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..=36_524).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|start| start.checked_add_days(Days::new(offset)))
            .unwrap()
    })
}

/// A zone and a longitude within 15° of it.
fn any_zone_and_longitude() -> impl Strategy<Value = (&'static str, f64)> {
    prop::sample::select(ZONES.to_vec()).prop_flat_map(|(zone, center)| {
        let west = (center - 15.0).max(-180.0);
        let east = (center + 15.0).min(180.0);
        (Just(zone), west..=east)
    })
}

proptest! {
    #[test]
    fn daylight_is_ordered_outside_polar_range(
        latitude in -45.0_f64..=45.0,
        longitude in -180.0_f64..=180.0,
        date in any_date(),
        approximate in any::<bool>(),
    ) {
        let location = Location::new(latitude, longitude, "UTC").unwrap();
        let builder = Zmanim::builder(location);
        let builder = if approximate { builder.approximate_only() } else { builder };
        let zmanim = builder.build(date).unwrap();

        let markers = zmanim.markers().unwrap();
        let sunrise = markers.sunrise.unwrap();
        let sunset = markers.sunset.unwrap();
        let derived = zmanim.derived().unwrap();
        let midday = derived.get(Zman::Midday).unwrap();
        let sun_hour = derived.sun_hour().unwrap();

        prop_assert!((sunrise as f64) < midday, "sunrise {} midday {}", sunrise, midday);
        prop_assert!(midday < sunset as f64, "midday {} sunset {}", midday, sunset);
        prop_assert!(sun_hour > 0);
        prop_assert_eq!(sun_hour, (sunset - sunrise).div_euclid(12));
    }

    #[test]
    fn local_zmanim_are_the_utc_zmanim(
        latitude in -45.0_f64..=45.0,
        (zone, longitude) in any_zone_and_longitude(),
        date in any_date(),
    ) {
        let location = Location::new(latitude, longitude, zone).unwrap();
        let zmanim = Zmanim::new(date, location).unwrap();
        let utc = zmanim.utc_zmanim().unwrap();
        let local = zmanim.zmanim().unwrap();

        prop_assert_eq!(utc.len(), local.len());
        for (zman, instant) in &local {
            prop_assert_eq!(instant.with_timezone(&Utc), utc[zman]);
        }
    }

    #[test]
    fn transition_outputs_follow_rest_days(
        today_is_rest_day in any::<bool>(),
        tomorrow_is_rest_day in any::<bool>(),
        date in any_date(),
        hour in 0u32..24,
    ) {
        let tomorrow = date.checked_add_days(Days::new(1)).unwrap();
        let calendar = move |day: NaiveDate, _: bool| {
            (day == date && today_is_rest_day) || (day == tomorrow && tomorrow_is_rest_day)
        };
        let moment = date.and_hms_opt(hour, 0, 0).unwrap();
        let zmanim = Zmanim::builder(Location::new(32.08707, 34.88747, "Asia/Jerusalem").unwrap())
            .calendar(calendar)
            .build(moment)
            .unwrap();

        let candles = zmanim.candle_lighting().unwrap();
        let havdalah = zmanim.havdalah().unwrap();
        if today_is_rest_day && tomorrow_is_rest_day {
            prop_assert_eq!(havdalah, None);
            prop_assert!(zmanim.issur_melacha_in_effect().unwrap());
        }
        if !today_is_rest_day && !tomorrow_is_rest_day {
            prop_assert_eq!(candles, None);
            prop_assert_eq!(havdalah, None);
            prop_assert!(!zmanim.issur_melacha_in_effect().unwrap());
        }
        prop_assert!(!(zmanim.erev_shabbat_chag().unwrap() && zmanim.motzei_shabbat_chag().unwrap()));
    }

    #[test]
    fn polar_latitudes_do_not_panic(
        latitude in prop_oneof![-90.0_f64..=-66.0, 66.0_f64..=90.0],
        longitude in -180.0_f64..=180.0,
        date in any_date(),
        approximate in any::<bool>(),
    ) {
        let location = Location::new(latitude, longitude, "UTC").unwrap();
        let builder = Zmanim::builder(location);
        let builder = if approximate { builder.approximate_only() } else { builder };
        let zmanim = builder.build(date).unwrap();

        prop_assert!(zmanim.utc_zmanim().is_ok());
        prop_assert!(zmanim.presentation().is_ok());
        prop_assert!(zmanim.issur_melacha_in_effect().is_ok());
    }

    #[test]
    fn repeated_reads_agree(
        latitude in -60.0_f64..=60.0,
        longitude in -180.0_f64..=180.0,
        date in any_date(),
    ) {
        let location = Location::new(latitude, longitude, "UTC").unwrap();
        let zmanim = Zmanim::new(date, location).unwrap();
        prop_assert_eq!(zmanim.utc_zmanim().unwrap(), zmanim.utc_zmanim().unwrap());
        prop_assert_eq!(zmanim.presentation().unwrap(), zmanim.presentation().unwrap());
    }
}
