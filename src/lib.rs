//! # Zmanim
//!
//! Halachic times of day for a location and a calendar date, and the
//! Sabbath/festival transitions built on them: candle lighting, havdalah and
//! whether issur melacha is in effect at a given instant.
//!
//! The pipeline runs one way. The caller's moment is pinned to UTC, the sun's
//! crossings of a handful of angles are solved, the full set of zmanim is
//! derived from those with fixed ratios of the halachic hour, and the
//! day-transition facts are evaluated against a rest-day calendar supplied by
//! the caller.
//!
//! ## Basic Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use zmanim::{Location, Zmanim};
//!
//! let petah_tikva = Location::new(32.08707, 34.88747, "Asia/Jerusalem").unwrap();
//! let friday = NaiveDate::from_ymd_opt(2018, 11, 9)
//!     .unwrap()
//!     .and_hms_opt(16, 45, 0)
//!     .unwrap();
//!
//! // Saturdays are the only rest days unless another calendar is given
//! let zmanim = Zmanim::new(friday, petah_tikva).unwrap();
//!
//! for (zman, time) in zmanim.presentation().unwrap() {
//!     println!("{zman} - {time}");
//! }
//!
//! let candles = zmanim.candle_lighting().unwrap().unwrap();
//! assert_eq!(candles.format("%H:%M").to_string(), "16:26");
//! assert!(zmanim.issur_melacha_in_effect().unwrap());
//! ```
//!
//! ## Solvers
//!
//! Between 50°S and 50°N the built-in [`NoaaTransit`] backend is used. Beyond
//! that, or when [`ZmanimBuilder::approximate_only`] is set, the closed-form
//! [`LowAccuracySolver`] takes over. The choice is made once per snapshot and
//! reported by [`Zmanim::strategy`].

pub mod calendar;
pub mod config;
pub mod derive;
pub(crate) mod math;
pub mod noaa;
pub mod solar;
pub mod time;
pub mod transition;
pub mod types;
pub mod zmanim;


pub use calendar::{FixedRestDays, RestDayCalendar, SabbathCalendar};
pub use config::{ZmanimConfig, DEFAULT_CANDLE_LIGHTING_OFFSET};
pub use derive::DerivedZmanim;
pub use noaa::NoaaTransit;
pub use solar::{
    select_solver, sun_time_for_zenith, Crossings, LowAccuracySolver, PreciseSolver, SolarMarkerSet, SolverStrategy,
    SunAngleSolver, TransitSolver,
};
pub use time::{Moment, ReferenceInstant};
pub use transition::{DayKind, DayTransition};
pub use types::{Location, SolarEventResult, SunDirection, Zman, ZmanimError};
pub use zmanim::{Zmanim, ZmanimBuilder};
