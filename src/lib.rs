//! Four Pillars (四柱, Korean *saju*) calculation.
//!
//! Turns a birth date, clock time and longitude into the year, month, day
//! and hour pillars of the sexagenary calendar, together with the labels
//! derived from them: Ten Gods, Twelve Fortunes, Twelve Spirits and a
//! five-element profile.
//!
//! Clock time is corrected to true local solar time first; solar months
//! come from the apparent longitude of the sun, computed on the fly. The
//! lunar date is reported alongside for 1900 to 2100 but no pillar depends
//! on it.
//!
//! # Examples
//!
//! ```
//! use saju::{BirthInput, compute};
//!
//! let result = compute(&BirthInput::on(2023, 10, 15).at(12, 0)).unwrap();
//! let p = &result.four_pillars;
//! assert_eq!(
//!     ["癸卯", "壬戌", "丙午", "甲午"],
//!     [p.year.label(), p.month.label(), p.day.label(), p.hour.label()]
//! );
//! ```
//!
//! Lunisolar calendar:
//!
//! ```
//! use saju::Date;
//! use saju::chinese::{Annus, Month::*};
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//! let annus = Annus::from_date(date, 540).unwrap();
//!
//! assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
//! ```

pub mod chinese;
pub mod config;
pub mod cycle;
pub mod date;
pub mod error;
pub mod fortunes;
pub mod pillars;
pub mod saju;
pub mod solar_time;
pub mod spirits;
pub mod ten_gods;
pub mod time_scales;

pub use config::EngineConfig;
pub use date::{Date, YearType};
pub use error::{ConfigError, SajuError};
pub use saju::{BirthInput, Gender, Saju, SajuResult, compute};
