//! Correction of clock time to true local solar time.
//!
//! Clock time is kept on a reference meridian (135° E for Korean standard
//! time). The sun crosses the local meridian four minutes later for every
//! degree west of it, so a birth at longitude `λ` is moved by
//! `(λ − reference) × 4` minutes before any time-sensitive pillar is
//! calculated.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::date::Date;
use crate::time_scales::Ut;

/// Meridian of UTC+9, the clock time birth records are kept in by default.
pub const DEFAULT_REFERENCE_MERIDIAN: f64 = 135.0;

const SECONDS_PER_DAY: i64 = 86400;

/// Minutes between clock time on `reference_meridian` and local solar time
/// at `longitude`; negative west of the meridian.
///
/// ```
/// use saju::solar_time::offset_minutes;
///
/// assert_eq!(-32.0, offset_minutes(127.0, 135.0));
/// ```
pub fn offset_minutes(longitude: f64, reference_meridian: f64) -> f64 {
    (longitude - reference_meridian) * 4.0
}

/// A clock reading: civil date plus hour and minute on the reference
/// meridian.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WallClock {
    pub date: Date,
    pub hour: u32,
    pub minute: u32,
}

impl WallClock {
    fn second_of_day(&self) -> i64 {
        debug_assert!(self.hour < 24 && self.minute < 60);
        (self.hour * 3600 + self.minute * 60) as i64
    }
}

/// A moment expressed in true local solar time, together with the absolute
/// instant it denotes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrueSolarTime {
    date: Date,
    second_of_day: u32,
    offset_seconds: i32,
    ut: Ut,
}

impl TrueSolarTime {
    /// Corrects `wall` to true solar time at `longitude`.
    ///
    /// The date rolls forward or backward when the correction crosses
    /// midnight.
    ///
    /// ```
    /// use saju::Date;
    /// use saju::solar_time::{TrueSolarTime, WallClock};
    ///
    /// let wall = WallClock { date: Date::from_gregorian(2023, 10, 15).unwrap(), hour: 0, minute: 10 };
    /// let solar = TrueSolarTime::correct(wall, 127.0, 135.0);
    /// assert_eq!("2023-10-14", solar.date().iso_gregorian());
    /// assert_eq!((23, 38), (solar.hour(), solar.minute()));
    /// ```
    pub fn correct(wall: WallClock, longitude: f64, reference_meridian: f64) -> Self {
        let offset_seconds = (offset_minutes(longitude, reference_meridian) * 60.0).round() as i32;
        let total = wall.second_of_day() + offset_seconds as i64;
        let date = wall.date + total.div_euclid(SECONDS_PER_DAY) as i32;
        let meridian_offset = (reference_meridian * 240.0).round() as i32;
        Self {
            date,
            second_of_day: total.rem_euclid(SECONDS_PER_DAY) as u32,
            offset_seconds,
            ut: Ut::from_local(wall.date, wall.second_of_day() as u32, meridian_offset),
        }
    }

    /// Corrected civil date.
    pub fn date(&self) -> Date {
        self.date
    }

    pub fn second_of_day(&self) -> u32 {
        self.second_of_day
    }

    /// Corrected hour, `0..24`.
    pub fn hour(&self) -> u32 {
        self.second_of_day / 3600
    }

    pub fn minute(&self) -> u32 {
        self.second_of_day / 60 % 60
    }

    /// Correction applied to the clock reading, in seconds.
    pub fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    /// The absolute instant, independent of longitude.
    pub fn ut(&self) -> Ut {
        self.ut
    }
}

impl Serialize for TrueSolarTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("TrueSolarTime", 3)?;
        st.serialize_field("date", &self.date.iso_gregorian())?;
        st.serialize_field(
            "time",
            &format!(
                "{:02}:{:02}:{:02}",
                self.hour(),
                self.minute(),
                self.second_of_day % 60
            ),
        )?;
        st.serialize_field("offsetSeconds", &self.offset_seconds)?;
        st.end()
    }
}
