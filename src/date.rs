//! Dates as Julian day numbers.
//!
//! Every calculator in the crate works on [`Date`]; only input parsing and
//! output formatting go through the Gregorian calendar.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A day, counted as a Julian day number (JDN).
///
/// JDN 0 is January 1, 4713 BC in the proleptic Julian calendar; earlier
/// days cannot be represented.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }

    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Day of the proleptic Gregorian calendar, with astronomical year
    /// numbering (1 BC is year `0`).
    ///
    /// `None` for days before JDN 0 and for triples that name no day,
    /// such as February 30.
    ///
    /// ```
    /// use saju::Date;
    ///
    /// assert_eq!(2451545, Date::from_gregorian(2000, 1, 1).unwrap().jdn());
    /// assert_eq!(None, Date::from_gregorian(2023, 2, 29));
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=days_in_month(year, month)).contains(&day) {
            return None;
        }
        // March-based year so the leap day falls last
        let (y, m) = if month > 2 {
            (year as i64, month as i64 - 3)
        } else {
            (year as i64 - 1, month as i64 + 9)
        };
        let era = y.div_euclid(400);
        let yoe = y.rem_euclid(400);
        let doy = (153 * m + 2) / 5 + day as i64 - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        // 1721120 is the JDN of 0000-03-01
        let jdn = era * 146_097 + doe + 1_721_120;
        u32::try_from(jdn).ok().map(Self::from_jdn)
    }

    /// `(year, month, day)` in the proleptic Gregorian calendar.
    ///
    /// ```
    /// use saju::Date;
    ///
    /// assert_eq!((2000, 1, 1), Date::from_jdn(2451545).gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let days = self.jdn as i64 - 1_721_120;
        let era = days.div_euclid(146_097);
        let doe = days.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = era * 400 + yoe + (month <= 2) as i64;
        (year as i32, month as i32, day as i32)
    }

    pub fn year(&self) -> i32 {
        self.gregorian().0
    }

    /// `YYYY-MM-DD`.
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{y:04}-{m:02}-{d:02}")
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// ```
/// use saju::Date;
///
/// let date: Date = "1986-05-26".parse().unwrap();
/// assert_eq!((1986, 5, 26), date.gregorian());
/// assert!("1986-02-30".parse::<Date>().is_err());
/// ```
impl FromStr for Date {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut it = s.trim().splitn(3, '-');
        let mut field = || -> Result<i32, DateParseError> {
            it.next()
                .filter(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| DateParseError::Malformed(s.to_owned()))?
                .parse()
                .map_err(|_| DateParseError::Malformed(s.to_owned()))
        };
        let (y, m, d) = (field()?, field()?, field()?);
        Date::from_gregorian(y, m, d).ok_or(DateParseError::NotInCalendar {
            year: y,
            month: m,
            day: d,
        })
    }
}

/// Error returned when parsing a [`Date`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("expected a date as YYYY-MM-DD, got {0:?}")]
    Malformed(String),
    #[error("{year:04}-{month:02}-{day:02} is not a Gregorian calendar date")]
    NotInCalendar { year: i32, month: i32, day: i32 },
}

impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Days later (or earlier, for negative `rhs`). Saturates at JDN 0.
impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn.saturating_add_signed(rhs))
    }
}

/// Number of days from `rhs` to `self`.
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        (self.jdn as i64 - rhs.jdn as i64) as i32
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Gregorian rule: every fourth year, except centuries not divisible
    /// by 400.
    pub fn from_gregorian(year: i32) -> Self {
        let leap =
            year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0);
        if leap { Self::Leap } else { Self::Common }
    }

    pub fn is_leap(&self) -> bool {
        *self == YearType::Leap
    }

    pub fn days(&self) -> i32 {
        365 + self.is_leap() as i32
    }
}

fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        2 => 28 + YearType::from_gregorian(year).is_leap() as i32,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_day_numbers() {
        for (ymd, jdn) in [
            ((1970, 1, 1), 2440588),
            ((2021, 9, 8), 2459466),
            ((2000, 1, 1), 2451545),
            ((1900, 1, 1), 2415021),
            ((1582, 10, 15), 2299161),
            ((-4713, 11, 24), 0),
        ] {
            let (y, m, d) = ymd;
            assert_eq!(Some(jdn), Date::from_gregorian(y, m, d).map(|d| d.jdn()), "{ymd:?}");
            assert_eq!(ymd, Date::from_jdn(jdn).gregorian());
        }
        assert_eq!(None, Date::from_gregorian(-4713, 11, 23));
    }

    #[test]
    fn rejects_non_calendar_dates() {
        for (y, m, d) in [
            (2023, 2, 29),
            (1900, 2, 29),
            (2021, 4, 31),
            (2021, 13, 1),
            (2021, 0, 10),
            (2021, 1, 0),
            (2021, 12, 32),
        ] {
            assert_eq!(None, Date::from_gregorian(y, m, d), "{y:04}-{m:02}-{d:02}");
        }
        assert!(Date::from_gregorian(2000, 2, 29).is_some());
        assert!(Date::from_gregorian(2024, 2, 29).is_some());
    }

    #[test]
    fn every_day_of_a_leap_year() {
        let start = Date::from_gregorian(2024, 1, 1).unwrap();
        let mut seen = 0;
        for m in 1..=12 {
            for d in 1..=days_in_month(2024, m) {
                let date = Date::from_gregorian(2024, m, d).unwrap();
                assert_eq!(seen, date - start);
                assert_eq!((2024, m, d), date.gregorian());
                seen += 1;
            }
        }
        assert_eq!(YearType::Leap.days(), seen);
    }

    #[test]
    fn arithmetic() {
        let date = Date::from_gregorian(2023, 12, 31).unwrap();
        assert_eq!((2024, 1, 1), (date + 1).gregorian());
        assert_eq!((2023, 12, 30), (date + -1).gregorian());
        assert_eq!(60, (date + 60) - date);
        assert_eq!(-60, date - (date + 60));
        assert_eq!(0, (Date::from_jdn(3) + -10).jdn());
    }

    #[test]
    fn leap_rule() {
        assert!(YearType::from_gregorian(2000).is_leap());
        assert!(YearType::from_gregorian(2024).is_leap());
        assert!(YearType::from_gregorian(-4).is_leap());
        assert!(!YearType::from_gregorian(1900).is_leap());
        assert!(!YearType::from_gregorian(2023).is_leap());
        assert_eq!(29, days_in_month(2000, 2));
        assert_eq!(28, days_in_month(2100, 2));
        assert_eq!(30, days_in_month(2021, 11));
    }

    #[test]
    fn text() {
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!("2021-09-08", date.iso_gregorian());
        assert_eq!("2021-09-08", date.to_string());
        assert_eq!(Ok(date), "2021-09-08".parse());
        assert_eq!(Ok(date), " 2021-09-08\n".parse());
        assert_eq!(
            Err(DateParseError::Malformed("2023/10/15".into())),
            "2023/10/15".parse::<Date>()
        );
        assert_eq!(
            Err(DateParseError::Malformed("2023-10".into())),
            "2023-10".parse::<Date>()
        );
        assert_eq!(
            Err(DateParseError::NotInCalendar {
                year: 2023,
                month: 2,
                day: 30
            }),
            "2023-02-30".parse::<Date>()
        );
    }
}
