//! Time scales used by the ephemeris and by clocks.
//!
//! The sun and moon are computed in dynamical time (TT/TDB); birth times
//! and calendar days are reckoned in universal time. ΔT links the two.

use crate::date::Date;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Barycentric Dynamical Time as a Julian date.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tdb(pub f64);

/// Terrestrial Time as a Julian date.
///
/// TT and TDB never drift more than a couple of milliseconds apart, so they
/// convert into each other unchanged.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

impl From<Tdb> for Tt {
    fn from(tdb: Tdb) -> Tt {
        Tt(tdb.0)
    }
}

impl From<Tt> for Tdb {
    fn from(tt: Tt) -> Tdb {
        Tdb(tt.0)
    }
}

/// Universal Time as a Julian date: the scale civil clocks follow.
///
/// UTC and UT1 are not told apart.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// Dynamical time less [`delta_t`].
    ///
    /// ```
    /// use saju::time_scales::{Tt, Ut};
    ///
    /// // ΔT was about 64 s at J2000
    /// let ut = Ut::convert(Tt(2451545.0));
    /// assert!(((2451545.0 - ut.0) * 86400.0 - 63.8).abs() < 1.0);
    /// ```
    pub fn convert<T>(time: T) -> Self
    where
        T: Into<Tt>,
    {
        let tt = time.into();
        Ut(tt.0 - delta_t(tt) / SECONDS_PER_DAY)
    }
    /// Inverse of [`Ut::convert`].
    pub fn to_tt(self) -> Tt {
        // ΔT varies by well under a second per day, so evaluating it at the
        // UT instant instead of the TT instant is exact enough.
        Tt(self.0 + delta_t(Tt(self.0)) / SECONDS_PER_DAY)
    }
    /// Instant of a wall-clock reading `seconds_of_day` into `date`, on a
    /// clock `utc_offset_seconds` ahead of UTC.
    ///
    /// ```
    /// use saju::Date;
    /// use saju::time_scales::Ut;
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let ut = Ut::from_local(date, 12 * 3600, 0);
    /// assert_eq!(2451545.0, ut.0);
    /// ```
    pub fn from_local(date: Date, seconds_of_day: u32, utc_offset_seconds: i32) -> Self {
        let secs = seconds_of_day as f64 - utc_offset_seconds as f64;
        Ut(date.jdn() as f64 - 0.5 + secs / SECONDS_PER_DAY)
    }
    /// Calendar day of this instant on a clock `tz_offset_minutes` ahead of
    /// UTC (540 for KST).
    ///
    /// ```
    /// use saju::time_scales::Ut;
    ///
    /// // 2000-01-01 20:00 UTC
    /// let ut = Ut(2451545.0 + 8.0 / 24.0);
    /// assert_eq!((2000, 1, 1), ut.date_in_timezone(0).gregorian());
    /// assert_eq!((2000, 1, 2), ut.date_in_timezone(540).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + tz_offset_minutes as f64 / 1440.0).round() as u32;
        Date::from_jdn(jdn)
    }
}

/// Estimates ΔT = TT − UT in seconds.
///
/// Polynomial fits by Espenak and Meeus are used between 1900 and 2150; the
/// long-term parabola of Morrison and Stephenson outside, so the estimate is
/// defined (though increasingly rough) for any date.
pub fn delta_t<T: Into<Tt>>(tt: T) -> f64 {
    let tt = tt.into();
    let y = (tt.0 - 2451544.5) / 365.2425 + 2000.0;
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };
    match y {
        y if y < 1900.0 => long_term(y),
        y if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                - 0.000197 * t.powi(4)
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                + 0.0017275 * t.powi(3)
                + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ut_lags_dynamical_time() {
        // 1999-12-29 16:00 TDB is still the 29th in UTC and the 30th in KST
        let tdb = Tdb(2451542.166666667);
        let ut = Ut::convert(tdb);
        assert!((tdb.0 - ut.0) * SECONDS_PER_DAY > 60.0);
        assert_eq!((1999, 12, 29), ut.date_in_timezone(0).gregorian());
        assert_eq!((1999, 12, 30), ut.date_in_timezone(540).gregorian());
    }

    #[test]
    fn round_trip() {
        let ut = Ut(2460233.125);
        let back = Ut::convert(ut.to_tt());
        assert!((back.0 - ut.0).abs() * SECONDS_PER_DAY < 1e-3);
    }

    #[test]
    fn local_midnight() {
        let date = Date::from_gregorian(2023, 10, 15).unwrap();
        let ut = Ut::from_local(date, 0, 9 * 3600);
        assert_eq!((2023, 10, 14), ut.date_in_timezone(0).gregorian());
        assert_eq!((2023, 10, 15), ut.date_in_timezone(540).gregorian());
    }

    #[test]
    fn delta_t_known_values() {
        // Observed values: 1900 ≈ −2.7 s, 1950 ≈ 29.1 s, 2000 ≈ 63.8 s.
        for (year, observed) in [(1900, -2.7), (1950, 29.1), (2000, 63.8)] {
            let jd = Date::from_gregorian(year, 1, 1).unwrap().jdn() as f64;
            let est = delta_t(Tt(jd));
            assert!((est - observed).abs() < 1.5, "{year}: {est}");
        }
    }

    #[test]
    fn delta_t_is_continuous_enough() {
        let mut last = delta_t(Tt(2415020.5));
        for day in (1..=73000).step_by(30) {
            let now = delta_t(Tt(2415020.5 + day as f64));
            assert!((now - last).abs() < 3.0, "jump at day {day}");
            last = now;
        }
    }
}
