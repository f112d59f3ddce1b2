//! 夏曆（農曆）及二十四節氣
//!
//! 術語繁多，本模塊文檔用中文。
//!
//! 曆表即時推算，見 [`ephemeris`]。曆日以所給時區劃分：韓國用 UTC+9（540 分鐘），
//! 中國用 UTC+8（480 分鐘），兩者偶有閏月不同。

use serde::ser::{Serialize, Serializer};

use crate::date::Date;
use crate::time_scales::{Tdb, Tt, Ut};

pub mod ephemeris;
pub mod fmt;

/// 「歲」：自含冬至之月（十一月）起，至含次一冬至之月前止。
///
/// 年以正月為首，歲以十一月為首；置閏須以兩冬至間的朔望月數決定，故按歲編排，
/// 再由日期求其所在之年。
///
/// ```
/// use saju::Date;
/// use saju::chinese::{Annus, Month::*};
///
/// let date = Date::from_gregorian(2000, 1, 1).unwrap();
/// let annus = Annus::from_date(date, 480).unwrap();
///
/// assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
/// ```
#[derive(Debug, Clone)]
pub struct Annus {
    /// 次一冬至所在公元年
    pub annus: i32,
    /// 東於 UTC 的分鐘數
    pub utc_offset_minutes: i32,
    pub ephemeris: ephemeris::Annus,
    /// 各月起點，末項為次歲十一月
    pub months: Vec<NewMoon>,
}
/// 一個月的起點。
#[derive(Debug, Copy, Clone)]
pub struct NewMoon {
    pub month: Month,
    /// 朔日
    pub date: Date,
}

/// 月序號及平閏。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    pub fn num(&self) -> u32 {
        match *self {
            Month::Common(n) | Month::Leap(n) => n,
        }
    }

    pub fn is_leap(&self) -> bool {
        matches!(self, Month::Leap(_))
    }

    /// 如「冬月」「閏六月」，見 [`fmt::month`]。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// 節氣在曆表中的序號（0 為冬至）轉為 [`SolarTerm`]。
fn term_from_index(idx: usize) -> SolarTerm {
    SolarTerm((idx as u32 + 21) % 24 + 1)
}

impl Annus {
    /// 公元 `annus` 年對應的歲，曆日以東於 UTC `utc_offset_minutes` 分鐘的時區劃分。
    ///
    /// 無曆表（見 [`ephemeris::SUPPORTED_ANNI`]）則返回 `None`。
    ///
    /// 兩冬至間有十三個朔望月時置閏，閏於其中第一個不含中氣之月。
    ///
    /// ```
    /// use saju::chinese::Annus;
    ///
    /// let annus = Annus::new(2000, 480).unwrap();
    /// assert_eq!(13, annus.months.len());
    /// ```
    pub fn new(annus: i32, utc_offset_minutes: i32) -> Option<Self> {
        let ephemeris = ephemeris::Annus::get(annus)?;
        let local = |tdb: Tdb| local_date(tdb, utc_offset_minutes);
        let starts: Vec<Date> = ephemeris.new_moon.iter().map(|&t| local(t)).collect();
        // 中氣：冬至、大寒、雨水……小雪、次歲冬至
        let principal: Vec<Date> = ephemeris
            .solar_term
            .iter()
            .step_by(2)
            .map(|&t| local(t))
            .collect();
        let (solstice, next_solstice) = (*principal.first()?, *principal.last()?);

        // 含冬至之月為十一月，次歲十一月亦列入以標記本歲末日
        let first = starts.partition_point(|&d| d <= solstice).checked_sub(1)?;
        let last = starts.partition_point(|&d| d <= next_solstice).checked_sub(1)?;
        let mut leap_pending = match last - first {
            12 => false,
            13 => true,
            _ => return None,
        };

        let mut months = Vec::with_capacity(last - first + 1);
        let mut num = 10;
        let mut next_principal = principal.iter();
        let mut due = next_principal.next();
        for (i, &date) in starts.iter().enumerate().take(last + 1).skip(first) {
            let ends_before_due = starts
                .get(i + 1)
                .zip(due)
                .is_some_and(|(next, due)| next <= due);
            if leap_pending && ends_before_due {
                months.push(NewMoon {
                    month: Month::Leap(num),
                    date,
                });
                leap_pending = false;
            } else {
                num = num % 12 + 1;
                months.push(NewMoon {
                    month: Month::Common(num),
                    date,
                });
                due = next_principal.next();
            }
        }
        if leap_pending {
            return None;
        }

        Some(Annus {
            annus,
            utc_offset_minutes,
            ephemeris,
            months,
        })
    }

    /// 日期 `date` 所在之歲。無曆表則返回 `None`。
    ///
    /// ```
    /// use saju::Date;
    /// use saju::chinese::Annus;
    ///
    /// let date = Date::from_gregorian(1999, 12, 31).unwrap();
    /// assert_eq!(2000, Annus::from_date(date, 480).unwrap().annus);
    /// ```
    pub fn from_date(date: Date, utc_offset_minutes: i32) -> Option<Self> {
        // 1900 歲始於 1899 年十二月
        let mut guess = date.year().max(*ephemeris::SUPPORTED_ANNI.start());
        loop {
            let annus = Self::new(guess, utc_offset_minutes)?;
            match annus.locate(date) {
                Ok(()) => return Some(annus),
                Err(OtherAnnus::Before) => guess -= 1,
                Err(OtherAnnus::After) => guess += 1,
            }
        }
    }

    fn locate(&self, date: Date) -> Result<(), OtherAnnus> {
        let (first, last) = match (self.months.first(), self.months.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => return Err(OtherAnnus::After),
        };
        if date < first {
            Err(OtherAnnus::Before)
        } else if date >= last {
            Err(OtherAnnus::After)
        } else {
            Ok(())
        }
    }

    /// 日期 `date` 的農曆 `(年, 月, 日)`。
    ///
    /// 十一月、十二月（及其閏月）屬上一年。日期不在該歲則回報其在前或在後。
    ///
    /// ```
    /// use saju::Date;
    /// use saju::chinese::{Annus, Month::*};
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let annus = Annus::from_date(date, 480).unwrap();
    ///
    /// assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
    /// ```
    pub fn ymd_for(&self, date: Date) -> Result<(i32, Month, u32), OtherAnnus> {
        self.locate(date)?;
        let start = self
            .months
            .iter()
            .rev()
            .find(|m| m.date <= date)
            .ok_or(OtherAnnus::Before)?;
        let day = (date - start.date + 1) as u32;
        let year = if start.month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        };
        Ok((year, start.month, day))
    }

    /// 日期 `date` 所在節氣：`(節氣所屬之歲, 節氣, 交節後日數)`，交節當日日數為 0。
    ///
    /// 歲首至冬至前的日子落在前一歲的小雪或大雪，故所屬之歲可能是 `annus - 1`。
    /// 次歲冬至及其後回報 `After`。
    ///
    /// ```
    /// use saju::Date;
    /// use saju::chinese::Annus;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let annus = Annus::from_date(date, 480).unwrap();
    ///
    /// let (annus_num, term, days) = annus.solar_term_for(date).unwrap();
    /// assert_eq!((2000, "冬至", 10), (annus_num, term.name(), days));
    /// ```
    pub fn solar_term_for(&self, date: Date) -> Result<(i32, SolarTerm, u32), SolarTermErr> {
        let local = |tdb: Tdb| local_date(tdb, self.utc_offset_minutes);
        let latest = |terms: &[Tdb]| {
            terms
                .iter()
                .map(|&t| local(t))
                .enumerate()
                .rev()
                .find(|&(_, begin)| begin <= date)
        };
        if self.months.first().is_none_or(|m| date < m.date) {
            return Err(SolarTermErr::OtherAnnus(OtherAnnus::Before));
        }
        if date >= local(self.ephemeris.solar_term[24]) {
            return Err(SolarTermErr::OtherAnnus(OtherAnnus::After));
        }
        let (annus, (idx, begin)) = match latest(&self.ephemeris.solar_term[..24]) {
            Some(hit) => (self.annus, hit),
            None => {
                let previous =
                    ephemeris::Annus::get(self.annus - 1).ok_or(SolarTermErr::NoData)?;
                let hit = latest(&previous.solar_term[..24]).ok_or(SolarTermErr::NoData)?;
                (self.annus - 1, hit)
            }
        };
        Ok((annus, term_from_index(idx), (date - begin) as u32))
    }
}

/// 表示給定日期不在該歲，並指出其在前還是在後。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherAnnus {
    Before,
    After,
}

/// 表示給定日期不在該歲，或無法取得節氣數據。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolarTermErr {
    NoData,
    OtherAnnus(OtherAnnus),
}

/// 將給定曆表時間轉為東於 UTC `utc_offset_minutes` 分鐘之時區的日期。
pub fn local_date(tdb: Tdb, utc_offset_minutes: i32) -> Date {
    Ut::convert(tdb).date_in_timezone(utc_offset_minutes)
}

/// 農曆日期。僅供參考，四柱不依賴之。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    pub lunar_year: i32,
    pub lunar_month: u32,
    pub lunar_day: u32,
    pub is_leap_month: bool,
}

impl LunarDate {
    pub fn month(&self) -> Month {
        if self.is_leap_month {
            Month::Leap(self.lunar_month)
        } else {
            Month::Common(self.lunar_month)
        }
    }
}

impl std::fmt::Display for LunarDate {
    /// 如「2017年閏六月初一」。
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}年{}{}",
            self.lunar_year,
            self.month().name(),
            fmt::day(self.lunar_day)
        )
    }
}

/// 取得公曆日期對應的農曆日期，曆日以東於 UTC `utc_offset_minutes` 分鐘的時區劃分。
///
/// 超出曆表範圍則返回 `None`。
///
/// # 用例
///
/// ```
/// use saju::Date;
/// use saju::chinese::lunar_date;
///
/// let date = Date::from_gregorian(2017, 7, 23).unwrap();
/// let lunar = lunar_date(date, 480).unwrap();
/// assert_eq!(
///     (2017, 6, 1, true),
///     (lunar.lunar_year, lunar.lunar_month, lunar.lunar_day, lunar.is_leap_month)
/// );
/// assert_eq!(None, lunar_date(Date::from_gregorian(1850, 1, 1).unwrap(), 480));
/// ```
pub fn lunar_date(date: Date, utc_offset_minutes: i32) -> Option<LunarDate> {
    let annus = Annus::from_date(date, utc_offset_minutes)?;
    let (lunar_year, month, lunar_day) = annus.ymd_for(date).ok()?;
    Some(LunarDate {
        lunar_year,
        lunar_month: month.num(),
        lunar_day,
        is_leap_month: month.is_leap(),
    })
}

/// 二十四節氣，序號 `1..=24` 依次為立春到大寒。
///
/// 奇數序號為「節」（立春、驚蟄……小寒），偶數為「中氣」（雨水、春分……大寒）。
/// 自某節至次節的時段為一「節月」，月柱地支依節月而定。
///
/// # 用例
///
/// ```
/// use saju::chinese::SolarTerm;
///
/// let term = SolarTerm::new(6).unwrap();
/// assert_eq!("穀雨", term.name());
/// assert_eq!(30.0, term.longitude());
/// assert_eq!(2, term.period());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SolarTerm(u32);

impl SolarTerm {
    /// `num` 須在 `1..=24` 間，否則返回 `None`。
    pub fn new(num: u32) -> Option<Self> {
        (1..=24).contains(&num).then_some(Self(num))
    }
    /// 取得某時刻所在節氣，即太陽視黃經最近越過的節氣點。
    ///
    /// 不受曆表範圍限制。
    pub fn at(tt: Tt) -> Self {
        let lon = ephemeris::sun_apparent_longitude(tt);
        let idx = ((lon - 315.0).rem_euclid(360.0) / 15.0).floor() as u32;
        Self(idx.min(23) + 1)
    }
    pub fn num(self) -> u32 {
        self.0
    }
    pub fn name(self) -> &'static str {
        fmt::solar_term(self.0)
    }
    /// 節氣點的太陽視黃經（度）。
    pub fn longitude(self) -> f64 {
        ((self.0 - 1) as f64 * 15.0 + 315.0) % 360.0
    }
    /// 是否為「節」。
    pub fn is_sectional(self) -> bool {
        self.0 % 2 == 1
    }
    /// 所在節月序號 `0..12`，0 為立春至驚蟄前（寅月）。
    pub fn period(self) -> u32 {
        (self.0 - 1) / 2
    }
    /// 取得公曆 `year` 年內該節氣的交節時刻（小寒、大寒在一月，其餘依次在後）。
    ///
    /// `year` 的一月一日早於儒略日 0 則返回 `None`。
    ///
    /// ```
    /// use saju::chinese::SolarTerm;
    /// use saju::time_scales::Ut;
    ///
    /// let lichun = SolarTerm::new(1).unwrap().instant_in(2024).unwrap();
    /// assert_eq!("2024-02-04", Ut::convert(lichun).date_in_timezone(540).iso_gregorian());
    /// ```
    pub fn instant_in(self, year: i32) -> Option<Tt> {
        let days_after_new_year = (35.0 + 15.2184 * (self.0 - 1) as f64) % 365.2422;
        let jan1 = Date::from_gregorian(year, 1, 1)?.jdn() as f64;
        Some(ephemeris::sun_reaches(
            self.longitude(),
            Tt(jan1 - 1.0 + days_after_new_year),
        ))
    }
}

impl std::fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SolarTerm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
