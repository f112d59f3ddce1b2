//! 月相節氣曆表
//!
//! 曆表即時推算：
//!
//! - 太陽視黃經：取 VSOP87 地球日心黃經主要週期項（Meeus《Astronomical Algorithms》附錄
//!   所列截斷表），再加 FK5 修正、黃經章動與光行差，交節時刻誤差約一分鐘；
//! - 交節時刻：以視黃經迭代求根；
//! - 朔：採同書第 49 章平朔加週期項及行星攝動修正，誤差約數秒。
//!
//! 推算範圍限於 [`SUPPORTED_ANNI`]，範圍外視同無曆表。

use std::ops::RangeInclusive;

use crate::date::Date;
use crate::time_scales::{Tdb, Tt};

/// 有曆表的歲。
pub const SUPPORTED_ANNI: RangeInclusive<i32> = 1900..=2100;

const J2000: f64 = 2451545.0;
const DAYS_PER_DEGREE: f64 = 365.2422 / 360.0;
const SYNODIC_MONTH: f64 = 29.530588861;
const NEW_MOON_EPOCH: f64 = 2451550.09766;

/// 保存一歲的曆表數據
#[derive(Debug, Clone)]
pub struct Annus {
    /// 序號，為該歲大部分時段所在公元年
    pub annus: i32,
    /// 從冬至開始的各節氣時刻，亦含次歲冬至以便計算末日
    pub solar_term: [Tdb; 25],
    /// 朔時刻，列出從冬至前一朔開始的十五個月
    pub new_moon: [Tdb; 15],
}

impl Annus {
    /// 推算公元 `annus` 年對應的歲的曆表。
    ///
    /// 超出 [`SUPPORTED_ANNI`] 則返回 `None`。
    pub fn get(annus: i32) -> Option<Self> {
        if !SUPPORTED_ANNI.contains(&annus) {
            return None;
        }
        let near = Date::from_gregorian(annus - 1, 12, 21)?.jdn() as f64;
        let mut solar_term = [Tdb(0.0); 25];
        for (i, term) in solar_term.iter_mut().enumerate() {
            let longitude = (270.0 + 15.0 * i as f64) % 360.0;
            let guess = Tt(near + i as f64 * 15.0 * DAYS_PER_DEGREE);
            *term = sun_reaches(longitude, guess).into();
        }

        let ws = Tt::from(solar_term[0]);
        let mut k = ((ws.0 - NEW_MOON_EPOCH) / SYNODIC_MONTH).floor() as i64;
        while new_moon(k) > ws {
            k -= 1;
        }
        while new_moon(k + 1) <= ws {
            k += 1;
        }
        let mut moons = [Tdb(0.0); 15];
        for (i, moon) in (k..).zip(moons.iter_mut()) {
            *moon = new_moon(i).into();
        }

        Some(Annus {
            annus,
            solar_term,
            new_moon: moons,
        })
    }
}

/// 太陽視黃經（度，`0.0..360.0`）。
pub fn sun_apparent_longitude(tt: Tt) -> f64 {
    let tau = (tt.0 - J2000) / 365250.0;
    let t = tau * 10.0;
    let series = |terms: &[(f64, f64, f64)]| -> f64 {
        terms.iter().map(|&(a, b, c)| a * (b + c * tau).cos()).sum()
    };
    let l = [&L0[..], &L1, &L2, &L3, &L4, &L5]
        .iter()
        .rev()
        .fold(0.0, |acc, terms| acc * tau + series(terms))
        / 1e8;
    // 地心太陽黃經 = 日心地球黃經 + 180°，再轉 FK5
    let geometric = l.to_degrees() + 180.0 - 0.09033 / 3600.0;

    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let sun_mean = (280.4665 + 36000.7698 * t).to_radians();
    let moon_mean = (218.3165 + 481267.8813 * t).to_radians();
    let nutation = (-17.20 * omega.sin() - 1.32 * (2.0 * sun_mean).sin()
        - 0.23 * (2.0 * moon_mean).sin()
        + 0.21 * (2.0 * omega).sin())
        / 3600.0;
    let aberration = -20.4898 / 3600.0;
    (geometric + nutation + aberration).rem_euclid(360.0)
}

/// 求太陽視黃經達 `longitude` 度的時刻，取最接近 `guess` 者。
pub fn sun_reaches(longitude: f64, guess: Tt) -> Tt {
    let mut jde = guess.0;
    for _ in 0..32 {
        let diff = (longitude - sun_apparent_longitude(Tt(jde)) + 180.0).rem_euclid(360.0) - 180.0;
        let step = diff * DAYS_PER_DEGREE;
        jde += step;
        if step.abs() < 1e-7 {
            break;
        }
    }
    Tt(jde)
}

/// 第 `k` 朔的時刻，`k = 0` 為 2000 年 1 月 6 日之朔。
pub fn new_moon(k: i64) -> Tt {
    let k = k as f64;
    let t = k / 1236.85;
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);

    let jde = NEW_MOON_EPOCH + SYNODIC_MONTH * k + 0.00015437 * t2 - 0.000000150 * t3
        + 0.00000000073 * t4;
    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;
    let m = (2.5534 + 29.10535670 * k - 0.0000014 * t2 - 0.00000011 * t3).to_radians();
    let mp = (201.5643 + 385.81693528 * k + 0.0107582 * t2 + 0.00001238 * t3
        - 0.000000058 * t4)
        .to_radians();
    let f = (160.7108 + 390.67050284 * k - 0.0016118 * t2 - 0.00000227 * t3
        + 0.000000011 * t4)
        .to_radians();
    let omega = (124.7746 - 1.56375588 * k + 0.0020672 * t2 + 0.00000215 * t3).to_radians();

    let periodic = -0.40720 * mp.sin()
        + 0.17241 * e * m.sin()
        + 0.01608 * (2.0 * mp).sin()
        + 0.01039 * (2.0 * f).sin()
        + 0.00739 * e * (mp - m).sin()
        - 0.00514 * e * (mp + m).sin()
        + 0.00208 * e * e * (2.0 * m).sin()
        - 0.00111 * (mp - 2.0 * f).sin()
        - 0.00057 * (mp + 2.0 * f).sin()
        + 0.00056 * e * (2.0 * mp + m).sin()
        - 0.00042 * (3.0 * mp).sin()
        + 0.00042 * e * (m + 2.0 * f).sin()
        + 0.00038 * e * (m - 2.0 * f).sin()
        - 0.00024 * e * (2.0 * mp - m).sin()
        - 0.00017 * omega.sin()
        - 0.00007 * (mp + 2.0 * m).sin()
        + 0.00004 * (2.0 * mp - 2.0 * f).sin()
        + 0.00004 * (3.0 * m).sin()
        + 0.00003 * (mp + m - 2.0 * f).sin()
        + 0.00003 * (2.0 * mp + 2.0 * f).sin()
        - 0.00003 * (mp + m + 2.0 * f).sin()
        + 0.00003 * (mp - m + 2.0 * f).sin()
        - 0.00002 * (mp - m - 2.0 * f).sin()
        - 0.00002 * (3.0 * mp + m).sin()
        + 0.00002 * (4.0 * mp).sin();

    const PLANETARY: [(f64, f64, f64); 14] = [
        (0.000325, 299.77, 0.107408),
        (0.000165, 251.88, 0.016321),
        (0.000164, 251.83, 26.651886),
        (0.000126, 349.42, 36.412478),
        (0.000110, 84.66, 18.206239),
        (0.000062, 141.74, 53.303771),
        (0.000060, 207.14, 2.453732),
        (0.000056, 154.84, 7.306860),
        (0.000047, 34.52, 27.261239),
        (0.000042, 207.19, 0.121824),
        (0.000040, 291.34, 1.844379),
        (0.000037, 161.72, 24.198154),
        (0.000035, 239.56, 25.513099),
        (0.000023, 331.55, 3.592518),
    ];
    let planetary: f64 = PLANETARY
        .iter()
        .enumerate()
        .map(|(i, &(coef, a0, a1))| {
            // A1 carries an extra secular term
            let extra = if i == 0 { -0.009173 * t2 } else { 0.0 };
            coef * (a0 + a1 * k + extra).to_radians().sin()
        })
        .sum();

    Tt(jde + periodic + planetary)
}

// VSOP87 地球日心黃經週期項 (A, B, C)，A 以 1e-8 弧度計
const L0: [(f64, f64, f64); 64] = [
    (175347046.0, 0.0, 0.0),
    (3341656.0, 4.6692568, 6283.07585),
    (34894.0, 4.6261, 12566.1517),
    (3497.0, 2.7441, 5753.3849),
    (3418.0, 2.8289, 3.5231),
    (3136.0, 3.6277, 77713.7715),
    (2676.0, 4.4181, 7860.4194),
    (2343.0, 6.1352, 3930.2097),
    (1324.0, 0.7425, 11506.7698),
    (1273.0, 2.0371, 529.691),
    (1199.0, 1.1096, 1577.3435),
    (990.0, 5.233, 5884.927),
    (902.0, 2.045, 26.298),
    (857.0, 3.508, 398.149),
    (780.0, 1.179, 5223.694),
    (753.0, 2.533, 5507.553),
    (505.0, 4.583, 18849.228),
    (492.0, 4.205, 775.523),
    (357.0, 2.92, 0.067),
    (317.0, 5.849, 11790.629),
    (284.0, 1.899, 796.298),
    (271.0, 0.315, 10977.079),
    (243.0, 0.345, 5486.778),
    (206.0, 4.806, 2544.314),
    (205.0, 1.869, 5573.143),
    (202.0, 2.458, 6069.777),
    (156.0, 0.833, 213.299),
    (132.0, 3.411, 2942.463),
    (126.0, 1.083, 20.775),
    (115.0, 0.645, 0.98),
    (103.0, 0.636, 4694.003),
    (102.0, 0.976, 15720.839),
    (102.0, 4.267, 7.114),
    (99.0, 6.21, 2146.17),
    (98.0, 0.68, 155.42),
    (86.0, 5.98, 161000.69),
    (85.0, 1.3, 6275.96),
    (85.0, 3.67, 71430.7),
    (80.0, 1.81, 17260.15),
    (79.0, 3.04, 12036.46),
    (75.0, 1.76, 5088.63),
    (74.0, 3.5, 3154.69),
    (74.0, 4.68, 801.82),
    (70.0, 0.83, 9437.76),
    (62.0, 3.98, 8827.39),
    (61.0, 1.82, 7084.9),
    (57.0, 2.78, 6286.6),
    (56.0, 4.39, 14143.5),
    (56.0, 3.47, 6279.55),
    (52.0, 0.19, 12139.55),
    (52.0, 1.33, 1748.02),
    (51.0, 0.28, 5856.48),
    (49.0, 0.49, 1194.45),
    (41.0, 5.37, 8429.24),
    (41.0, 2.4, 19651.05),
    (39.0, 6.17, 10447.39),
    (37.0, 6.04, 10213.29),
    (37.0, 2.57, 1059.38),
    (36.0, 1.71, 2352.87),
    (36.0, 1.78, 6812.77),
    (33.0, 0.59, 17789.85),
    (30.0, 0.44, 83996.85),
    (30.0, 2.74, 1349.87),
    (25.0, 3.16, 4690.48),
];

const L1: [(f64, f64, f64); 34] = [
    (628331966747.0, 0.0, 0.0),
    (206059.0, 2.678235, 6283.07585),
    (4303.0, 2.6351, 12566.1517),
    (425.0, 1.59, 3.523),
    (119.0, 5.796, 26.298),
    (109.0, 2.966, 1577.344),
    (93.0, 2.59, 18849.23),
    (72.0, 1.14, 529.69),
    (68.0, 1.87, 398.15),
    (67.0, 4.41, 5507.55),
    (59.0, 2.89, 5223.69),
    (56.0, 2.17, 155.42),
    (45.0, 0.4, 796.3),
    (36.0, 0.47, 775.52),
    (29.0, 2.65, 7.11),
    (21.0, 5.34, 0.98),
    (19.0, 1.85, 5486.78),
    (19.0, 4.97, 213.3),
    (17.0, 2.99, 6275.96),
    (16.0, 0.03, 2544.31),
    (16.0, 1.43, 2146.17),
    (15.0, 1.21, 10977.08),
    (12.0, 2.83, 1748.02),
    (12.0, 3.26, 5088.63),
    (12.0, 5.27, 1194.45),
    (12.0, 2.08, 4694.0),
    (11.0, 0.77, 553.57),
    (10.0, 1.3, 6286.6),
    (10.0, 4.24, 1349.87),
    (9.0, 2.7, 242.73),
    (9.0, 5.64, 951.72),
    (8.0, 5.3, 2352.87),
    (6.0, 2.65, 9437.76),
    (6.0, 4.67, 4690.48),
];

const L2: [(f64, f64, f64); 20] = [
    (52919.0, 0.0, 0.0),
    (8720.0, 1.0721, 6283.0758),
    (309.0, 0.867, 12566.152),
    (27.0, 0.05, 3.52),
    (16.0, 5.19, 26.3),
    (16.0, 3.68, 155.42),
    (10.0, 0.76, 18849.23),
    (9.0, 2.06, 77713.77),
    (7.0, 0.83, 775.52),
    (5.0, 4.66, 1577.34),
    (4.0, 1.03, 7.11),
    (4.0, 3.44, 5573.14),
    (3.0, 5.14, 796.3),
    (3.0, 6.05, 5507.55),
    (3.0, 1.19, 242.73),
    (3.0, 6.12, 529.69),
    (3.0, 0.31, 398.15),
    (3.0, 2.28, 553.57),
    (2.0, 4.38, 5223.69),
    (2.0, 3.75, 0.98),
];

const L3: [(f64, f64, f64); 7] = [
    (289.0, 5.844, 6283.076),
    (35.0, 0.0, 0.0),
    (17.0, 5.49, 12566.15),
    (3.0, 5.2, 155.42),
    (1.0, 4.72, 3.52),
    (1.0, 5.3, 18849.23),
    (1.0, 5.97, 242.73),
];

const L4: [(f64, f64, f64); 3] = [
    (114.0, 3.142, 0.0),
    (8.0, 4.13, 6283.08),
    (1.0, 3.84, 12566.15),
];

const L5: [(f64, f64, f64); 1] = [
    (1.0, 3.14, 0.0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_scales::Ut;

    fn date_cst(tdb: Tdb) -> Date {
        Ut::convert(tdb).date_in_timezone(480)
    }

    #[test]
    fn solar_terms() {
        let annus = Annus::get(2000).unwrap();
        let date = date_cst(annus.solar_term[0]);
        assert_eq!("1999-12-22", date.iso_gregorian());
        let date = date_cst(annus.solar_term[24]);
        assert_eq!("2000-12-21", date.iso_gregorian());
    }

    #[test]
    fn new_moons() {
        let annus = Annus::get(2000).unwrap();
        let date = date_cst(annus.new_moon[0]);
        assert_eq!("1999-12-08", date.iso_gregorian());
    }

    #[test]
    fn new_moon_of_epoch() {
        // 2000-01-06 18:14 UT
        let ut = Ut::convert(new_moon(0));
        let expected = Date::from_gregorian(2000, 1, 6).unwrap().jdn() as f64 - 0.5 + 18.233 / 24.0;
        assert!((ut.0 - expected).abs() < 5.0 / 1440.0, "{}", ut.0);
    }

    #[test]
    fn sun_longitude_at_equinox() {
        // March equinox 2000: 2000-03-20 07:35 UT
        let jd = Date::from_gregorian(2000, 3, 20).unwrap().jdn() as f64 - 0.5 + 7.583 / 24.0;
        let tt = Ut(jd).to_tt();
        let lon = sun_apparent_longitude(tt);
        let diff = (lon + 180.0).rem_euclid(360.0) - 180.0;
        assert!(diff.abs() < 0.002, "{lon}");
    }

    #[test]
    fn sun_reaches_target() {
        let tt = sun_reaches(315.0, Tt(2460345.0));
        assert!((sun_apparent_longitude(tt) - 315.0).abs() < 1e-5);
        // 立春 2024: 2024-02-04 08:27 UT
        let expected = Date::from_gregorian(2024, 2, 4).unwrap().jdn() as f64 - 0.5 + 8.45 / 24.0;
        assert!((Ut::convert(tt).0 - expected).abs() < 3.0 / 1440.0);
    }

    #[test]
    fn out_of_range() {
        assert!(Annus::get(1899).is_none());
        assert!(Annus::get(2101).is_none());
        assert!(Annus::get(1900).is_some());
    }
}
