//! Day pillar.

use super::Pillar;
use crate::cycle::Sexagenary;
use crate::date::Date;

/// 1900-01-01, a 甲戌 day.
const EPOCH_JDN: i64 = 2415021;
const EPOCH_INDEX: i64 = 10;

/// Day pillar of `date`, counted continuously through the sexagenary
/// cycle.
///
/// The date must already be corrected to true solar time: a correction
/// across midnight changes the day.
///
/// ```
/// use saju::Date;
/// use saju::pillars::day::day_pillar;
///
/// let date = Date::from_gregorian(2023, 10, 15).unwrap();
/// assert_eq!("丙午", day_pillar(date).label());
/// ```
pub fn day_pillar(date: Date) -> Pillar {
    Pillar::from_sexagenary(Sexagenary::from_index(
        date.jdn() as i64 - EPOCH_JDN + EPOCH_INDEX,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: i32, d: i32) -> String {
        day_pillar(Date::from_gregorian(y, m, d).unwrap()).label()
    }

    #[test]
    fn epoch() {
        assert_eq!(Some(EPOCH_JDN as u32), Date::from_gregorian(1900, 1, 1).map(|d| d.jdn()));
        assert_eq!("甲戌", day(1900, 1, 1));
        assert_eq!("癸酉", day(1899, 12, 31));
    }

    #[test]
    fn almanac_days() {
        for (std, (y, m, d)) in [
            ("戊午", (2000, 1, 1)),
            ("甲子", (2000, 1, 7)),
            ("丙午", (2023, 10, 15)),
            ("甲辰", (2024, 2, 10)),
            ("甲子", (1949, 10, 1)),
        ] {
            assert_eq!(std, day(y, m, d), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn sixty_day_period() {
        let start = Date::from_gregorian(1986, 5, 26).unwrap();
        for offset in 0..400 {
            let date = start + offset;
            assert_eq!(day_pillar(date), day_pillar(date + 60));
            assert_ne!(day_pillar(date), day_pillar(date + 1));
        }
    }
}
