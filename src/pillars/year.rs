//! Year pillar.

use super::Pillar;
use crate::cycle::Sexagenary;

/// Year pillar of a proleptic Gregorian `year`. Year 4 CE was 甲子, so
/// the pillar repeats every 60 years from there.
///
/// ```
/// use saju::pillars::year::year_pillar;
///
/// assert_eq!("丙寅", year_pillar(1986).label());
/// assert_eq!("癸卯", year_pillar(2023).label());
/// ```
pub fn year_pillar(year: i32) -> Pillar {
    Pillar::from_sexagenary(Sexagenary::from_index(year as i64 - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_years() {
        for (std, year) in [
            ("甲子", 4),
            ("甲子", 1984),
            ("庚子", 1900),
            ("己卯", 1999),
            ("庚辰", 2000),
            ("甲辰", 2024),
            ("甲子", -56),
        ] {
            assert_eq!(std, year_pillar(year).label(), "{year}");
        }
    }

    #[test]
    fn sixty_year_closure() {
        for year in 1850..2150 {
            assert_eq!(year_pillar(year), year_pillar(year + 60));
            assert!(year_pillar(year).sexagenary().is_some());
        }
    }
}
