//! Month pillar.
//!
//! Months here are solar: the twelve periods between successive sectional
//! terms (節), the first beginning at 立春. The lunar month plays no part.

use tracing::trace;

use super::Pillar;
use crate::chinese::SolarTerm;
use crate::cycle::{Branch, Stem};
use crate::solar_time::TrueSolarTime;

/// Branch of solar month `period` (`0..12`); period 0 is 寅.
pub fn month_branch(period: u32) -> Branch {
    Branch::Yin.offset(period as i64)
}

/// Stem of solar month `period` in a year with stem `year_stem` (五虎遁).
///
/// The year stems pair up as 甲己, 乙庚, 丙辛, 丁壬, 戊癸, which open the
/// year with 丙寅, 戊寅, 庚寅, 壬寅 and 甲寅 respectively.
///
/// ```
/// use saju::cycle::Stem;
/// use saju::pillars::month::month_stem;
///
/// assert_eq!(Stem::Bing, month_stem(Stem::Jia, 0));
/// assert_eq!(Stem::Jia, month_stem(Stem::Gui, 0));
/// assert_eq!(Stem::Ren, month_stem(Stem::Gui, 8));
/// ```
pub fn month_stem(year_stem: Stem, period: u32) -> Stem {
    let start = (year_stem.index() % 5) * 2 + 2;
    Stem::from_index((start + period as usize) as i64)
}

/// Month pillar at the corrected moment `solar`, given the stem of the
/// year pillar for its civil year.
///
/// The 子 and 丑 months of January and early February opened in the
/// previous civil year, so the previous year's stem leads them.
pub fn month_pillar(solar: &TrueSolarTime, year_stem: Stem) -> Pillar {
    let term = SolarTerm::at(solar.ut().to_tt());
    let period = term.period();
    let (_, civil_month, _) = solar.date().gregorian();
    let leading_stem = if period >= 10 && civil_month <= 2 {
        year_stem.offset(-1)
    } else {
        year_stem
    };
    trace!(term = term.name(), period, %leading_stem, "solar month");
    Pillar::new(month_stem(leading_stem, period), month_branch(period))
}
