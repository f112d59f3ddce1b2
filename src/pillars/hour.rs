//! Hour pillar.
//!
//! A day has thirteen hour windows: early 子 (00:00 to 00:59), the eleven
//! two-hour windows 丑 through 亥, and late 子 (23:00 to 23:59). Stems run on
//! through all thirteen, so late 子 takes the stem after 亥.

use super::Pillar;
use crate::cycle::{Branch, Stem};

/// Position of `hour` (`0..24`) in the day's sequence of hour windows,
/// `0..=12`.
pub fn hour_index(hour: u32) -> u32 {
    debug_assert!(hour < 24);
    (hour + 1) / 2
}

/// Branch of the two-hour window containing `hour` (`0..24`): 23 and 0
/// are 子, 1 and 2 are 丑, and so on.
///
/// ```
/// use saju::cycle::Branch;
/// use saju::pillars::hour::hour_branch;
///
/// assert_eq!(Branch::Zi, hour_branch(23));
/// assert_eq!(Branch::Mao, hour_branch(5));
/// assert_eq!(Branch::Mao, hour_branch(6));
/// ```
pub fn hour_branch(hour: u32) -> Branch {
    Branch::from_index(hour_index(hour) as i64)
}

/// Stem of `hour` on a day with stem `day_stem` (五鼠遁): early 子 takes
/// 甲, 丙, 戊, 庚 or 壬 by the day stem, and each later window the next.
pub fn hour_stem(day_stem: Stem, hour: u32) -> Stem {
    let start = (day_stem.index() % 5) * 2;
    Stem::from_index((start + hour_index(hour) as usize) as i64)
}

/// Hour pillar for the corrected `hour`.
///
/// Hour 23 stays with the day it falls on; the day pillar changes at
/// midnight.
///
/// ```
/// use saju::cycle::Stem;
/// use saju::pillars::hour::hour_pillar;
///
/// assert_eq!("戊子", hour_pillar(0, Stem::Bing).label());
/// assert_eq!("甲午", hour_pillar(12, Stem::Bing).label());
/// assert_eq!("庚子", hour_pillar(23, Stem::Bing).label());
/// ```
pub fn hour_pillar(hour: u32, day_stem: Stem) -> Pillar {
    Pillar::new(hour_stem(day_stem, hour), hour_branch(hour))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{BRANCHES, STEMS};

    #[test]
    fn five_rats() {
        for (day_stem, rat) in [
            (Stem::Jia, "甲子"),
            (Stem::Yi, "丙子"),
            (Stem::Bing, "戊子"),
            (Stem::Ding, "庚子"),
            (Stem::Wu, "壬子"),
            (Stem::Ji, "甲子"),
            (Stem::Gui, "壬子"),
        ] {
            assert_eq!(rat, hour_pillar(0, day_stem).label(), "{day_stem}");
        }
    }

    #[test]
    fn late_rat_follows_pig() {
        for (day_stem, pig, late_rat) in [
            (Stem::Jia, "乙亥", "丙子"),
            (Stem::Bing, "己亥", "庚子"),
            (Stem::Gui, "癸亥", "甲子"),
        ] {
            assert_eq!(pig, hour_pillar(21, day_stem).label(), "{day_stem}");
            assert_eq!(late_rat, hour_pillar(23, day_stem).label(), "{day_stem}");
        }
        assert_ne!(hour_pillar(0, Stem::Bing), hour_pillar(23, Stem::Bing));
    }

    #[test]
    fn each_branch_twice_in_order() {
        for day_stem in STEMS {
            let pillars: Vec<_> = (0..24).map(|h| hour_pillar(h, day_stem)).collect();
            for branch in BRANCHES {
                assert_eq!(2, pillars.iter().filter(|p| p.branch == branch).count());
            }
            for pair in pillars.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.branch == b.branch {
                    assert_eq!(a.stem, b.stem);
                } else {
                    assert_eq!(a.branch.offset(1), b.branch);
                    assert_eq!(a.stem.offset(1), b.stem);
                }
            }
            assert!(pillars.iter().all(|p| p.sexagenary().is_some()));
        }
    }
}
