//! Spirit detectors. Each one is an independent predicate over the whole
//! chart, asked about one position at a time.

use super::Spirit;
use crate::cycle::{Branch, Stem};
use crate::pillars::{FourPillars, Position};

/// A predicate naming the label it produces.
pub struct Detector {
    pub name: &'static str,
    pub spirit: Spirit,
    pub fires: fn(&FourPillars, Position) -> bool,
}

/// All detectors, in evaluation order. Order does not affect the result;
/// [`rank`](super::rank) decides between labels.
pub const DETECTORS: [Detector; 16] = [
    triad_detector::<0>("triad/robbery"),
    triad_detector::<1>("triad/disaster"),
    triad_detector::<2>("triad/heaven-killing"),
    triad_detector::<3>("triad/earth-killing"),
    triad_detector::<4>("triad/year-spirit"),
    triad_detector::<5>("triad/month-spirit"),
    triad_detector::<6>("triad/ruin"),
    triad_detector::<7>("triad/general"),
    triad_detector::<8>("triad/saddle"),
    triad_detector::<9>("triad/horse"),
    triad_detector::<10>("triad/six-harm"),
    triad_detector::<11>("triad/canopy"),
    Detector {
        name: "six-harm",
        spirit: Spirit::SixHarm,
        fires: six_harm,
    },
    Detector {
        name: "stem-clash",
        spirit: Spirit::HeavenKilling,
        fires: stem_clash,
    },
    Detector {
        name: "white-tiger",
        spirit: Spirit::Disaster,
        fires: white_tiger,
    },
    Detector {
        name: "kuigang",
        spirit: Spirit::General,
        fires: kuigang,
    },
];

const fn triad_detector<const LABEL: usize>(name: &'static str) -> Detector {
    Detector {
        name,
        spirit: Spirit::ALL[LABEL],
        fires: triad::<LABEL>,
    }
}

/// Branch of 劫殺 for a year branch.
///
/// The three branches of a three-harmony group (申子辰, 寅午戌, 巳酉丑,
/// 亥卯未) share it; it lies three branches before the group's 生地.
pub fn robbery_branch(year_branch: Branch) -> Branch {
    let b = year_branch.index() as i64;
    // b + 4k ≡ b + k (mod 3), so k = (2 - b) mod 3 picks the 生地
    let birth = b + 4 * (2 - b).rem_euclid(3);
    Branch::from_index(birth - 3)
}

/// Fires when the position's branch sits `LABEL` steps after the year's
/// 劫殺 branch. Not asked about the year itself.
fn triad<const LABEL: usize>(pillars: &FourPillars, pos: Position) -> bool {
    if pos == Position::Year {
        return false;
    }
    let start = robbery_branch(pillars.year.branch).index();
    let branch = pillars.get(pos).branch.index();
    (branch + 12 - start) % 12 == LABEL
}

/// 六害: 子未, 丑午, 寅巳, 卯辰, 申亥, 酉戌.
pub fn harms(a: Branch, b: Branch) -> bool {
    (a.index() + b.index()) % 12 == 7
}

fn six_harm(pillars: &FourPillars, pos: Position) -> bool {
    let branch = pillars.get(pos).branch;
    pillars
        .iter()
        .any(|(other, p)| other != pos && harms(branch, p.branch))
}

/// Whether `attacker` controls `target` with the same polarity (七殺).
pub fn clashes(attacker: Stem, target: Stem) -> bool {
    attacker.element().controls() == target.element() && attacker.polarity() == target.polarity()
}

/// Fires when a neighbouring pillar's stem clashes with this one.
fn stem_clash(pillars: &FourPillars, pos: Position) -> bool {
    let idx = pos.index();
    let target = pillars.get(pos).stem;
    [idx.checked_sub(1), Some(idx + 1)]
        .into_iter()
        .flatten()
        .filter_map(|i| Position::ALL.get(i))
        .any(|&n| clashes(pillars.get(n).stem, target))
}

/// 白虎大殺 pillars.
const WHITE_TIGER: [(Stem, Branch); 7] = [
    (Stem::Jia, Branch::Chen),
    (Stem::Yi, Branch::Wei),
    (Stem::Bing, Branch::Xu),
    (Stem::Ding, Branch::Chou),
    (Stem::Wu, Branch::Chen),
    (Stem::Ren, Branch::Xu),
    (Stem::Gui, Branch::Chou),
];

/// 魁罡 pillars.
const KUIGANG: [(Stem, Branch); 5] = [
    (Stem::Geng, Branch::Chen),
    (Stem::Geng, Branch::Xu),
    (Stem::Ren, Branch::Chen),
    (Stem::Ren, Branch::Xu),
    (Stem::Wu, Branch::Xu),
];

fn listed(list: &[(Stem, Branch)], pillars: &FourPillars, pos: Position) -> bool {
    let p = pillars.get(pos);
    list.contains(&(p.stem, p.branch))
}

fn white_tiger(pillars: &FourPillars, pos: Position) -> bool {
    listed(&WHITE_TIGER, pillars, pos)
}

fn kuigang(pillars: &FourPillars, pos: Position) -> bool {
    listed(&KUIGANG, pillars, pos)
}
