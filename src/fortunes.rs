//! Twelve Fortunes (十二運星): the life stage of a branch relative to the
//! day master.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cycle::{Branch, Stem};

/// The twelve life stages in cycle order, from birth to nurture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LifeStage {
    #[serde(rename = "長生")]
    Birth,
    #[serde(rename = "沐浴")]
    Bath,
    #[serde(rename = "冠帶")]
    Cap,
    #[serde(rename = "臨官")]
    Office,
    #[serde(rename = "帝旺")]
    Peak,
    #[serde(rename = "衰")]
    Decline,
    #[serde(rename = "病")]
    Sickness,
    #[serde(rename = "死")]
    Death,
    #[serde(rename = "墓")]
    Burial,
    #[serde(rename = "絶")]
    Extinction,
    #[serde(rename = "胎")]
    Gestation,
    #[serde(rename = "養")]
    Nurture,
}

impl LifeStage {
    pub const ALL: [LifeStage; 12] = {
        use LifeStage::*;
        [
            Birth, Bath, Cap, Office, Peak, Decline, Sickness, Death, Burial, Extinction,
            Gestation, Nurture,
        ]
    };

    pub fn hanja(self) -> &'static str {
        [
            "長生", "沐浴", "冠帶", "臨官", "帝旺", "衰", "病", "死", "墓", "絶", "胎", "養",
        ][self as usize]
    }
}

/// Direction a stem's stages run through the branches.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// Branch of 長生 and the direction of travel for every stem. Yang stems
/// run forward, yin stems backward.
const CYCLE_START: [(Branch, Direction); 10] = {
    use Branch::*;
    use Direction::*;
    [
        (Hai, Forward),
        (Wu, Backward),
        (Yin, Forward),
        (You, Backward),
        (Yin, Forward),
        (You, Backward),
        (Si, Forward),
        (Zi, Backward),
        (Shen, Forward),
        (Mao, Backward),
    ]
};

/// A `(stem, branch)` pair whose stage is fixed regardless of the cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FortuneOverride {
    pub stem: Stem,
    pub branch: Branch,
    pub stage: LifeStage,
}

pub fn cycle_start(stem: Stem) -> (Branch, Direction) {
    CYCLE_START[stem.index()]
}

/// Steps from the stem's 長生 branch to `branch`, in `0..12`.
pub fn position(stem: Stem, branch: Branch) -> usize {
    let (start, direction) = cycle_start(stem);
    let (b, s) = (branch.index(), start.index());
    match direction {
        Direction::Forward => (b + 12 - s) % 12,
        Direction::Backward => (s + 12 - b) % 12,
    }
}

/// Stage of `branch` for `day_master` by the cycle alone.
///
/// ```
/// use saju::cycle::{Branch, Stem};
/// use saju::fortunes::{LifeStage, life_stage};
///
/// assert_eq!(LifeStage::Birth, life_stage(Stem::Jia, Branch::Hai));
/// assert_eq!(LifeStage::Peak, life_stage(Stem::Yi, Branch::Yin));
/// ```
pub fn life_stage(day_master: Stem, branch: Branch) -> LifeStage {
    LifeStage::ALL[position(day_master, branch)]
}

/// Stage of `branch` for `day_master`, taking the first matching entry of
/// `overrides` before the cycle.
pub fn resolve(overrides: &[FortuneOverride], day_master: Stem, branch: Branch) -> LifeStage {
    match overrides
        .iter()
        .find(|o| o.stem == day_master && o.branch == branch)
    {
        Some(o) => {
            debug!(
                stem = %day_master,
                branch = %branch,
                stage = o.stage.hanja(),
                "life stage override"
            );
            o.stage
        }
        None => life_stage(day_master, branch),
    }
}
