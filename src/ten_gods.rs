//! Ten Gods (十神): how a stem relates to the day master.

use serde::{Deserialize, Serialize};

use crate::cycle::Stem;

/// One of the ten relations, named by their hanja.
///
/// Variants come in pairs: the first of each pair is the other stem
/// sharing the day master's polarity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TenGod {
    /// 比肩: same element, same polarity.
    #[serde(rename = "比肩")]
    Companion,
    /// 劫財: same element, opposite polarity.
    #[serde(rename = "劫財")]
    RobWealth,
    #[serde(rename = "食神")]
    EatingGod,
    #[serde(rename = "傷官")]
    HurtingOfficer,
    #[serde(rename = "偏財")]
    IndirectWealth,
    #[serde(rename = "正財")]
    DirectWealth,
    #[serde(rename = "偏官")]
    SevenKillings,
    #[serde(rename = "正官")]
    DirectOfficer,
    #[serde(rename = "偏印")]
    IndirectResource,
    #[serde(rename = "正印")]
    DirectResource,
}

const TEN_GODS: [TenGod; 10] = {
    use TenGod::*;
    [
        Companion,
        RobWealth,
        EatingGod,
        HurtingOfficer,
        IndirectWealth,
        DirectWealth,
        SevenKillings,
        DirectOfficer,
        IndirectResource,
        DirectResource,
    ]
};

const HANJA: [&str; 10] = [
    "比肩", "劫財", "食神", "傷官", "偏財", "正財", "偏官", "正官", "偏印", "正印",
];

/// Element relation between the day master and another stem.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Relation {
    /// Same element.
    Peer,
    /// The day master generates the other.
    Output,
    /// The day master controls the other.
    Wealth,
    /// The other controls the day master.
    Authority,
    /// The other generates the day master.
    Resource,
}

impl TenGod {
    pub const ALL: [TenGod; 10] = TEN_GODS;

    /// Label of `other` seen from `day_master`.
    ///
    /// ```
    /// use saju::cycle::Stem;
    /// use saju::ten_gods::TenGod;
    ///
    /// assert_eq!(TenGod::Companion, TenGod::of(Stem::Bing, Stem::Bing));
    /// assert_eq!(TenGod::DirectOfficer, TenGod::of(Stem::Bing, Stem::Gui));
    /// assert_eq!(TenGod::DirectResource, TenGod::of(Stem::Bing, Stem::Yi));
    /// ```
    pub fn of(day_master: Stem, other: Stem) -> Self {
        // steps from the day master's element to the other's along the
        // generating cycle: 0 peer, 1 output, 2 wealth, 3 authority, 4 resource
        let steps = (other.element().index() + 5 - day_master.element().index()) % 5;
        let split = (day_master.polarity() != other.polarity()) as usize;
        TEN_GODS[steps * 2 + split]
    }

    pub fn relation(self) -> Relation {
        use Relation::*;
        [Peer, Output, Wealth, Authority, Resource][self as usize / 2]
    }

    pub fn hanja(self) -> &'static str {
        HANJA[self as usize]
    }
}

/// Ten God of each hidden stem of `branch`, main stem first.
pub fn hidden(day_master: Stem, branch: crate::cycle::Branch) -> Vec<TenGod> {
    branch
        .hidden_stems()
        .iter()
        .map(|&stem| TenGod::of(day_master, stem))
        .collect()
}

/// Ten Gods of the non-day pillar stems. The day pillar is always
/// [`TenGod::Companion`] and is left out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct TenGods {
    pub year: TenGod,
    pub month: TenGod,
    pub hour: TenGod,
}
