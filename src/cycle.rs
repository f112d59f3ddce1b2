//! Heavenly stems, earthly branches and the sexagenary cycle they form.
//!
//! Every table here is indexed by the ordinal of a closed enum, so lookups
//! cannot miss.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five elements (五行).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The element this one generates (相生): wood → fire → earth → metal →
    /// water → wood.
    ///
    /// ```
    /// use saju::cycle::Element::*;
    ///
    /// assert_eq!(Fire, Wood.generates());
    /// assert_eq!(Wood, Water.generates());
    /// ```
    pub fn generates(self) -> Element {
        Self::ALL[(self.index() + 1) % 5]
    }

    /// The element this one controls (相剋): wood → earth → water → fire →
    /// metal → wood.
    ///
    /// ```
    /// use saju::cycle::Element::*;
    ///
    /// assert_eq!(Earth, Wood.controls());
    /// assert_eq!(Wood, Metal.controls());
    /// ```
    pub fn controls(self) -> Element {
        Self::ALL[(self.index() + 2) % 5]
    }

    pub fn hanja(self) -> &'static str {
        ["木", "火", "土", "金", "水"][self.index()]
    }
}

/// Yin-yang polarity (陰陽).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    fn from_index(idx: usize) -> Self {
        if idx % 2 == 0 { Self::Yang } else { Self::Yin }
    }

    pub fn hanja(self) -> &'static str {
        match self {
            Self::Yang => "陽",
            Self::Yin => "陰",
        }
    }
}

/// The ten heavenly stems (天干), in cycle order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲")]
    Jia,
    #[serde(rename = "乙")]
    Yi,
    #[serde(rename = "丙")]
    Bing,
    #[serde(rename = "丁")]
    Ding,
    #[serde(rename = "戊")]
    Wu,
    #[serde(rename = "己")]
    Ji,
    #[serde(rename = "庚")]
    Geng,
    #[serde(rename = "辛")]
    Xin,
    #[serde(rename = "壬")]
    Ren,
    #[serde(rename = "癸")]
    Gui,
}

/// All stems in cycle order, index 0 is 甲.
pub const STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_HANJA: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl Stem {
    /// Stem at `idx`, counted cyclically (any integer is accepted).
    ///
    /// ```
    /// use saju::cycle::Stem;
    ///
    /// assert_eq!(Stem::Gui, Stem::from_index(-1));
    /// assert_eq!(Stem::Bing, Stem::from_index(12));
    /// ```
    pub fn from_index(idx: i64) -> Self {
        STEMS[idx.rem_euclid(10) as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Stem `n` steps further along the cycle (backwards when negative).
    pub fn offset(self, n: i64) -> Self {
        Self::from_index(self.index() as i64 + n)
    }

    /// Wood for 甲乙, fire for 丙丁, and so on in pairs.
    pub fn element(self) -> Element {
        Element::ALL[self.index() / 2]
    }

    /// Even-indexed stems are yang.
    pub fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    pub fn hanja(self) -> &'static str {
        STEM_HANJA[self.index()]
    }

    pub fn from_hanja(s: &str) -> Option<Self> {
        STEM_HANJA.iter().position(|&h| h == s).map(|i| STEMS[i])
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanja())
    }
}

/// The twelve earthly branches (地支), in cycle order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子")]
    Zi,
    #[serde(rename = "丑")]
    Chou,
    #[serde(rename = "寅")]
    Yin,
    #[serde(rename = "卯")]
    Mao,
    #[serde(rename = "辰")]
    Chen,
    #[serde(rename = "巳")]
    Si,
    #[serde(rename = "午")]
    Wu,
    #[serde(rename = "未")]
    Wei,
    #[serde(rename = "申")]
    Shen,
    #[serde(rename = "酉")]
    You,
    #[serde(rename = "戌")]
    Xu,
    #[serde(rename = "亥")]
    Hai,
}

/// All branches in cycle order, index 0 is 子.
pub const BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_HANJA: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const BRANCH_ELEMENT: [Element; 12] = {
    use Element::*;
    [
        Water, Earth, Wood, Wood, Earth, Fire, Fire, Earth, Metal, Metal, Earth, Water,
    ]
};

/// Hidden stems (藏干) of every branch, main stem first.
const HIDDEN_STEMS: [&[Stem]; 12] = {
    use Stem::*;
    [
        &[Gui],
        &[Ji, Gui, Xin],
        &[Jia, Bing, Wu],
        &[Yi],
        &[Wu, Yi, Gui],
        &[Bing, Wu, Geng],
        &[Ding, Ji],
        &[Ji, Ding, Yi],
        &[Geng, Ren, Wu],
        &[Xin],
        &[Wu, Xin, Ding],
        &[Ren, Jia],
    ]
};

impl Branch {
    /// Branch at `idx`, counted cyclically (any integer is accepted).
    pub fn from_index(idx: i64) -> Self {
        BRANCHES[idx.rem_euclid(12) as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Branch `n` steps further along the cycle (backwards when negative).
    pub fn offset(self, n: i64) -> Self {
        Self::from_index(self.index() as i64 + n)
    }

    pub fn element(self) -> Element {
        BRANCH_ELEMENT[self.index()]
    }

    /// Even-indexed branches are yang.
    pub fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    /// Hidden stems of the branch, main stem first.
    ///
    /// ```
    /// use saju::cycle::{Branch, Stem};
    ///
    /// assert_eq!(&[Stem::Jia, Stem::Bing, Stem::Wu], Branch::Yin.hidden_stems());
    /// assert_eq!(&[Stem::Gui], Branch::Zi.hidden_stems());
    /// ```
    pub fn hidden_stems(self) -> &'static [Stem] {
        HIDDEN_STEMS[self.index()]
    }

    pub fn hanja(self) -> &'static str {
        BRANCH_HANJA[self.index()]
    }

    pub fn from_hanja(s: &str) -> Option<Self> {
        BRANCH_HANJA.iter().position(|&h| h == s).map(|i| BRANCHES[i])
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanja())
    }
}

/// A member of the sexagenary cycle (六十甲子), stored as its index `0..60`
/// where 0 is 甲子 and 59 is 癸亥.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Sexagenary(u8);

impl Sexagenary {
    /// Member at `idx`, counted cyclically.
    pub fn from_index(idx: i64) -> Self {
        Self(idx.rem_euclid(60) as u8)
    }

    /// The cycle member combining `stem` and `branch`.
    ///
    /// Returns `None` when their index parities differ, since such pairs
    /// never occur in the cycle.
    ///
    /// ```
    /// use saju::cycle::{Branch, Sexagenary, Stem};
    ///
    /// assert_eq!(Some(42), Sexagenary::from_pair(Stem::Bing, Branch::Wu).map(|s| s.index()));
    /// assert_eq!(None, Sexagenary::from_pair(Stem::Jia, Branch::Chou));
    /// ```
    pub fn from_pair(stem: Stem, branch: Branch) -> Option<Self> {
        let (s, b) = (stem.index() as i64, branch.index() as i64);
        if s % 2 != b % 2 {
            return None;
        }
        // x ≡ s (mod 10) and x ≡ b (mod 12)
        let idx = (0..6).map(|k| s + 10 * k).find(|x| x % 12 == b)?;
        Some(Self::from_index(idx))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn stem(self) -> Stem {
        Stem::from_index(self.0 as i64)
    }

    pub fn branch(self) -> Branch {
        Branch::from_index(self.0 as i64)
    }

    /// Text form, e.g. 乙巳.
    ///
    /// ```
    /// use saju::cycle::Sexagenary;
    ///
    /// assert_eq!("乙巳", Sexagenary::from_index(41).name());
    /// ```
    pub fn name(self) -> String {
        self.stem().hanja().to_owned() + self.branch().hanja()
    }
}

impl fmt::Display for Sexagenary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem(), self.branch())
    }
}
