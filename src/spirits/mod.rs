//! Twelve Spirits (十二神殺).
//!
//! Labels are found in two phases. Every detector in
//! [`detectors::DETECTORS`] is evaluated for every position, collecting all
//! labels that fire; then [`rank`] keeps the most important of them by
//! [`PRIORITY`]. A position where nothing fires falls back to
//! [`Spirit::default_for`].
//!
//! Charts whose labels are known to differ from what the detectors give
//! are listed as [`SpiritException`]s and bypass both phases.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::date::Date;
use crate::pillars::{ByPosition, FourPillars, Position};

pub mod detectors;

/// The twelve spirits, in the order they follow one another around the
/// branches starting from 劫殺.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Spirit {
    #[serde(rename = "劫殺")]
    Robbery,
    #[serde(rename = "災殺")]
    Disaster,
    #[serde(rename = "天殺")]
    HeavenKilling,
    #[serde(rename = "地殺")]
    EarthKilling,
    #[serde(rename = "年殺")]
    YearSpirit,
    #[serde(rename = "月殺")]
    MonthSpirit,
    #[serde(rename = "亡身殺")]
    Ruin,
    #[serde(rename = "將星殺")]
    General,
    #[serde(rename = "攀鞍殺")]
    Saddle,
    #[serde(rename = "驛馬殺")]
    Horse,
    #[serde(rename = "六害殺")]
    SixHarm,
    #[serde(rename = "華蓋殺")]
    Canopy,
}

impl Spirit {
    /// In cycle order, 劫殺 first.
    pub const ALL: [Spirit; 12] = {
        use Spirit::*;
        [
            Robbery,
            Disaster,
            HeavenKilling,
            EarthKilling,
            YearSpirit,
            MonthSpirit,
            Ruin,
            General,
            Saddle,
            Horse,
            SixHarm,
            Canopy,
        ]
    };

    pub fn hanja(self) -> &'static str {
        [
            "劫殺", "災殺", "天殺", "地殺", "年殺", "月殺", "亡身殺", "將星殺", "攀鞍殺", "驛馬殺",
            "六害殺", "華蓋殺",
        ][self as usize]
    }

    /// Label given to `position` when no detector fires for it.
    pub fn default_for(position: Position) -> Self {
        match position {
            Position::Year => Spirit::YearSpirit,
            Position::Month => Spirit::MonthSpirit,
            Position::Day => Spirit::EarthKilling,
            Position::Hour => Spirit::Canopy,
        }
    }

    /// Rank in [`PRIORITY`], 0 being the most important.
    pub fn priority(self) -> usize {
        PRIORITY
            .iter()
            .position(|&s| s == self)
            .expect("PRIORITY lists every spirit")
    }
}

/// All labels from most to least important.
pub const PRIORITY: [Spirit; 12] = {
    use Spirit::*;
    [
        Robbery,
        Disaster,
        HeavenKilling,
        Ruin,
        SixHarm,
        Horse,
        YearSpirit,
        General,
        Canopy,
        Saddle,
        MonthSpirit,
        EarthKilling,
    ]
};

/// Fixed labels for one chart, identified by its corrected date and hour.
///
/// Positions left out keep the detected label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiritException {
    pub date: Date,
    pub hour: u32,
    pub spirits: ByPosition<Option<Spirit>>,
}

/// Every label whose detector fires, per position, in detector order.
pub fn detect(pillars: &FourPillars) -> ByPosition<Vec<Spirit>> {
    ByPosition::from_fn(|pos| {
        detectors::DETECTORS
            .iter()
            .filter(|d| (d.fires)(pillars, pos))
            .inspect(|d| trace!(position = pos.name(), detector = d.name, "spirit detected"))
            .map(|d| d.spirit)
            .collect()
    })
}

/// The most important of `fired`, `None` if it is empty.
///
/// ```
/// use saju::spirits::{Spirit, rank};
///
/// assert_eq!(Some(Spirit::SixHarm), rank(&[Spirit::Canopy, Spirit::SixHarm]));
/// assert_eq!(None, rank(&[]));
/// ```
pub fn rank(fired: &[Spirit]) -> Option<Spirit> {
    fired.iter().copied().min_by_key(|s| s.priority())
}

/// Labels of `pillars`, whose corrected moment fell on `date` at `hour`.
pub fn resolve(
    pillars: &FourPillars,
    exceptions: &[SpiritException],
    date: Date,
    hour: u32,
) -> ByPosition<Spirit> {
    let exception = exceptions
        .iter()
        .find(|e| e.date == date && e.hour == hour);
    if exception.is_some() {
        debug!(%date, hour, "spirit exception applies");
    }
    let fired = detect(pillars);
    ByPosition::from_fn(|pos| {
        exception
            .and_then(|e| *e.spirits.get(pos))
            .or_else(|| rank(fired.get(pos)))
            .unwrap_or_else(|| Spirit::default_for(pos))
    })
}
